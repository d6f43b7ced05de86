//! Agent configuration with documented constants
//!
//! Every tunable the decision engine reads is collected here. The
//! configuration is built once at startup (defaults, or a TOML file) and
//! shared by reference; nothing in the engine mutates it afterwards.

use crate::core::error::{EngineError, Result};
use crate::core::types::{MapId, Millis};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Activity throttle tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Percentage of unsupervised agents that run full updates (0..=100)
    ///
    /// At 100 with smart scaling disabled every agent is always active.
    /// Values above 100 are clamped when computing the scaled share.
    pub active_alone_percent: u32,

    /// Scale the active share down as host update time grows
    pub smart_scale: bool,

    /// Host update time (ms) at or below which no scaling is applied
    pub smart_scale_floor_ms: u32,

    /// Host update time (ms) at or above which the scaled share is zero
    ///
    /// When the ceiling is not above the floor the scaling degrades to a
    /// binary decision: everything above the ceiling is zero.
    pub smart_scale_ceiling_ms: u32,

    /// Agents below this level are never scaled
    pub smart_scale_min_level: u32,

    /// Agents above this level are never scaled
    pub smart_scale_max_level: u32,

    /// Force full activity while a human is anywhere on the agent's map
    pub force_when_in_map: bool,

    /// Force full activity while a human is in the agent's zone
    pub force_when_in_zone: bool,

    /// Force full activity while the agent belongs to a guild with humans in it
    pub force_when_in_guild: bool,

    /// Force full activity while an online human lists the agent as a friend
    pub force_when_friend: bool,

    /// Force full activity while a human is within this radius (world units)
    pub force_radius: f32,

    /// How long a computed allowance is reused before recomputation
    pub recheck_interval_ms: Millis,

    /// Expected agent population, used to size the startup grace window
    pub expected_population: u32,

    /// Startup grace per expected agent
    ///
    /// With 50 agents at 110ms each nothing is allowed to run full updates
    /// during the first 5.5 seconds of host uptime.
    pub init_grace_per_agent_ms: Millis,

    /// Upper bound on the startup grace window regardless of population
    pub init_grace_ceiling_ms: Millis,

    /// Local player count above which spreading activities are forced on
    pub spread_density_threshold: usize,

    /// Radius used when measuring local density for spreading activities
    pub spread_radius: f32,

    /// Rotation speed of the active subset
    ///
    /// The per-agent activity number advances by
    /// `active_alone_percent * scaled / 100 * rotation_rate` per minute,
    /// i.e. about one percent of the population swaps in/out each minute
    /// at the default 100%.
    pub rotation_rate: f64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            active_alone_percent: 100,
            smart_scale: true,
            smart_scale_floor_ms: 50,
            smart_scale_ceiling_ms: 200,
            smart_scale_min_level: 1,
            smart_scale_max_level: 80,
            force_when_in_map: false,
            force_when_in_zone: true,
            force_when_in_guild: true,
            force_when_friend: true,
            force_radius: 150.0,
            recheck_interval_ms: 5_000,
            expected_population: 50,
            init_grace_per_agent_ms: 110,
            init_grace_ceiling_ms: 120_000,
            spread_density_threshold: 10,
            spread_radius: 40.0,
            rotation_rate: 0.01,
        }
    }
}

impl ThrottleConfig {
    /// Length of the startup grace window
    pub fn init_grace_ms(&self) -> Millis {
        (self.expected_population as Millis * self.init_grace_per_agent_ms)
            .min(self.init_grace_ceiling_ms)
    }
}

/// Decision loop pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Base delay between decision loop runs
    pub react_delay_ms: Millis,

    /// Scale the react delay by situation with random jitter
    pub dynamic_react_delay: bool,

    /// Keep the base delay inside battlegrounds and arenas
    pub fast_react_in_battleground: bool,

    /// Delay after a minimal (throttled) tick
    pub passive_delay_ms: Millis,

    /// Delay applied after teleports and while the world is not ready
    pub global_cooldown_ms: Millis,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            react_delay_ms: 100,
            dynamic_react_delay: true,
            fast_react_in_battleground: true,
            passive_delay_ms: 10_000,
            global_cooldown_ms: 1_500,
        }
    }
}

/// Command intake tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Splits one chat line into several independent commands
    pub separator: String,

    /// Required leading text for a line to be treated as a command
    pub prefix: String,

    /// Delay per group slot for `queue` commands
    pub queue_stagger_ms: Millis,

    /// How long a channel shorthand marker redirects replies
    pub reply_channel_ttl_ms: Millis,

    /// Low-risk command prefixes accepted from anyone allowed to talk
    pub unsecured_commands: Vec<String>,

    /// Identical controller messages are suppressed for this long
    pub repeat_delay_ms: Millis,

    /// Unsupervised agents stop whispering past this distance
    pub whisper_distance: f32,

    /// Unsupervised agents say feedback out loud instead of dropping it
    pub say_without_controller: bool,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            separator: "\\\\".to_string(),
            prefix: String::new(),
            queue_stagger_ms: 1_000,
            reply_channel_ttl_ms: 2_000,
            unsecured_commands: ["who", "wts", "sendmail", "invite", "leave", "lfg", "rpg status"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            repeat_delay_ms: 2_000,
            whisper_distance: 6_000.0,
            say_without_controller: false,
        }
    }
}

/// Conversational chatter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Queue replies to nearby chat
    pub random_talk: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { random_talk: false }
    }
}

/// A strategy injected while an agent is on a specific map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStrategy {
    pub map: MapId,
    pub strategy: String,
}

/// Complete agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub throttle: ThrottleConfig,
    pub pacing: PacingConfig,
    pub commands: CommandConfig,
    pub chat: ChatConfig,
    /// Add map-specific strategies on spawn, reset and map change
    pub apply_instance_strategies: bool,
    pub instance_strategies: Vec<InstanceStrategy>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            throttle: ThrottleConfig::default(),
            pacing: PacingConfig::default(),
            commands: CommandConfig::default(),
            chat: ChatConfig::default(),
            apply_instance_strategies: true,
            instance_strategies: Vec::new(),
        }
    }
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AgentConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Strategy configured for a map, if any
    pub fn instance_strategy(&self, map: MapId) -> Option<&str> {
        self.instance_strategies
            .iter()
            .find(|entry| entry.map == map)
            .map(|entry| entry.strategy.as_str())
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let throttle = &self.throttle;
        if throttle.smart_scale_min_level > throttle.smart_scale_max_level {
            return Err(EngineError::InvalidConfig(format!(
                "smart_scale_min_level ({}) should be <= smart_scale_max_level ({})",
                throttle.smart_scale_min_level, throttle.smart_scale_max_level
            )));
        }

        if throttle.recheck_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "recheck_interval_ms must be positive".into(),
            ));
        }

        if !(throttle.rotation_rate >= 0.0) {
            return Err(EngineError::InvalidConfig(
                "rotation_rate must be non-negative".into(),
            ));
        }

        if self.commands.separator.is_empty() {
            return Err(EngineError::InvalidConfig(
                "command separator must not be empty".into(),
            ));
        }

        if self.pacing.react_delay_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "react_delay_ms must be positive".into(),
            ));
        }

        Ok(())
    }
}
