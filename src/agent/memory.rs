//! Transient per-agent working memory

use crate::core::types::{ActorId, Millis, WorldPosition};

/// Values strategies read and write while the agent runs
///
/// Nothing here survives a restart. Life-cycle transitions and resets
/// clear the parts that would otherwise go stale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentMemory {
    pub current_target: Option<ActorId>,
    pub enemy_target: Option<ActorId>,
    pub old_target: Option<ActorId>,
    pub pull_target: Option<ActorId>,
    pub loot_target: Option<ActorId>,
    /// Anchor captured when a stay order is active in conflict
    pub stay_position: Option<WorldPosition>,
    /// Destination of the movement in progress
    pub moving_to: Option<WorldPosition>,
    /// Long-range travel goal
    pub travel_target: Option<WorldPosition>,
    /// Spell currently being cast
    pub casting: Option<u32>,
    pub death_count: u32,
    /// Chat replies are not queued before this time
    pub chat_paused_until: Millis,
}

impl AgentMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every target and engagement reference
    pub fn clear_targets(&mut self) {
        self.current_target = None;
        self.enemy_target = None;
        self.pull_target = None;
        self.loot_target = None;
    }

    /// Cancel whatever is being cast, returning it
    pub fn interrupt(&mut self) -> Option<u32> {
        self.casting.take()
    }

    /// Cancel a specific cast; other casts are left alone
    pub fn interrupt_spell(&mut self, spell: u32) -> bool {
        if self.casting == Some(spell) {
            self.casting = None;
            true
        } else {
            false
        }
    }

    pub fn stop_movement(&mut self) {
        self.moving_to = None;
    }

    pub fn is_moving(&self) -> bool {
        self.moving_to.is_some()
    }

    /// Single-line dump used by `debug values`
    pub fn format_values(&self) -> String {
        fn id(value: Option<ActorId>) -> String {
            value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
        }
        fn at(value: Option<WorldPosition>) -> String {
            value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
        }

        format!(
            "current target={}, enemy target={}, old target={}, pull target={}, loot target={}, \
             stay={}, moving to={}, travel={}, casting={}, death count={}",
            id(self.current_target),
            id(self.enemy_target),
            id(self.old_target),
            id(self.pull_target),
            id(self.loot_target),
            at(self.stay_position),
            at(self.moving_to),
            at(self.travel_target),
            self.casting.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
            self.death_count,
        )
    }
}
