//! Who the agent is: class, combat role and level

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Combat role used to pick default strategies and route `@role` commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[display(fmt = "tank")]
    Tank,
    #[display(fmt = "healer")]
    Healer,
    #[display(fmt = "melee")]
    MeleeDamage,
    #[display(fmt = "ranged")]
    RangedDamage,
}

impl Role {
    pub fn is_damage(self) -> bool {
        matches!(self, Role::MeleeDamage | Role::RangedDamage)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub class: String,
    pub role: Role,
    pub level: u32,
    /// Spawned by the host to populate the world rather than owned by a player
    pub autonomous: bool,
}

impl AgentProfile {
    pub fn new(class: impl Into<String>, role: Role, level: u32) -> Self {
        Self {
            class: class.into(),
            role,
            level,
            autonomous: true,
        }
    }
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self::new("warrior", Role::MeleeDamage, 1)
    }
}
