//! Activity categories the throttle decides on

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Tag classifying a unit of work for admission purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityCategory {
    #[display(fmt = "grind")]
    Grind,
    #[display(fmt = "roleplay")]
    Roleplay,
    #[display(fmt = "travel")]
    Travel,
    #[display(fmt = "party")]
    Party,
    #[display(fmt = "out-of-party")]
    OutOfParty,
    /// Work driven by network messages
    #[display(fmt = "network")]
    Network,
    /// Fine-grained pathfinding
    #[display(fmt = "detailed-move")]
    DetailedMove,
    /// The agent's decision loop as a whole
    #[display(fmt = "all")]
    All,
}

impl ActivityCategory {
    pub const COUNT: usize = 8;

    pub const ALL: [ActivityCategory; Self::COUNT] = [
        ActivityCategory::Grind,
        ActivityCategory::Roleplay,
        ActivityCategory::Travel,
        ActivityCategory::Party,
        ActivityCategory::OutOfParty,
        ActivityCategory::Network,
        ActivityCategory::DetailedMove,
        ActivityCategory::All,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Conflict forces activity for everything except these
    pub fn exempt_from_conflict(self) -> bool {
        matches!(self, ActivityCategory::OutOfParty | ActivityCategory::Network)
    }

    /// Work that spreads agents apart when an area gets crowded
    pub fn spreads_agents(self) -> bool {
        matches!(self, ActivityCategory::OutOfParty | ActivityCategory::Grind)
    }
}
