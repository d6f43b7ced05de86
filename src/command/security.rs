//! Who may talk to an agent, and on which channel

use crate::core::types::ActorId;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Clearance an actor holds with respect to one agent
///
/// Ordered: a check for `Invite` passes for `Invite` and `AllowAll`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityLevel {
    #[display(fmt = "deny all")]
    DenyAll,
    #[display(fmt = "talk")]
    Talk,
    #[display(fmt = "invite")]
    Invite,
    #[display(fmt = "allow all")]
    AllowAll,
}

/// Chat transport a command or reply travels on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatChannel {
    #[display(fmt = "whisper")]
    Whisper,
    #[display(fmt = "say")]
    Say,
    #[display(fmt = "yell")]
    Yell,
    #[display(fmt = "party")]
    Party,
    #[display(fmt = "raid")]
    Raid,
    #[display(fmt = "raid warning")]
    RaidWarning,
    #[display(fmt = "guild")]
    Guild,
    #[display(fmt = "addon")]
    Addon,
    #[display(fmt = "system")]
    System,
    /// A named public channel
    #[display(fmt = "channel")]
    Channel,
}

impl ChatChannel {
    pub fn is_private(self) -> bool {
        self == ChatChannel::Whisper
    }
}

/// Language a chat line was sent in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Universal,
    /// Machine-to-machine traffic from chat addons
    Addon,
}

/// The actor a command or chat line came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    pub id: ActorId,
    pub name: String,
    pub clearance: SecurityLevel,
    /// Another agent rather than a human
    pub is_agent: bool,
}

impl Issuer {
    pub fn human(id: ActorId, name: impl Into<String>, clearance: SecurityLevel) -> Self {
        Self {
            id,
            name: name.into(),
            clearance,
            is_agent: false,
        }
    }

    pub fn agent(id: ActorId, name: impl Into<String>, clearance: SecurityLevel) -> Self {
        Self {
            is_agent: true,
            ..Self::human(id, name, clearance)
        }
    }

    pub fn cleared_for(&self, level: SecurityLevel) -> bool {
        self.clearance >= level
    }
}
