//! The actor currently directing an agent

use crate::command::SecurityLevel;
use crate::core::types::{ActorId, WorldPosition};
use crate::world::{GroupMember, MemberKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    pub id: ActorId,
    pub name: String,
    pub kind: MemberKind,
    pub clearance: SecurityLevel,
    /// Last known position, refreshed every update
    pub position: Option<WorldPosition>,
}

impl Controller {
    pub fn new(id: ActorId, name: impl Into<String>, kind: MemberKind, clearance: SecurityLevel) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            clearance,
            position: None,
        }
    }

    /// Group members get full clearance over the agents they lead
    pub fn from_member(member: &GroupMember) -> Self {
        Self::new(member.id, member.name.clone(), member.kind, SecurityLevel::AllowAll)
    }

    pub fn is_human(&self) -> bool {
        self.kind.counts_as_human()
    }
}
