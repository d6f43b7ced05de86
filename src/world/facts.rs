//! Per-tick facts the world reports about one agent

use crate::core::types::{ActorId, MapId, WorldPosition};
use serde::{Deserialize, Serialize};

/// How a group member is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberKind {
    /// A human at the keyboard
    Human,
    /// An agent currently directed by a human controller
    SupervisedAgent,
    /// An agent nobody is directing
    Agent,
}

impl MemberKind {
    /// Humans and human-directed agents keep their group fully active
    pub fn counts_as_human(self) -> bool {
        matches!(self, MemberKind::Human | MemberKind::SupervisedAgent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: ActorId,
    pub name: String,
    pub kind: MemberKind,
    pub in_world: bool,
    pub map: MapId,
}

impl GroupMember {
    pub fn new(id: ActorId, name: impl Into<String>, kind: MemberKind, map: MapId) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            in_world: true,
            map,
        }
    }
}

/// The agent's party or raid, in roster order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub leader: ActorId,
    pub members: Vec<GroupMember>,
    /// Formed by the matchmaking queue rather than by players
    pub matchmade: bool,
}

impl GroupInfo {
    pub fn new(leader: ActorId, members: Vec<GroupMember>) -> Self {
        Self {
            leader,
            members,
            matchmade: false,
        }
    }

    pub fn member(&self, id: ActorId) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn leader_member(&self) -> Option<&GroupMember> {
        self.member(self.leader)
    }
}

/// Snapshot of liveness, conflict and location facts for one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldFacts {
    /// Health percentage; zero means the agent is not viable
    pub health: f32,
    pub in_conflict: bool,
    pub position: WorldPosition,
    pub in_world: bool,
    pub teleporting: bool,
    /// Outside any dungeon, raid or battleground instance
    pub open_world: bool,
    pub in_battleground: bool,
    pub resting: bool,
    pub moving: bool,
    /// Waiting in a battleground or dungeon-finder queue
    pub queued_for_group_content: bool,
    /// Member of a guild that has human members
    pub in_real_guild: bool,
    pub group: Option<GroupInfo>,
}

impl Default for WorldFacts {
    fn default() -> Self {
        Self {
            health: 100.0,
            in_conflict: false,
            position: WorldPosition::default(),
            in_world: true,
            teleporting: false,
            open_world: true,
            in_battleground: false,
            resting: false,
            moving: false,
            queued_for_group_content: false,
            in_real_guild: false,
            group: None,
        }
    }
}

impl WorldFacts {
    pub fn is_viable(&self) -> bool {
        self.health > 0.0
    }
}
