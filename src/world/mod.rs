//! World-state boundary: facts about the agent and what it can observe around it

pub mod facts;
pub mod snapshot;

pub use facts::{GroupInfo, GroupMember, MemberKind, WorldFacts};
pub use snapshot::{HumanPresence, WorldSnapshot};

use crate::core::types::{ActorId, MapId, WorldPosition, ZoneId};
use crate::throttle::ActivityCategory;

/// Read-only queries the decision engine makes against the shared world
///
/// Implementations must be cheap: the throttle calls these every time a
/// cached allowance expires.
pub trait WorldView {
    /// A human, or an agent directed by one, is on this map
    fn map_has_human(&self, map: MapId) -> bool;

    /// A human, or an agent directed by one, is in this zone
    fn zone_has_human(&self, map: MapId, zone: ZoneId) -> bool;

    /// A connected human is strictly closer than `range`
    fn human_within(&self, position: &WorldPosition, range: f32) -> bool;

    /// Number of connected humans strictly closer than `range`
    fn humans_within(&self, position: &WorldPosition, range: f32) -> usize;

    fn befriended_by_online_human(&self, agent: ActorId) -> bool;

    fn position_of(&self, actor: ActorId) -> Option<WorldPosition>;

    /// Another agent's last computed allowance, if it has one
    fn cached_allowance(&self, agent: ActorId, category: ActivityCategory) -> Option<bool>;
}
