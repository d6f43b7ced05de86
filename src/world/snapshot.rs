//! Concrete world view for hosts and tests

use crate::core::types::{ActorId, MapId, WorldPosition, ZoneId};
use crate::throttle::ActivityCategory;
use crate::world::WorldView;
use ahash::{AHashMap, AHashSet};

/// A connected human participant
#[derive(Debug, Clone)]
pub struct HumanPresence {
    pub name: String,
    pub position: WorldPosition,
    pub online: bool,
    /// Agents this human lists as friends
    pub friends: AHashSet<ActorId>,
}

/// Everything the agents of one host can see of the shared world
///
/// Humans are tracked explicitly. Agents with a human controller are
/// registered as supervised so map and zone checks count them as human
/// presence. Cached throttle decisions are published here so group members
/// can read each other's allowance without touching the other agent.
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    humans: AHashMap<ActorId, HumanPresence>,
    supervised: AHashMap<ActorId, WorldPosition>,
    allowances: AHashMap<(ActorId, ActivityCategory), bool>,
}

impl WorldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_human(&mut self, id: ActorId, name: impl Into<String>, position: WorldPosition) {
        self.humans.insert(
            id,
            HumanPresence {
                name: name.into(),
                position,
                online: true,
                friends: AHashSet::new(),
            },
        );
    }

    pub fn remove_human(&mut self, id: ActorId) {
        self.humans.remove(&id);
    }

    pub fn move_human(&mut self, id: ActorId, position: WorldPosition) {
        if let Some(human) = self.humans.get_mut(&id) {
            human.position = position;
        }
    }

    pub fn set_online(&mut self, id: ActorId, online: bool) {
        if let Some(human) = self.humans.get_mut(&id) {
            human.online = online;
        }
    }

    pub fn befriend(&mut self, human: ActorId, agent: ActorId) {
        if let Some(human) = self.humans.get_mut(&human) {
            human.friends.insert(agent);
        }
    }

    pub fn human(&self, id: ActorId) -> Option<&HumanPresence> {
        self.humans.get(&id)
    }

    pub fn human_count(&self) -> usize {
        self.humans.values().filter(|h| h.online).count()
    }

    /// Record whether an agent is currently directed by a human
    pub fn set_supervised(&mut self, agent: ActorId, position: Option<WorldPosition>) {
        match position {
            Some(position) => {
                self.supervised.insert(agent, position);
            }
            None => {
                self.supervised.remove(&agent);
            }
        }
    }

    pub fn publish_allowance(&mut self, agent: ActorId, category: ActivityCategory, allowed: bool) {
        self.allowances.insert((agent, category), allowed);
    }

    pub fn forget_agent(&mut self, agent: ActorId) {
        self.supervised.remove(&agent);
        self.allowances.retain(|(id, _), _| *id != agent);
    }

    fn online_humans(&self) -> impl Iterator<Item = &HumanPresence> {
        self.humans.values().filter(|h| h.online)
    }
}

impl WorldView for WorldSnapshot {
    fn map_has_human(&self, map: MapId) -> bool {
        self.online_humans().any(|h| h.position.map == map)
            || self.supervised.values().any(|p| p.map == map)
    }

    fn zone_has_human(&self, map: MapId, zone: ZoneId) -> bool {
        self.online_humans()
            .any(|h| h.position.map == map && h.position.zone == zone)
            || self
                .supervised
                .values()
                .any(|p| p.map == map && p.zone == zone)
    }

    fn human_within(&self, position: &WorldPosition, range: f32) -> bool {
        self.online_humans()
            .any(|h| h.position.within(position, range))
    }

    fn humans_within(&self, position: &WorldPosition, range: f32) -> usize {
        self.online_humans()
            .filter(|h| h.position.within(position, range))
            .count()
    }

    fn befriended_by_online_human(&self, agent: ActorId) -> bool {
        self.online_humans().any(|h| h.friends.contains(&agent))
    }

    fn position_of(&self, actor: ActorId) -> Option<WorldPosition> {
        self.humans
            .get(&actor)
            .map(|h| h.position)
            .or_else(|| self.supervised.get(&actor).copied())
    }

    fn cached_allowance(&self, agent: ActorId, category: ActivityCategory) -> Option<bool> {
        self.allowances.get(&(agent, category)).copied()
    }
}
