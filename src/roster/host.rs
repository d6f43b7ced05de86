//! Host-side owner of many agents

use crate::agent::{Agent, AgentProfile, AgentServices, Feedback};
use crate::command::{ChatChannel, Issuer, Language};
use crate::core::types::{ActorId, Millis};
use crate::events::{MessageDirection, WorldMessage};
use crate::roster::TickReport;
use crate::throttle::{ActivityCategory, LoadGauge};
use crate::world::{WorldFacts, WorldSnapshot};
use ahash::AHashMap;

/// Every agent of one host, ticked from a single cooperative loop
///
/// Agents never see each other directly. After each agent's update its
/// cached allowances and supervision status are published to the shared
/// [`WorldSnapshot`], where group members read them on their own turn.
pub struct Roster {
    services: AgentServices,
    agents: AHashMap<ActorId, Agent>,
    /// Spawn order; ticks visit agents in this order
    order: Vec<ActorId>,
    world: WorldSnapshot,
    gauge: LoadGauge,
    now: Millis,
    current_tick: u64,
}

impl Roster {
    pub fn new(services: AgentServices) -> Self {
        Self {
            services,
            agents: AHashMap::new(),
            order: Vec::new(),
            world: WorldSnapshot::new(),
            gauge: LoadGauge::default(),
            now: 0,
            current_tick: 0,
        }
    }

    pub fn spawn(&mut self, name: impl Into<String>, profile: AgentProfile) -> ActorId {
        self.spawn_as(ActorId::new(), name, profile)
    }

    /// Spawn with a caller-chosen id; an existing agent with that id is replaced
    pub fn spawn_as(&mut self, id: ActorId, name: impl Into<String>, profile: AgentProfile) -> ActorId {
        let agent = Agent::new(id, name, profile, self.services.clone());
        tracing::info!(agent = %id, name = %agent.name(), "Agent spawned");
        if self.agents.insert(id, agent).is_none() {
            self.order.push(id);
        }
        id
    }

    pub fn remove(&mut self, id: ActorId) -> Option<Agent> {
        let agent = self.agents.remove(&id)?;
        self.order.retain(|a| *a != id);
        self.world.forget_agent(id);
        tracing::info!(agent = %id, "Agent removed");
        Some(agent)
    }

    pub fn get(&self, id: ActorId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn ids(&self) -> &[ActorId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn world(&self) -> &WorldSnapshot {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldSnapshot {
        &mut self.world
    }

    pub fn gauge(&self) -> &LoadGauge {
        &self.gauge
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Hand fresh world facts to one agent
    pub fn observe(&mut self, id: ActorId, facts: WorldFacts) -> bool {
        let now = self.now;
        match self.agents.get_mut(&id) {
            Some(agent) => {
                agent.observe(facts, now);
                true
            }
            None => false,
        }
    }

    pub fn submit(&mut self, id: ActorId, text: &str, issuer: &Issuer, channel: ChatChannel) -> bool {
        let now = self.now;
        match self.agents.get_mut(&id) {
            Some(agent) => {
                agent.submit_command(text, issuer, channel, Language::Universal, now);
                true
            }
            None => false,
        }
    }

    pub fn receive(&mut self, id: ActorId, direction: MessageDirection, message: WorldMessage) -> bool {
        let now = self.now;
        match self.agents.get_mut(&id) {
            Some(agent) => {
                agent.receive(direction, message, now);
                true
            }
            None => false,
        }
    }

    /// Advance the host clock by `elapsed` and update every agent once
    ///
    /// `elapsed` doubles as the host update time fed to the load gauge.
    pub fn tick(&mut self, elapsed: Millis) -> TickReport {
        let update_ms = u32::try_from(elapsed).unwrap_or(u32::MAX);
        self.tick_with_update_time(elapsed, update_ms)
    }

    /// Like [`Roster::tick`], with a separately measured host update time
    pub fn tick_with_update_time(&mut self, elapsed: Millis, update_ms: u32) -> TickReport {
        self.now += elapsed;
        self.current_tick += 1;
        self.gauge.record_update(update_ms);
        self.gauge.advance_uptime(elapsed);

        let now = self.now;
        let mut report = TickReport {
            tick: self.current_tick,
            now,
            agents: self.agents.len(),
            ..TickReport::default()
        };

        for id in &self.order {
            let Some(agent) = self.agents.get_mut(id) else {
                continue;
            };
            agent.update(now, elapsed, &self.world, &self.gauge);

            if agent.facts().group.is_some() {
                let allowed =
                    agent.allow_activity(ActivityCategory::Party, now, &self.world, &self.gauge, false);
                self.world
                    .publish_allowance(*id, ActivityCategory::Party, allowed);
            }
            if let Some(allowed) = agent.throttle().cached(ActivityCategory::All) {
                self.world.publish_allowance(*id, ActivityCategory::All, allowed);
                if allowed {
                    report.active += 1;
                }
            }

            let supervised = agent.has_human_controller().then(|| agent.facts().position);
            self.world.set_supervised(*id, supervised);

            if agent.is_away() {
                report.away += 1;
            }
            report.count_state(agent.state());
        }

        tracing::trace!(
            tick = report.tick,
            active = report.active,
            away = report.away,
            "Roster tick"
        );
        report
    }

    /// Take every agent's pending feedback, in spawn order
    pub fn drain_feedback(&mut self) -> Vec<(ActorId, Feedback)> {
        let mut out = Vec::new();
        for id in &self.order {
            if let Some(agent) = self.agents.get_mut(id) {
                out.extend(agent.drain_feedback().into_iter().map(|f| (*id, f)));
            }
        }
        out
    }
}
