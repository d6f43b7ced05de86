//! The agent and its per-tick decision loop

use crate::action::ActionResult;
use crate::agent::controller::Controller;
use crate::agent::feedback::{Feedback, Outbox};
use crate::agent::pacing::{react_delay, PaceInputs, Pacing};
use crate::agent::{AgentMemory, AgentProfile, EngineSet, LifeCycleState};
use crate::command::{CommandQueue, CompositeFilter};
use crate::core::config::AgentConfig;
use crate::core::types::{ActorId, MapId, Millis};
use crate::events::{ClassifierTable, MessageDirection, ReplyQueue, TriggerQueue};
use crate::strategy::{ActionContext, SharedCatalog};
use crate::throttle::{ActivityCategory, ActivityThrottle, AdmissionContext, LoadGauge};
use crate::world::{WorldFacts, WorldView};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Read-only collaborators shared by every agent of a host
#[derive(Clone)]
pub struct AgentServices {
    pub config: Arc<AgentConfig>,
    pub catalog: SharedCatalog,
    pub classifier: Arc<ClassifierTable>,
    pub filter: Arc<CompositeFilter>,
}

impl AgentServices {
    pub fn new(config: AgentConfig, catalog: SharedCatalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            classifier: Arc::new(ClassifierTable::standard()),
            filter: Arc::new(CompositeFilter::standard()),
        }
    }
}

/// One autonomous stand-in
///
/// Owns its state machine, queues, throttle state and feedback outbox.
/// Everything is single-writer: the host calls [`Agent::observe`] with
/// fresh world facts, feeds commands and messages, then calls
/// [`Agent::update`] once per scheduling tick.
pub struct Agent {
    pub(super) id: ActorId,
    pub(super) name: String,
    pub(super) profile: AgentProfile,
    pub(super) services: AgentServices,
    pub(super) engines: EngineSet,
    pub(super) memory: AgentMemory,
    pub(super) facts: WorldFacts,
    pub(super) controller: Option<Controller>,
    pub(super) throttle: ActivityThrottle,
    pub(super) pacing: Pacing,
    pub(super) commands: CommandQueue,
    pub(super) to_agent: TriggerQueue,
    pub(super) from_controller: TriggerQueue,
    pub(super) to_controller: TriggerQueue,
    pub(super) replies: ReplyQueue,
    pub(super) outbox: Outbox,
    pub(super) rng: ChaCha8Rng,
    /// Latest host time seen
    pub(super) clock: Millis,
    pub(super) logging_out: bool,
    away: bool,
    current_map: Option<MapId>,
    transitions: u64,
}

impl Agent {
    pub fn new(id: ActorId, name: impl Into<String>, profile: AgentProfile, services: AgentServices) -> Self {
        let (high, low) = id.0.as_u64_pair();
        let mut agent = Self {
            id,
            name: name.into(),
            profile,
            engines: EngineSet::new(services.catalog.clone()),
            services,
            memory: AgentMemory::new(),
            facts: WorldFacts::default(),
            controller: None,
            throttle: ActivityThrottle::new(id),
            pacing: Pacing::new(),
            commands: CommandQueue::new(),
            to_agent: TriggerQueue::new(),
            from_controller: TriggerQueue::new(),
            to_controller: TriggerQueue::new(),
            replies: ReplyQueue::new(),
            outbox: Outbox::new(),
            rng: ChaCha8Rng::seed_from_u64(high ^ low),
            clock: 0,
            logging_out: false,
            away: false,
            current_map: None,
            transitions: 0,
        };
        agent.reset_strategies();
        agent
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    pub fn config(&self) -> &AgentConfig {
        &self.services.config
    }

    pub fn state(&self) -> LifeCycleState {
        self.engines.current_state()
    }

    pub fn engines(&self) -> &EngineSet {
        &self.engines
    }

    pub fn engines_mut(&mut self) -> &mut EngineSet {
        &mut self.engines
    }

    pub fn memory(&self) -> &AgentMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut AgentMemory {
        &mut self.memory
    }

    pub fn facts(&self) -> &WorldFacts {
        &self.facts
    }

    pub fn throttle(&self) -> &ActivityThrottle {
        &self.throttle
    }

    pub fn pending_commands(&self) -> &CommandQueue {
        &self.commands
    }

    pub fn pending_triggers(&self, direction: MessageDirection) -> usize {
        match direction {
            MessageDirection::ToAgent => self.to_agent.len(),
            MessageDirection::FromController => self.from_controller.len(),
            MessageDirection::ToController => self.to_controller.len(),
        }
    }

    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }

    /// Milliseconds until the next decision pass
    pub fn next_check_in(&self) -> Millis {
        self.pacing.remaining()
    }

    pub fn is_away(&self) -> bool {
        self.away
    }

    pub fn is_logging_out(&self) -> bool {
        self.logging_out
    }

    /// Life-cycle transitions performed so far
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn controller(&self) -> Option<&Controller> {
        self.controller.as_ref()
    }

    pub fn set_controller(&mut self, controller: Option<Controller>) {
        if let Some(c) = &controller {
            tracing::debug!(agent = %self.id, controller = %c.id, kind = ?c.kind, "Controller assigned");
        }
        self.controller = controller;
    }

    pub fn has_human_controller(&self) -> bool {
        self.controller.as_ref().is_some_and(Controller::is_human)
    }

    /// Take everything said or signalled since the last drain
    pub fn drain_feedback(&mut self) -> Vec<Feedback> {
        self.outbox.drain()
    }

    /// Accept this tick's world facts
    ///
    /// A change of map resets the agent and rebuilds its strategies for
    /// the new location.
    pub fn observe(&mut self, facts: WorldFacts, now: Millis) {
        self.clock = now;
        let map = facts.position.map;
        let in_world = facts.in_world;
        self.facts = facts;
        if !in_world {
            return;
        }

        match self.current_map.replace(map) {
            Some(previous) if previous != map => {
                tracing::debug!(agent = %self.id, from = previous, to = map, "Changed map");
                self.reset(true);
                self.rebuild_strategies(true);
            }
            None if self.config().apply_instance_strategies => {
                self.apply_instance_strategies(map, false);
            }
            _ => {}
        }
    }

    /// Run one scheduling tick
    ///
    /// `elapsed` is the time since the previous call. The decision pass
    /// itself only runs once the react delay has counted down.
    pub fn update(&mut self, now: Millis, elapsed: Millis, world: &dyn WorldView, gauge: &LoadGauge) {
        self.clock = now;
        self.pacing.countdown(elapsed);

        if !self.facts.in_world {
            return;
        }

        if let Some(controller) = self.controller.as_mut() {
            controller.position = world.position_of(controller.id);
        }

        self.allow_activity(ActivityCategory::All, now, world, gauge, false);

        if !self.pacing.is_ready() {
            return;
        }

        self.update_internal(now, world, gauge);
        let delay = self.react_delay();
        self.pacing.yield_for(delay);
    }

    fn update_internal(&mut self, now: Millis, world: &dyn WorldView, gauge: &LoadGauge) {
        if self.facts.teleporting {
            return;
        }

        self.emit_due_replies(now);
        self.handle_commands(now);

        if self.logging_out {
            let delay = self.react_delay();
            self.pacing.set(delay);
            return;
        }

        self.drain_triggers();
        self.do_next_action(now, world, gauge);
    }

    fn do_next_action(&mut self, now: Millis, world: &dyn WorldView, gauge: &LoadGauge) {
        if !self.facts.in_world || self.facts.teleporting {
            let cooldown = self.services.config.pacing.global_cooldown_ms;
            self.pacing.set(cooldown);
            return;
        }

        let viable = self.facts.is_viable();
        let state = self.engines.current_state();

        if !viable && state != LifeCycleState::Incapacitated {
            self.memory.stop_movement();
            if !self.has_human_controller() && !self.facts.in_battleground {
                self.memory.death_count += 1;
            }
            self.memory.clear_targets();
            self.change_engine(LifeCycleState::Incapacitated);
            return;
        }

        if viable && state == LifeCycleState::Incapacitated {
            self.change_engine(LifeCycleState::Normal);
            return;
        }

        if state == LifeCycleState::Normal && self.facts.in_conflict {
            self.memory.current_target = None;
        }

        if viable {
            match (state, self.facts.in_conflict) {
                (LifeCycleState::Normal, true) => {
                    self.change_engine(LifeCycleState::Conflict);
                }
                (LifeCycleState::Conflict, false) => {
                    self.change_engine(LifeCycleState::Normal);
                }
                _ => {}
            }
        }

        let minimal = !self.allow_activity(ActivityCategory::All, now, world, gauge, false);

        let state = self.engines.current_state();
        let mut ctx = ActionContext {
            agent: self.id,
            state,
            now,
            memory: &mut self.memory,
            facts: &self.facts,
        };
        let result = self.engines.get_mut(state).do_next_action(&mut ctx, minimal);
        if result != ActionResult::Unknown {
            tracing::trace!(agent = %self.id, %state, %result, minimal, "Tick action");
        }

        if minimal {
            if !self.away && !self.facts.in_battleground && !self.has_human_controller() {
                self.away = true;
                tracing::debug!(agent = %self.id, "Marked away");
            }
            let passive = self.services.config.pacing.passive_delay_ms;
            self.pacing.set(passive);
            return;
        }

        if self.away {
            self.away = false;
            tracing::debug!(agent = %self.id, "Back from away");
        }

        self.adopt_group_controller();
    }

    /// Switch the governing engine, running the state entry hook
    pub fn change_engine(&mut self, target: LifeCycleState) -> bool {
        if !self.engines.transition(target) {
            return false;
        }
        self.transitions += 1;
        tracing::debug!(agent = %self.id, state = %target, "Engine changed");

        match target {
            LifeCycleState::Conflict if self.engines.get(target).has_strategy("stay") => {
                self.memory.stay_position = Some(self.facts.position);
            }
            LifeCycleState::Normal if self.engines.get(target).has_strategy("stay") => {
                self.memory.stay_position = None;
            }
            _ => {}
        }
        true
    }

    /// Cached throttle decision for `category`, recomputed when stale
    pub fn allow_activity(
        &mut self,
        category: ActivityCategory,
        now: Millis,
        world: &dyn WorldView,
        gauge: &LoadGauge,
        force: bool,
    ) -> bool {
        let has_human_controller = self.has_human_controller();
        let ctx = AdmissionContext {
            agent: self.id,
            level: self.profile.level,
            has_human_controller,
            facts: &self.facts,
            config: &self.services.config.throttle,
            world,
            gauge,
            now,
        };
        self.throttle.is_allowed(category, &ctx, force)
    }

    pub(super) fn react_delay(&mut self) -> Millis {
        let inputs = PaceInputs {
            human_controller: self.has_human_controller(),
            in_battleground: self.facts.in_battleground,
            in_conflict: self.facts.in_conflict
                || self.engines.current_state() == LifeCycleState::Conflict,
            resting: self.facts.resting,
        };
        react_delay(&self.services.config.pacing, inputs, &mut self.rng)
    }

    /// Drop in-flight work and fall back to the normal engine
    ///
    /// A full reset also forgets travel plans and re-initializes every
    /// engine.
    pub fn reset(&mut self, full: bool) {
        if self.logging_out {
            self.logging_out = false;
            self.tell_master("Logout cancelled!");
        }

        self.engines.force(LifeCycleState::Normal);
        self.pacing.set(0);
        self.outbox.clear_history();
        self.memory.clear_targets();
        self.memory.interrupt();
        self.memory.stop_movement();
        for state in LifeCycleState::DISPATCH_ORDER {
            self.engines.get_mut(state).clear_last_action();
        }

        if full {
            self.memory.travel_target = None;
            self.engines.init_all();
        }
        tracing::debug!(agent = %self.id, full, "Agent reset");
    }

    /// Replace every engine's strategies with the catalog defaults
    pub fn reset_strategies(&mut self) {
        self.rebuild_strategies(false);
    }

    fn rebuild_strategies(&mut self, announce_instance: bool) {
        self.engines.clear_all();
        let catalog = self.services.catalog.clone();
        for state in LifeCycleState::DISPATCH_ORDER {
            let engine = self.engines.get_mut(state);
            for name in catalog.default_strategies(&self.profile, state) {
                engine.add_strategy(&name);
            }
        }

        if self.config().apply_instance_strategies {
            let map = self.facts.position.map;
            self.apply_instance_strategies(map, announce_instance);
        }
        self.engines.init_all();
        tracing::debug!(
            agent = %self.id,
            normal = %self.engines.get(LifeCycleState::Normal).list_strategies(),
            conflict = %self.engines.get(LifeCycleState::Conflict).list_strategies(),
            "Strategies reset"
        );
    }

    /// Add the strategy configured for `map` to the normal and conflict engines
    pub fn apply_instance_strategies(&mut self, map: MapId, tell: bool) {
        let Some(name) = self.config().instance_strategy(map).map(str::to_string) else {
            return;
        };

        for state in [LifeCycleState::Conflict, LifeCycleState::Normal] {
            self.engines.get_mut(state).add_strategy(&name);
        }
        tracing::info!(agent = %self.id, map, strategy = %name, "Instance strategy applied");

        if tell {
            self.tell_master(&format!("Added {} instance strategy", name));
        }
    }
}
