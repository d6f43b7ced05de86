//! Integration tests for the life-cycle state machine and action dispatch
//!
//! These tests verify:
//! - Transitions are idempotent and re-initialize only the target engine
//! - Viability and conflict facts drive Normal/Conflict/Incapacitated
//! - Action resolution short-circuits on the first recognizing strategy
//! - Out-of-state actions still reach their engine

use proptest::prelude::*;
use standin::action::{ActionRequest, ActionResult};
use standin::agent::{Agent, AgentMemory, AgentProfile, AgentServices, EngineSet, LifeCycleState, Role};
use standin::core::config::AgentConfig;
use standin::core::types::ActorId;
use standin::strategy::{
    ActionContext, DefaultSet, SharedCatalog, Strategy, StrategyEngine, StrategySpec, TableCatalog,
};
use standin::throttle::LoadGauge;
use standin::world::{WorldFacts, WorldSnapshot};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts engine re-initializations
struct ResetProbe {
    name: &'static str,
    resets: Arc<AtomicUsize>,
}

impl Strategy for ResetProbe {
    fn name(&self) -> &str {
        self.name
    }

    fn execute(&mut self, _request: &ActionRequest, _ctx: &mut ActionContext<'_>) -> ActionResult {
        ActionResult::Unknown
    }

    fn reset(&mut self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

fn default_set(state: LifeCycleState, strategies: &[&str]) -> DefaultSet {
    DefaultSet {
        state,
        role: None,
        class: None,
        strategies: strategies.iter().map(|s| s.to_string()).collect(),
    }
}

fn catalog() -> SharedCatalog {
    let mut catalog = TableCatalog::new();
    catalog.insert_spec(
        StrategySpec::new("follow")
            .action("follow", ActionResult::Ok)
            .idle("follow"),
    );
    catalog.insert_spec(
        StrategySpec::new("assist")
            .action("attack", ActionResult::Ok)
            .idle("attack"),
    );
    catalog.insert_spec(StrategySpec::new("dead").action("release spirit", ActionResult::Ok));
    catalog.add_defaults(default_set(LifeCycleState::Normal, &["follow"]));
    catalog.add_defaults(default_set(LifeCycleState::Conflict, &["assist"]));
    catalog.add_defaults(default_set(LifeCycleState::Incapacitated, &["dead"]));
    Arc::new(catalog)
}

/// Advance far enough that every call runs a decision pass
fn step(agent: &mut Agent, facts: &WorldFacts, now: &mut u64, world: &WorldSnapshot, gauge: &LoadGauge) {
    *now += 60_000;
    agent.observe(facts.clone(), *now);
    agent.update(*now, 60_000, world, gauge);
}

#[test]
fn test_viability_flip_in_conflict() {
    let services = AgentServices::new(AgentConfig::default(), catalog());
    let mut agent = Agent::new(
        ActorId::from_u128(1),
        "Brakk",
        AgentProfile::new("warrior", Role::Tank, 30),
        services,
    );
    let world = WorldSnapshot::new();
    let gauge = LoadGauge::with_uptime(3_600_000);
    let mut now = 0;

    let mut facts = WorldFacts {
        in_conflict: true,
        ..WorldFacts::default()
    };
    step(&mut agent, &facts, &mut now, &world, &gauge);
    assert_eq!(agent.state(), LifeCycleState::Conflict);
    assert_eq!(agent.transitions(), 1);

    agent.memory_mut().current_target = Some(ActorId::from_u128(66));
    agent.memory_mut().enemy_target = Some(ActorId::from_u128(66));
    facts.health = 0.0;
    step(&mut agent, &facts, &mut now, &world, &gauge);
    assert_eq!(agent.state(), LifeCycleState::Incapacitated);
    assert_eq!(agent.transitions(), 2);
    assert_eq!(agent.memory().current_target, None);
    assert_eq!(agent.memory().enemy_target, None);
    assert_eq!(agent.memory().death_count, 1);

    // Still down: no further transitions
    step(&mut agent, &facts, &mut now, &world, &gauge);
    assert_eq!(agent.transitions(), 2);

    facts.health = 100.0;
    facts.in_conflict = false;
    step(&mut agent, &facts, &mut now, &world, &gauge);
    assert_eq!(agent.state(), LifeCycleState::Normal);
    assert_eq!(agent.transitions(), 3);

    step(&mut agent, &facts, &mut now, &world, &gauge);
    assert_eq!(agent.transitions(), 3);
}

#[test]
fn test_revival_into_conflict_goes_through_normal() {
    let services = AgentServices::new(AgentConfig::default(), catalog());
    let mut agent = Agent::new(ActorId::from_u128(2), "Senna", AgentProfile::default(), services);
    let world = WorldSnapshot::new();
    let gauge = LoadGauge::with_uptime(3_600_000);
    let mut now = 0;

    let mut facts = WorldFacts {
        health: 0.0,
        ..WorldFacts::default()
    };
    step(&mut agent, &facts, &mut now, &world, &gauge);
    assert_eq!(agent.state(), LifeCycleState::Incapacitated);

    facts.health = 40.0;
    facts.in_conflict = true;
    step(&mut agent, &facts, &mut now, &world, &gauge);
    assert_eq!(agent.state(), LifeCycleState::Normal);

    step(&mut agent, &facts, &mut now, &world, &gauge);
    assert_eq!(agent.state(), LifeCycleState::Conflict);
}

#[test]
fn test_inactive_engine_stays_editable() {
    let services = AgentServices::new(AgentConfig::default(), catalog());
    let mut agent = Agent::new(ActorId::from_u128(3), "Brakk", AgentProfile::default(), services);

    agent
        .engines_mut()
        .get_mut(LifeCycleState::Conflict)
        .change_strategy("+follow,-assist");
    assert_eq!(agent.state(), LifeCycleState::Normal);
    assert_eq!(
        agent.engines().get(LifeCycleState::Conflict).strategies(),
        vec!["follow"]
    );

    agent.reset_strategies();
    assert_eq!(
        agent.engines().get(LifeCycleState::Conflict).strategies(),
        vec!["assist"]
    );
}

#[test]
fn test_unknown_is_distinct_from_failed() {
    let mut catalog = TableCatalog::new();
    catalog.insert_spec(StrategySpec::new("chat").action("who", ActionResult::Failed));
    let mut engine = StrategyEngine::new(LifeCycleState::Normal, Arc::new(catalog));
    engine.add_strategy("chat");

    let mut memory = AgentMemory::new();
    let facts = WorldFacts::default();
    let mut ctx = ActionContext {
        agent: ActorId::from_u128(1),
        state: LifeCycleState::Normal,
        now: 0,
        memory: &mut memory,
        facts: &facts,
    };
    assert_eq!(engine.execute_action(&ActionRequest::new("who"), &mut ctx), ActionResult::Failed);
    assert_eq!(engine.execute_action(&ActionRequest::new("dance"), &mut ctx), ActionResult::Unknown);
}

#[test]
fn test_do_specific_action_reaches_inactive_engine() {
    let services = AgentServices::new(AgentConfig::default(), catalog());
    let mut agent = Agent::new(ActorId::from_u128(4), "Brakk", AgentProfile::default(), services);

    assert!(agent.do_specific_action("release spirit", None, None, true));
    assert_eq!(agent.state(), LifeCycleState::Normal);
    assert_eq!(
        agent.engines().get(LifeCycleState::Incapacitated).last_action(),
        Some("release spirit")
    );
}

fn result_strategy() -> impl proptest::strategy::Strategy<Value = ActionResult> {
    prop_oneof![
        Just(ActionResult::Ok),
        Just(ActionResult::Impossible),
        Just(ActionResult::Useless),
        Just(ActionResult::Failed),
    ]
}

proptest! {
    #[test]
    fn test_transition_runs_one_init_per_change(
        targets in prop::collection::vec(0usize..3, 0..40),
    ) {
        const STATES: [LifeCycleState; 3] = [
            LifeCycleState::Normal,
            LifeCycleState::Conflict,
            LifeCycleState::Incapacitated,
        ];
        let counters: Vec<Arc<AtomicUsize>> = (0..3).map(|_| Arc::new(AtomicUsize::new(0))).collect();
        let mut catalog = TableCatalog::new();
        for (i, name) in ["probe normal", "probe conflict", "probe incapacitated"].into_iter().enumerate() {
            let resets = counters[i].clone();
            catalog.register(name, move || {
                Box::new(ResetProbe { name, resets: resets.clone() }) as Box<dyn Strategy>
            });
        }
        let mut engines = EngineSet::new(Arc::new(catalog));
        engines.get_mut(LifeCycleState::Normal).add_strategy("probe normal");
        engines.get_mut(LifeCycleState::Conflict).add_strategy("probe conflict");
        engines.get_mut(LifeCycleState::Incapacitated).add_strategy("probe incapacitated");

        let mut expected = [0usize; 3];
        let mut current = 0;
        for target in targets {
            let changed = engines.transition(STATES[target]);
            prop_assert_eq!(changed, target != current);
            if changed {
                expected[target] += 1;
                current = target;
            }
            prop_assert_eq!(engines.current_state(), STATES[current]);
        }
        for i in 0..3 {
            prop_assert_eq!(counters[i].load(Ordering::SeqCst), expected[i]);
        }
    }

    #[test]
    fn test_first_recognizing_strategy_decides(
        count in 1usize..8,
        pick in 0usize..8,
        result in result_strategy(),
    ) {
        let winner = pick % count;
        let mut catalog = TableCatalog::new();
        for i in 0..count {
            let spec = StrategySpec::new(format!("s{}", i));
            let spec = if i < winner {
                spec.action("other", ActionResult::Ok)
            } else if i == winner {
                spec.action("a", result)
            } else {
                spec.action("a", ActionResult::Ok)
            };
            catalog.insert_spec(spec);
        }
        let mut engine = StrategyEngine::new(LifeCycleState::Normal, Arc::new(catalog));
        for i in 0..count {
            engine.add_strategy(&format!("s{}", i));
        }

        let mut memory = AgentMemory::new();
        let facts = WorldFacts::default();
        let mut ctx = ActionContext {
            agent: ActorId::from_u128(1),
            state: LifeCycleState::Normal,
            now: 0,
            memory: &mut memory,
            facts: &facts,
        };
        prop_assert_eq!(engine.execute_action(&ActionRequest::new("a"), &mut ctx), result);
    }
}
