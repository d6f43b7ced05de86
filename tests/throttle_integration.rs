//! Integration tests for the activity throttle
//!
//! These tests drive the per-agent cache the way the decision loop does:
//! - Decisions are reused for the recheck window
//! - A human arriving nearby lifts a disabled agent on the next recheck
//! - Host lag at or above the ceiling scales the generic share to zero

use proptest::prelude::*;
use standin::core::config::ThrottleConfig;
use standin::core::types::{ActorId, Millis, Vec2, WorldPosition};
use standin::throttle::{auto_scale, ActivityCategory, ActivityThrottle, AdmissionContext, LoadGauge};
use standin::world::{WorldFacts, WorldSnapshot};

const HOUR_MS: Millis = 3_600_000;

fn settled_gauge(update_ms: u32) -> LoadGauge {
    let mut gauge = LoadGauge::with_uptime(HOUR_MS);
    gauge.record_update(update_ms);
    gauge
}

fn check(
    throttle: &mut ActivityThrottle,
    agent: ActorId,
    config: &ThrottleConfig,
    facts: &WorldFacts,
    world: &WorldSnapshot,
    gauge: &LoadGauge,
    now: Millis,
) -> bool {
    let ctx = AdmissionContext {
        agent,
        level: 40,
        has_human_controller: false,
        facts,
        config,
        world,
        gauge,
        now,
    };
    throttle.is_allowed(ActivityCategory::All, &ctx, false)
}

#[test]
fn test_disabled_agent_wakes_when_human_arrives() {
    let config = ThrottleConfig {
        active_alone_percent: 0,
        force_when_in_zone: false,
        ..ThrottleConfig::default()
    };
    let agent = ActorId::from_u128(9);
    let facts = WorldFacts {
        position: WorldPosition::new(0, 1, Vec2::new(0.0, 0.0)),
        ..WorldFacts::default()
    };
    let mut world = WorldSnapshot::new();
    let gauge = settled_gauge(10);
    let mut throttle = ActivityThrottle::new(agent);

    let now = HOUR_MS;
    assert!(!check(&mut throttle, agent, &config, &facts, &world, &gauge, now));

    // A human walks up, but the cached denial holds for the window
    world.add_human(
        ActorId::from_u128(100),
        "Ayla",
        WorldPosition::new(0, 2, Vec2::new(30.0, 40.0)),
    );
    assert!(!check(&mut throttle, agent, &config, &facts, &world, &gauge, now + 1_000));
    assert!(!check(
        &mut throttle,
        agent,
        &config,
        &facts,
        &world,
        &gauge,
        now + config.recheck_interval_ms - 1
    ));

    assert!(check(
        &mut throttle,
        agent,
        &config,
        &facts,
        &world,
        &gauge,
        now + config.recheck_interval_ms
    ));
}

#[test]
fn test_forced_recheck_skips_window() {
    let config = ThrottleConfig {
        active_alone_percent: 0,
        ..ThrottleConfig::default()
    };
    let agent = ActorId::from_u128(10);
    let facts = WorldFacts::default();
    let mut world = WorldSnapshot::new();
    let gauge = settled_gauge(10);
    let mut throttle = ActivityThrottle::new(agent);

    assert!(!check(&mut throttle, agent, &config, &facts, &world, &gauge, HOUR_MS));

    world.add_human(ActorId::from_u128(100), "Ayla", facts.position);
    let ctx = AdmissionContext {
        agent,
        level: 40,
        has_human_controller: false,
        facts: &facts,
        config: &config,
        world: &world,
        gauge: &gauge,
        now: HOUR_MS + 10,
    };
    assert!(throttle.is_allowed(ActivityCategory::All, &ctx, true));
}

#[test]
fn test_startup_grace_denies_until_uptime_passes() {
    let config = ThrottleConfig {
        active_alone_percent: 100,
        ..ThrottleConfig::default()
    };
    let agent = ActorId::from_u128(11);
    let facts = WorldFacts::default();
    let world = WorldSnapshot::new();
    let mut throttle = ActivityThrottle::new(agent);

    let mut gauge = LoadGauge::new(10);
    assert!(!check(&mut throttle, agent, &config, &facts, &world, &gauge, 0));

    gauge.advance_uptime(config.init_grace_ms());
    assert!(check(
        &mut throttle,
        agent,
        &config,
        &facts,
        &world,
        &gauge,
        config.recheck_interval_ms
    ));
}

proptest! {
    #[test]
    fn test_cached_decision_is_stable_within_window(
        id in any::<u128>(),
        percent in 1u32..=100,
        offsets in prop::collection::vec(0u64..5_000, 1..20),
    ) {
        let config = ThrottleConfig {
            active_alone_percent: percent,
            ..ThrottleConfig::default()
        };
        let agent = ActorId::from_u128(id);
        let facts = WorldFacts::default();
        let world = WorldSnapshot::new();
        let gauge = settled_gauge(config.smart_scale_floor_ms);
        let mut throttle = ActivityThrottle::new(agent);

        let start = HOUR_MS * 5;
        let first = check(&mut throttle, agent, &config, &facts, &world, &gauge, start);
        for offset in offsets {
            let again = check(&mut throttle, agent, &config, &facts, &world, &gauge, start + offset);
            prop_assert_eq!(again, first);
        }
    }

    #[test]
    fn test_lag_at_ceiling_denies_generic_share(
        id in any::<u128>(),
        lag_over in 0u32..1_000,
    ) {
        let config = ThrottleConfig::default();
        let agent = ActorId::from_u128(id);
        let facts = WorldFacts::default();
        let world = WorldSnapshot::new();
        let gauge = settled_gauge(config.smart_scale_ceiling_ms + lag_over);
        let mut throttle = ActivityThrottle::new(agent);

        prop_assert!(!check(&mut throttle, agent, &config, &facts, &world, &gauge, HOUR_MS));
    }

    #[test]
    fn test_auto_scale_never_grows_with_lag(
        percent in 0u32..=100,
        lag in 0u32..500,
        extra in 0u32..500,
    ) {
        prop_assert!(auto_scale(percent, lag + extra, 50, 200) <= auto_scale(percent, lag, 50, 200));
    }
}
