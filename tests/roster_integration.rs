//! Integration tests for hosting many agents
//!
//! These tests verify cross-agent effects that only show up on a roster:
//! - A throttled party leader holds its followers back
//! - Human-directed agents count as human presence for their neighbors
//! - Unsupervised agents adopt a human group leader and greet them
//! - Removing an agent withdraws everything it published
//! - Agents fall back to minimal work once nearby humans leave

use standin::action::ActionResult;
use standin::agent::{AgentProfile, AgentServices, Controller, Feedback, LifeCycleState, Role};
use standin::command::{ChatChannel, Issuer, SecurityLevel};
use standin::core::config::AgentConfig;
use standin::core::types::{ActorId, Vec2, WorldPosition};
use standin::roster::Roster;
use standin::strategy::{DefaultSet, StrategySpec, TableCatalog};
use standin::throttle::{ActivityCategory, AdmissionReason};
use standin::world::{GroupInfo, GroupMember, MemberKind, WorldFacts, WorldView};
use std::sync::Arc;

/// Longer than the startup grace, the recheck window and the passive delay
const LONG_TICK: u64 = 15_000;

fn roster(active_alone_percent: u32) -> Roster {
    let mut config = AgentConfig::default();
    config.throttle.active_alone_percent = active_alone_percent;

    let mut catalog = TableCatalog::new();
    catalog.insert_spec(
        StrategySpec::new("follow")
            .action("follow", ActionResult::Ok)
            .idle("follow"),
    );
    catalog.insert_spec(StrategySpec::new("chat").action("who", ActionResult::Ok));
    catalog.add_defaults(DefaultSet {
        state: LifeCycleState::Normal,
        role: None,
        class: None,
        strategies: vec!["chat".into()],
    });
    Roster::new(AgentServices::new(config, Arc::new(catalog)))
}

fn at(map: u32, zone: u32, x: f32, y: f32) -> WorldFacts {
    WorldFacts {
        position: WorldPosition::new(map, zone, Vec2::new(x, y)),
        ..WorldFacts::default()
    }
}

#[test]
fn test_throttled_leader_holds_party_back() {
    let mut roster = roster(0);
    let leader = roster.spawn("Leader", AgentProfile::new("warrior", Role::Tank, 30));
    let member = roster.spawn("Member", AgentProfile::new("priest", Role::Healer, 30));

    let group = GroupInfo::new(
        leader,
        vec![
            GroupMember::new(leader, "Leader", MemberKind::Agent, 0),
            GroupMember::new(member, "Member", MemberKind::Agent, 0),
        ],
    );
    for id in [leader, member] {
        let mut facts = at(0, 1, 0.0, 0.0);
        facts.group = Some(group.clone());
        roster.observe(id, facts);
    }

    roster.tick(LONG_TICK);

    assert_eq!(
        roster.world().cached_allowance(leader, ActivityCategory::Party),
        Some(false)
    );
    let reason = roster
        .get(member)
        .and_then(|a| a.throttle().cached_reason(ActivityCategory::All));
    assert_eq!(reason, Some(AdmissionReason::LeaderThrottled));
}

#[test]
fn test_human_arrival_and_departure_toggle_activity() {
    let mut roster = roster(0);
    let id = roster.spawn("Brakk", AgentProfile::default());
    roster.observe(id, at(0, 1, 0.0, 0.0));

    let report = roster.tick(LONG_TICK);
    assert_eq!(report.active, 0);
    assert_eq!(report.away, 1);

    let human = ActorId::from_u128(700);
    roster
        .world_mut()
        .add_human(human, "Ayla", WorldPosition::new(0, 2, Vec2::new(30.0, 40.0)));
    let report = roster.tick(LONG_TICK);
    assert_eq!(report.active, 1);
    assert_eq!(report.away, 0);

    roster.world_mut().remove_human(human);
    let report = roster.tick(LONG_TICK);
    assert_eq!(report.active, 0);
    assert_eq!(report.away, 1);
}

#[test]
fn test_supervised_agent_counts_as_human_presence() {
    let mut roster = roster(0);
    let supervised = roster.spawn("Brakk", AgentProfile::default());
    let neighbor = roster.spawn("Senna", AgentProfile::default());
    roster.observe(supervised, at(0, 7, 0.0, 0.0));
    roster.observe(neighbor, at(0, 7, 1_000.0, 1_000.0));

    let owner = ActorId::from_u128(800);
    if let Some(agent) = roster.get_mut(supervised) {
        agent.set_controller(Some(Controller::new(
            owner,
            "Owner",
            MemberKind::Human,
            SecurityLevel::AllowAll,
        )));
    }

    let report = roster.tick(LONG_TICK);
    assert_eq!(report.active, 2);
    let reason = roster
        .get(neighbor)
        .and_then(|a| a.throttle().cached_reason(ActivityCategory::All));
    assert_eq!(reason, Some(AdmissionReason::HumanInZone));

    assert!(roster.remove(supervised).is_some());
    assert!(!roster.world().zone_has_human(0, 7));
    assert_eq!(
        roster.world().cached_allowance(supervised, ActivityCategory::All),
        None
    );

    let report = roster.tick(LONG_TICK);
    assert_eq!(report.agents, 1);
    assert_eq!(report.active, 0);
}

#[test]
fn test_agent_adopts_human_leader() {
    let mut roster = roster(100);
    let leader = ActorId::from_u128(900);
    let id = roster.spawn("Brakk", AgentProfile::default());

    let mut facts = at(0, 1, 0.0, 0.0);
    facts.group = Some(GroupInfo::new(
        leader,
        vec![
            GroupMember::new(leader, "Ayla", MemberKind::Human, 0),
            GroupMember::new(id, "Brakk", MemberKind::Agent, 0),
        ],
    ));
    roster.observe(id, facts);
    roster.tick(LONG_TICK);

    let agent = roster.get(id).expect("agent spawned");
    assert_eq!(agent.controller().map(|c| c.id), Some(leader));
    assert!(agent.engines().get(LifeCycleState::Normal).has_strategy("follow"));

    let feedback = roster.drain_feedback();
    assert!(feedback.iter().any(|(from, f)| *from == id
        && matches!(f, Feedback::Tell { text, .. } if text == "Hello, I follow you!")));

    // The adopted leader can now give orders
    let issuer = Issuer::human(leader, "Ayla", SecurityLevel::AllowAll);
    assert!(roster.submit(id, "who", &issuer, ChatChannel::Party));
    roster.tick(LONG_TICK);
    assert!(roster.get(id).is_some_and(|a| a.pending_commands().is_empty()));
}
