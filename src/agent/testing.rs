//! Fixtures shared by the agent unit tests

use crate::action::ActionResult;
use crate::agent::{Agent, AgentProfile, AgentServices, Controller, LifeCycleState, Role};
use crate::command::{Issuer, SecurityLevel};
use crate::core::config::AgentConfig;
use crate::core::types::ActorId;
use crate::strategy::{DefaultSet, ScriptedAction, ScriptedEffect, SharedCatalog, StrategySpec, TableCatalog};
use crate::world::MemberKind;
use std::sync::Arc;

pub(crate) const CONTROLLER_ID: u128 = 0xc0;

pub(crate) fn catalog() -> SharedCatalog {
    let mut catalog = TableCatalog::new();

    catalog.insert_spec(
        StrategySpec::new("follow")
            .action("follow", ActionResult::Ok)
            .action("accept invitation", ActionResult::Ok)
            .trigger("group invite", "accept invitation"),
    );

    let mut stay = StrategySpec::new("stay");
    stay.actions.insert(
        "stay".into(),
        ScriptedAction {
            result: ActionResult::Ok,
            effect: Some(ScriptedEffect::HoldPosition),
        },
    );
    catalog.insert_spec(stay);

    catalog.insert_spec(
        StrategySpec::new("chat")
            .action("who", ActionResult::Ok)
            .action("warning", ActionResult::Ok),
    );
    catalog.insert_spec(
        StrategySpec::new("melee")
            .action("attack", ActionResult::Impossible)
            .action("heal", ActionResult::Useless)
            .action("flee", ActionResult::Failed),
    );
    catalog.insert_spec(StrategySpec::new("release").action("release spirit", ActionResult::Ok));

    for (state, strategies) in [
        (LifeCycleState::Normal, vec!["follow", "stay", "chat"]),
        (LifeCycleState::Conflict, vec!["melee"]),
        (LifeCycleState::Incapacitated, vec!["release"]),
    ] {
        catalog.add_defaults(DefaultSet {
            state,
            role: None,
            class: None,
            strategies: strategies.into_iter().map(String::from).collect(),
        });
    }

    Arc::new(catalog)
}

pub(crate) fn agent() -> Agent {
    agent_with_config(AgentConfig::default())
}

pub(crate) fn agent_with_config(config: AgentConfig) -> Agent {
    let services = AgentServices::new(config, catalog());
    Agent::new(
        ActorId::from_u128(0xa1),
        "Brakk",
        AgentProfile::new("warrior", Role::MeleeDamage, 10),
        services,
    )
}

pub(crate) fn human_controller() -> Controller {
    Controller::new(
        ActorId::from_u128(CONTROLLER_ID),
        "Ayla",
        MemberKind::Human,
        SecurityLevel::AllowAll,
    )
}

pub(crate) fn issuer() -> Issuer {
    Issuer::human(ActorId::from_u128(CONTROLLER_ID), "Ayla", SecurityLevel::AllowAll)
}
