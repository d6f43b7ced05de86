//! Table-driven strategies loaded from TOML

use crate::action::{ActionRequest, ActionResult};
use crate::strategy::{ActionContext, Strategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Side effect applied to agent memory when a scripted action succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptedEffect {
    ClearTargets,
    StopMoving,
    Interrupt,
    /// Anchor the agent at its current position
    HoldPosition,
    ReleasePosition,
    /// Head for the travel target, if one is set
    Travel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedAction {
    pub result: ActionResult,
    #[serde(default)]
    pub effect: Option<ScriptedEffect>,
}

/// One `[[strategy]]` entry of the strategy table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySpec {
    pub name: String,
    /// Action name -> outcome
    #[serde(default)]
    pub actions: BTreeMap<String, ScriptedAction>,
    /// Trigger name -> action name
    #[serde(default)]
    pub triggers: BTreeMap<String, String>,
    /// Proposed on quiet ticks
    #[serde(default)]
    pub idle: Option<String>,
    /// Keep proposing the idle action on throttled ticks
    #[serde(default)]
    pub idle_when_minimal: bool,
}

impl StrategySpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: BTreeMap::new(),
            triggers: BTreeMap::new(),
            idle: None,
            idle_when_minimal: false,
        }
    }

    pub fn action(mut self, name: impl Into<String>, result: ActionResult) -> Self {
        self.actions.insert(
            name.into(),
            ScriptedAction {
                result,
                effect: None,
            },
        );
        self
    }

    pub fn trigger(mut self, trigger: impl Into<String>, action: impl Into<String>) -> Self {
        self.triggers.insert(trigger.into(), action.into());
        self
    }

    pub fn idle(mut self, action: impl Into<String>) -> Self {
        self.idle = Some(action.into());
        self
    }
}

/// Strategy whose behavior is entirely described by a [`StrategySpec`]
#[derive(Debug, Clone)]
pub struct ScriptedStrategy {
    spec: StrategySpec,
}

impl ScriptedStrategy {
    pub fn new(spec: StrategySpec) -> Self {
        Self { spec }
    }

    fn apply(effect: ScriptedEffect, ctx: &mut ActionContext<'_>) {
        match effect {
            ScriptedEffect::ClearTargets => ctx.memory.clear_targets(),
            ScriptedEffect::StopMoving => ctx.memory.stop_movement(),
            ScriptedEffect::Interrupt => {
                ctx.memory.interrupt();
            }
            ScriptedEffect::HoldPosition => ctx.memory.stay_position = Some(ctx.facts.position),
            ScriptedEffect::ReleasePosition => ctx.memory.stay_position = None,
            ScriptedEffect::Travel => ctx.memory.moving_to = ctx.memory.travel_target,
        }
    }
}

impl Strategy for ScriptedStrategy {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn execute(&mut self, request: &ActionRequest, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(action) = self.spec.actions.get(&request.name) else {
            return ActionResult::Unknown;
        };

        if action.result.is_success() {
            if let Some(effect) = action.effect {
                Self::apply(effect, ctx);
            }
        }
        action.result
    }

    fn trigger_action(&self, trigger: &str) -> Option<String> {
        self.spec.triggers.get(trigger).cloned()
    }

    fn next_action(&self, _ctx: &ActionContext<'_>, minimal: bool) -> Option<String> {
        if minimal && !self.spec.idle_when_minimal {
            return None;
        }
        self.spec.idle.clone()
    }
}
