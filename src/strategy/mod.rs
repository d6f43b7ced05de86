//! Strategies and the per-state engine that resolves actions against them
//!
//! A strategy is a named rule-set. It recognizes some action names, maps
//! some triggers to actions, and may propose an idle action each tick.
//! What the actions actually do is up to the strategy; the engine only
//! cares about the uniform [`ActionResult`] it gets back.

pub mod catalog;
pub mod engine;
pub mod scripted;

pub use catalog::{DefaultSet, SharedCatalog, StrategyCatalog, TableCatalog};
pub use engine::StrategyEngine;
pub use scripted::{ScriptedAction, ScriptedEffect, ScriptedStrategy, StrategySpec};

use crate::action::{ActionRequest, ActionResult};
use crate::agent::{AgentMemory, LifeCycleState};
use crate::core::types::{ActorId, Millis};
use crate::world::WorldFacts;

/// What a strategy may see and touch while executing
pub struct ActionContext<'a> {
    pub agent: ActorId,
    pub state: LifeCycleState,
    pub now: Millis,
    pub memory: &'a mut AgentMemory,
    pub facts: &'a WorldFacts,
}

pub trait Strategy {
    fn name(&self) -> &str;

    /// Attempt `request`; return `Unknown` when the name is not ours
    fn execute(&mut self, request: &ActionRequest, ctx: &mut ActionContext<'_>) -> ActionResult;

    /// Action to run when `trigger` fires, if this strategy reacts to it
    fn trigger_action(&self, _trigger: &str) -> Option<String> {
        None
    }

    /// Action to run on an otherwise quiet tick
    fn next_action(&self, _ctx: &ActionContext<'_>, _minimal: bool) -> Option<String> {
        None
    }

    /// Drop in-flight work; called when the owning engine is re-initialized
    fn reset(&mut self) {}
}
