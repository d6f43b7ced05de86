//! Life-cycle state machine: which strategy engine governs the agent

use crate::strategy::{SharedCatalog, StrategyEngine};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Coarse behavioral mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeCycleState {
    #[display(fmt = "normal")]
    Normal,
    #[display(fmt = "conflict")]
    Conflict,
    #[display(fmt = "incapacitated")]
    Incapacitated,
}

impl Default for LifeCycleState {
    fn default() -> Self {
        LifeCycleState::Normal
    }
}

impl LifeCycleState {
    /// Order used when an action is dispatched across every engine
    pub const DISPATCH_ORDER: [LifeCycleState; 3] = [
        LifeCycleState::Conflict,
        LifeCycleState::Normal,
        LifeCycleState::Incapacitated,
    ];
}

/// One engine per state, exactly one of them current
#[derive(Debug)]
pub struct EngineSet {
    normal: StrategyEngine,
    conflict: StrategyEngine,
    incapacitated: StrategyEngine,
    current: LifeCycleState,
}

impl EngineSet {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self {
            normal: StrategyEngine::new(LifeCycleState::Normal, catalog.clone()),
            conflict: StrategyEngine::new(LifeCycleState::Conflict, catalog.clone()),
            incapacitated: StrategyEngine::new(LifeCycleState::Incapacitated, catalog),
            current: LifeCycleState::Normal,
        }
    }

    pub fn current_state(&self) -> LifeCycleState {
        self.current
    }

    pub fn get(&self, state: LifeCycleState) -> &StrategyEngine {
        match state {
            LifeCycleState::Normal => &self.normal,
            LifeCycleState::Conflict => &self.conflict,
            LifeCycleState::Incapacitated => &self.incapacitated,
        }
    }

    pub fn get_mut(&mut self, state: LifeCycleState) -> &mut StrategyEngine {
        match state {
            LifeCycleState::Normal => &mut self.normal,
            LifeCycleState::Conflict => &mut self.conflict,
            LifeCycleState::Incapacitated => &mut self.incapacitated,
        }
    }

    pub fn current(&self) -> &StrategyEngine {
        self.get(self.current)
    }

    pub fn current_mut(&mut self) -> &mut StrategyEngine {
        self.get_mut(self.current)
    }

    /// Make `target` current and re-initialize its engine
    ///
    /// Returns false, touching nothing, when `target` is already current.
    /// The caller runs the state entry hook only when this returns true.
    pub fn transition(&mut self, target: LifeCycleState) -> bool {
        if self.current == target {
            return false;
        }
        tracing::debug!(from = %self.current, to = %target, "Life-cycle transition");
        self.current = target;
        self.get_mut(target).init();
        true
    }

    /// Set the current state without re-initializing anything
    pub fn force(&mut self, state: LifeCycleState) {
        self.current = state;
    }

    pub fn init_all(&mut self) {
        for state in LifeCycleState::DISPATCH_ORDER {
            self.get_mut(state).init();
        }
    }

    pub fn clear_all(&mut self) {
        for state in LifeCycleState::DISPATCH_ORDER {
            self.get_mut(state).remove_all_strategies();
        }
    }
}
