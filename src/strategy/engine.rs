//! Prioritized strategy set for one life-cycle state

use crate::action::{ActionRequest, ActionResult, Event};
use crate::agent::LifeCycleState;
use crate::strategy::{ActionContext, SharedCatalog, Strategy};
use std::fmt;

/// Ordered, duplicate-free collection of strategies
///
/// Insertion order is priority order. The engine for a state that is not
/// current stays editable so its configuration survives until the agent
/// transitions back into that state.
pub struct StrategyEngine {
    state: LifeCycleState,
    catalog: SharedCatalog,
    strategies: Vec<Box<dyn Strategy>>,
    last_action: Option<String>,
}

impl fmt::Debug for StrategyEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyEngine")
            .field("state", &self.state)
            .field("strategies", &self.strategies())
            .field("last_action", &self.last_action)
            .finish()
    }
}

impl StrategyEngine {
    pub fn new(state: LifeCycleState, catalog: SharedCatalog) -> Self {
        Self {
            state,
            catalog,
            strategies: Vec::new(),
            last_action: None,
        }
    }

    pub fn state(&self) -> LifeCycleState {
        self.state
    }

    /// Build `name` from the catalog and append it at the lowest priority
    pub fn add_strategy(&mut self, name: &str) -> bool {
        if self.has_strategy(name) {
            tracing::debug!(state = %self.state, strategy = name, "Strategy already active");
            return false;
        }

        match self.catalog.create(name) {
            Some(strategy) => {
                self.push(strategy);
                true
            }
            None => {
                tracing::debug!(state = %self.state, strategy = name, "Unknown strategy");
                false
            }
        }
    }

    /// Append an already-built strategy; rejected when the name is taken
    pub fn push(&mut self, strategy: Box<dyn Strategy>) -> bool {
        if self.has_strategy(strategy.name()) {
            return false;
        }
        tracing::debug!(state = %self.state, strategy = strategy.name(), "Strategy added");
        self.strategies.push(strategy);
        true
    }

    pub fn remove_strategy(&mut self, name: &str) -> bool {
        let before = self.strategies.len();
        self.strategies.retain(|s| s.name() != name);
        let removed = self.strategies.len() != before;
        if removed {
            tracing::debug!(state = %self.state, strategy = name, "Strategy removed");
        }
        removed
    }

    /// Add when absent, remove when present; returns whether it is now active
    pub fn toggle_strategy(&mut self, name: &str) -> bool {
        if self.remove_strategy(name) {
            false
        } else {
            self.add_strategy(name)
        }
    }

    /// Apply comma-separated edits: `+name` adds, `-name` removes, `~name` toggles
    ///
    /// A bare name is an add. Empty entries are ignored.
    pub fn change_strategy(&mut self, edits: &str) {
        for edit in edits.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            if let Some(name) = edit.strip_prefix('+') {
                self.add_strategy(name.trim());
            } else if let Some(name) = edit.strip_prefix('-') {
                self.remove_strategy(name.trim());
            } else if let Some(name) = edit.strip_prefix('~') {
                self.toggle_strategy(name.trim());
            } else {
                self.add_strategy(edit);
            }
        }
    }

    pub fn remove_all_strategies(&mut self) {
        self.strategies.clear();
    }

    pub fn has_strategy(&self, name: &str) -> bool {
        self.strategies.iter().any(|s| s.name() == name)
    }

    /// Strategy names in priority order
    pub fn strategies(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn list_strategies(&self) -> String {
        self.strategies().join(", ")
    }

    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    pub fn clear_last_action(&mut self) {
        self.last_action = None;
    }

    /// Clear in-flight work ahead of (re)entering this engine's state
    pub fn init(&mut self) {
        self.last_action = None;
        for strategy in &mut self.strategies {
            strategy.reset();
        }
    }

    /// Resolve `request` in priority order; the first recognizing strategy wins
    pub fn execute_action(
        &mut self,
        request: &ActionRequest,
        ctx: &mut ActionContext<'_>,
    ) -> ActionResult {
        for strategy in &mut self.strategies {
            let result = strategy.execute(request, ctx);
            if result.is_recognized() {
                tracing::debug!(
                    agent = %ctx.agent,
                    state = %self.state,
                    strategy = strategy.name(),
                    action = %request.name,
                    %result,
                    "Action executed"
                );
                self.last_action = Some(request.name.clone());
                return result;
            }
        }
        ActionResult::Unknown
    }

    /// Run every action mapped to `trigger`; returns how many were recognized
    ///
    /// Actions are collected from all interested strategies, in priority
    /// order, and each runs at most once even if several strategies map the
    /// trigger to it.
    pub fn dispatch_trigger(
        &mut self,
        trigger: &str,
        event: &Event,
        ctx: &mut ActionContext<'_>,
    ) -> usize {
        let mut actions: Vec<String> = Vec::new();
        for action in self.strategies.iter().filter_map(|s| s.trigger_action(trigger)) {
            if !actions.contains(&action) {
                actions.push(action);
            }
        }

        let mut handled = 0;
        for action in actions {
            let request = ActionRequest::new(action).with_event(event.clone());
            if self.execute_action(&request, ctx).is_recognized() {
                handled += 1;
            }
        }
        handled
    }

    /// Run the highest-priority idle proposal for this tick
    pub fn do_next_action(&mut self, ctx: &mut ActionContext<'_>, minimal: bool) -> ActionResult {
        let view: &ActionContext<'_> = ctx;
        let proposal = self
            .strategies
            .iter()
            .find_map(|s| s.next_action(view, minimal));

        match proposal {
            Some(action) => self.execute_action(&ActionRequest::new(action), ctx),
            None => ActionResult::Unknown,
        }
    }
}
