//! Per-tick summary of a roster

use crate::agent::LifeCycleState;
use crate::core::types::Millis;
use serde::Serialize;

/// What one roster tick did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub now: Millis,
    pub agents: usize,
    /// Agents whose `All` allowance is currently full
    pub active: usize,
    pub away: usize,
    pub normal: usize,
    pub conflict: usize,
    pub incapacitated: usize,
    pub feedback: usize,
}

impl TickReport {
    pub(super) fn count_state(&mut self, state: LifeCycleState) {
        match state {
            LifeCycleState::Normal => self.normal += 1,
            LifeCycleState::Conflict => self.conflict += 1,
            LifeCycleState::Incapacitated => self.incapacitated += 1,
        }
    }

    /// Share of agents running full ticks, 0.0 for an empty roster
    pub fn active_ratio(&self) -> f64 {
        if self.agents == 0 {
            0.0
        } else {
            self.active as f64 / self.agents as f64
        }
    }
}
