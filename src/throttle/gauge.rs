//! Host load measurement read by the throttle

use crate::core::types::Millis;
use std::collections::VecDeque;

/// Bounded window of recent host update times plus process uptime
///
/// The host refreshes it once per update cycle; agents only read it.
#[derive(Debug, Clone)]
pub struct LoadGauge {
    samples: VecDeque<u32>,
    capacity: usize,
    uptime_ms: Millis,
}

impl Default for LoadGauge {
    fn default() -> Self {
        Self::new(500)
    }
}

impl LoadGauge {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
            uptime_ms: 0,
        }
    }

    /// Gauge for a host that has already been up for `uptime_ms`
    pub fn with_uptime(uptime_ms: Millis) -> Self {
        let mut gauge = Self::default();
        gauge.uptime_ms = uptime_ms;
        gauge
    }

    /// Record one host update that took `update_ms`
    pub fn record_update(&mut self, update_ms: u32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(update_ms);
    }

    /// Worst update time in the window, zero before any sample
    pub fn max_update_time_ms(&self) -> u32 {
        self.samples.iter().copied().max().unwrap_or(0)
    }

    pub fn uptime_ms(&self) -> Millis {
        self.uptime_ms
    }

    pub fn advance_uptime(&mut self, elapsed: Millis) {
        self.uptime_ms += elapsed;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
