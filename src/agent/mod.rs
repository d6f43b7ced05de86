//! The per-agent decision engine
//!
//! An [`Agent`] owns one strategy engine per life-cycle state, the queues
//! feeding it (commands, classified triggers, chat replies) and the
//! throttle cache deciding how much work it does each tick.

pub mod commands;
pub mod controller;
pub mod debug;
pub mod dispatch;
pub mod feedback;
pub mod inbound;
pub mod memory;
pub mod pacing;
pub mod profile;
pub mod runtime;
pub mod state;
pub mod supervision;
pub mod tell;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::Controller;
pub use feedback::{Cue, Feedback, Outbox};
pub use memory::AgentMemory;
pub use pacing::{react_delay, PaceInputs, Pacing};
pub use profile::{AgentProfile, Role};
pub use runtime::{Agent, AgentServices};
pub use state::{EngineSet, LifeCycleState};
