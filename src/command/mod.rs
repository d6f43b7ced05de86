//! Free-text commands from controllers
//!
//! Issuer clearance, the command grammar, addressing filters and the
//! deferred queue. Submission and draining live on the agent, which owns
//! the context they need.

pub mod filter;
pub mod parser;
pub mod queue;
pub mod security;

pub use filter::{ClassFilter, CompositeFilter, ContentFilter, LevelFilter, RoleFilter};
pub use parser::{action_candidates, directive, split_commands, Directive};
pub use queue::{CommandQueue, QueuedCommand};
pub use security::{ChatChannel, Issuer, Language, SecurityLevel};
