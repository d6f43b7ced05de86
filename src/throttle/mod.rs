//! Activity throttle: closed-loop admission control for agent work
//!
//! Decides, per activity category, whether an agent may do full work or
//! should fall back to minimal behavior. Hard overrides (conflict, human
//! company, group content) come first; everything else gets a share of
//! activity that shrinks as host update time grows, with a slowly rotating
//! per-agent number deciding who is in the active subset.

pub mod admission;
pub mod cache;
pub mod category;
pub mod gauge;
pub mod scaling;

pub use admission::{admit, AdmissionContext, AdmissionReason, Verdict};
pub use cache::ActivityThrottle;
pub use category::ActivityCategory;
pub use gauge::LoadGauge;
pub use scaling::{auto_scale, rotation_number, rotation_seed};
