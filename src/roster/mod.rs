//! Hosting many agents on one cooperative loop

pub mod host;
pub mod report;

pub use host::Roster;
pub use report::TickReport;
