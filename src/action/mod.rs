//! Action result protocol shared by strategies and the dispatcher

pub mod request;
pub mod result;

pub use request::{ActionRequest, Event};
pub use result::ActionResult;
