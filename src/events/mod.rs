//! World message classification and queuing

pub mod classifier;
pub mod opcode;
pub mod queue;

pub use classifier::ClassifierTable;
pub use opcode::{ChatPayload, MessageDirection, Opcode, WorldMessage};
pub use queue::{QueuedReply, QueuedTrigger, ReplyQueue, TriggerQueue};
