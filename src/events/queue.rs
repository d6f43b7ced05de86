//! Per-tick message queues

use crate::command::ChatChannel;
use crate::core::types::{ActorId, Millis};
use crate::events::opcode::WorldMessage;
use std::collections::VecDeque;

/// A classified message waiting for the next drain
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedTrigger {
    pub trigger: String,
    pub message: WorldMessage,
    pub seq: u64,
}

/// FIFO of classified messages for one direction
///
/// Unbounded; emptied completely once per tick.
#[derive(Debug, Default)]
pub struct TriggerQueue {
    items: VecDeque<QueuedTrigger>,
    next_seq: u64,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trigger: impl Into<String>, message: WorldMessage) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.items.push_back(QueuedTrigger {
            trigger: trigger.into(),
            message,
            seq,
        });
    }

    /// Take everything queued so far, in arrival order
    pub fn drain(&mut self) -> Vec<QueuedTrigger> {
        self.items.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A conversational reply scheduled for later
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedReply {
    pub channel: ChatChannel,
    pub channel_name: Option<String>,
    pub to: ActorId,
    pub to_name: String,
    pub prompt: String,
    pub due: Millis,
}

#[derive(Debug, Default)]
pub struct ReplyQueue {
    items: Vec<QueuedReply>,
}

impl ReplyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reply: QueuedReply) {
        self.items.push(reply);
    }

    /// Remove and return every reply due at `now`, keeping the rest in order
    pub fn take_due(&mut self, now: Millis) -> Vec<QueuedReply> {
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.items).into_iter().partition(|r| r.due <= now);
        self.items = pending;
        due
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
