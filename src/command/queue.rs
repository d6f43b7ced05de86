//! Deferred commands waiting for their release time

use crate::command::{ChatChannel, Issuer};
use crate::core::types::Millis;

#[derive(Debug, Clone, PartialEq)]
pub struct QueuedCommand {
    pub text: String,
    pub issuer: Issuer,
    pub channel: ChatChannel,
    /// Not dispatched before this time
    pub not_before: Millis,
}

/// Commands in submission order
///
/// Draining is a scan, not a pop: a command that is not yet due never
/// holds back the ones behind it.
#[derive(Debug, Default)]
pub struct CommandQueue {
    items: Vec<QueuedCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: QueuedCommand) {
        self.items.push(command);
    }

    /// Remove every due command, preserving submission order on both sides
    pub fn take_due(&mut self, now: Millis) -> Vec<QueuedCommand> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|c| c.not_before <= now);
        self.items = pending;
        due
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedCommand> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
