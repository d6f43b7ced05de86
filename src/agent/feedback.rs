//! Everything an agent says or signals, collected for the host to deliver

use crate::command::ChatChannel;
use crate::core::types::{ActorId, Millis};
use ahash::AHashMap;
use derive_more::Display;
use serde::Serialize;

/// Non-verbal reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    #[display(fmt = "nod")]
    Affirm,
    #[display(fmt = "no")]
    Deny,
    #[display(fmt = "talk")]
    Talk,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Feedback {
    Cue { cue: Cue },
    /// Message to the controller on the current reply channel
    Tell {
        channel: ChatChannel,
        to: ActorId,
        text: String,
    },
    Error { to: ActorId, text: String },
    /// Spoken aloud when there is nobody to tell
    Say { text: String },
    /// Immediate `debug` response, always on the addon channel
    Introspection { to: ActorId, text: String },
    /// A conversational reply that came due
    ChatReply {
        channel: ChatChannel,
        channel_name: Option<String>,
        to: ActorId,
        to_name: String,
        prompt: String,
    },
}

impl Feedback {
    pub fn text(&self) -> Option<&str> {
        match self {
            Feedback::Cue { .. } => None,
            Feedback::Tell { text, .. }
            | Feedback::Error { text, .. }
            | Feedback::Say { text }
            | Feedback::Introspection { text, .. } => Some(text),
            Feedback::ChatReply { prompt, .. } => Some(prompt),
        }
    }
}

/// Pending feedback plus the state that shapes it
#[derive(Debug)]
pub struct Outbox {
    items: Vec<Feedback>,
    /// Last time each text was told, for repeat suppression
    history: AHashMap<String, Millis>,
    reply_channel: ChatChannel,
    reply_channel_until: Millis,
}

impl Default for Outbox {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            history: AHashMap::new(),
            reply_channel: ChatChannel::Whisper,
            reply_channel_until: 0,
        }
    }
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, feedback: Feedback) {
        self.items.push(feedback);
    }

    pub fn cue(&mut self, cue: Cue) {
        self.items.push(Feedback::Cue { cue });
    }

    pub fn drain(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.items)
    }

    pub fn pending(&self) -> &[Feedback] {
        &self.items
    }

    /// Record `text` as told unless it was told within `repeat_delay`
    pub fn should_tell(&mut self, text: &str, now: Millis, repeat_delay: Millis) -> bool {
        match self.history.get(text) {
            Some(&last) if now.saturating_sub(last) < repeat_delay => false,
            _ => {
                self.history.insert(text.to_string(), now);
                true
            }
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn set_reply_channel(&mut self, channel: ChatChannel, until: Millis) {
        self.reply_channel = channel;
        self.reply_channel_until = until;
    }

    pub fn reset_reply_channel(&mut self) {
        self.set_reply_channel(ChatChannel::Whisper, 0);
    }

    /// Channel for the next tell
    ///
    /// A marker channel holds while at least a second of it remains;
    /// addon requests are answered in party chat.
    pub fn reply_channel(&self, now: Millis) -> ChatChannel {
        if self.reply_channel_until >= now + 1_000 {
            match self.reply_channel {
                ChatChannel::Addon => ChatChannel::Party,
                channel => channel,
            }
        } else {
            ChatChannel::Whisper
        }
    }
}
