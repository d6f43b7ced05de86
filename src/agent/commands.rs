//! Command submission and draining

use crate::action::{ActionRequest, Event};
use crate::agent::feedback::Feedback;
use crate::agent::Agent;
use crate::command::parser::{reply_channel_marker, transport_prefix};
use crate::command::{
    action_candidates, directive, split_commands, ChatChannel, ContentFilter, Directive, Issuer,
    Language, QueuedCommand, SecurityLevel,
};
use crate::core::types::Millis;
use std::sync::Arc;

impl Agent {
    fn is_unsecured(&self, text: &str) -> bool {
        self.services
            .config
            .commands
            .unsecured_commands
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()))
    }

    /// Accept a line of command text from `issuer`
    ///
    /// Built-in verbs run immediately, `debug` answers at once, and
    /// everything else is queued for the next drain. Text that fails
    /// authorization or is addressed to someone else is dropped.
    pub fn submit_command(
        &mut self,
        text: &str,
        issuer: &Issuer,
        channel: ChatChannel,
        language: Language,
        now: Millis,
    ) {
        self.accept_command(text, issuer, channel, language, now, true);
    }

    /// `split` is false for separator pieces, which are never split again
    fn accept_command(
        &mut self,
        text: &str,
        issuer: &Issuer,
        channel: ChatChannel,
        language: Language,
        now: Millis,
        split: bool,
    ) {
        self.clock = now;
        let config = Arc::clone(&self.services.config);
        let commands = &config.commands;

        if !self.is_unsecured(text) && !issuer.cleared_for(SecurityLevel::Invite) {
            tracing::debug!(agent = %self.id, issuer = %issuer.name, "Command rejected: clearance");
            return;
        }

        if channel == ChatChannel::Addon {
            return;
        }

        let text = match transport_prefix(text) {
            Ok((remaining, _)) => remaining,
            Err(_) if language == Language::Addon => return,
            Err(_) => text,
        };

        if channel == ChatChannel::System {
            return;
        }

        let separator = commands.separator.as_str();
        if split && !separator.is_empty() && text.contains(separator) {
            for piece in split_commands(text, separator) {
                self.accept_command(piece, issuer, channel, Language::Universal, now, false);
            }
            return;
        }

        let mut text = text;
        if !commands.prefix.is_empty() {
            match text.strip_prefix(commands.prefix.as_str()) {
                Some(remaining) => text = remaining,
                None => return,
            }
        }

        match reply_channel_marker(text) {
            Ok((remaining, marker)) => {
                self.outbox
                    .set_reply_channel(marker, now + commands.reply_channel_ttl_ms);
                text = remaining;
            }
            Err(_) => self.outbox.reset_reply_channel(),
        }

        let Some(filtered) = self.services.filter.filter(text, &self.profile) else {
            tracing::debug!(agent = %self.id, text, "Command addressed elsewhere");
            return;
        };
        let filtered = filtered.trim();
        if filtered.is_empty() {
            return;
        }

        let parsed = directive(filtered);
        if let Directive::Debug(what) = parsed {
            let response = self.debug_response(what.trim());
            self.outbox.push(Feedback::Introspection {
                to: issuer.id,
                text: response,
            });
            return;
        }

        if !self.is_unsecured(filtered) && !issuer.cleared_for(SecurityLevel::AllowAll) {
            tracing::debug!(agent = %self.id, issuer = %issuer.name, "Command rejected: clearance");
            return;
        }

        if channel == ChatChannel::RaidWarning
            && filtered.contains(self.name.as_str())
            && !filtered.contains("award")
        {
            self.enqueue("warning", issuer, channel, now);
            return;
        }

        match parsed {
            Directive::Do(action) => {
                let event = Event::new("do").with_owner(issuer.id);
                self.do_specific_action(action.trim(), None, Some(event), false);
            }
            Directive::Queue(remaining) if channel != ChatChannel::Whisper => {
                let index = self.queue_index();
                let not_before = now + index * commands.queue_stagger_ms;
                tracing::debug!(agent = %self.id, command = remaining, index, "Command staggered");
                self.enqueue(remaining.trim(), issuer, channel, not_before);
            }
            Directive::Reset => self.reset(true),
            Directive::Logout => {
                if !self.logging_out {
                    if channel == ChatChannel::Whisper {
                        self.tell_issuer(issuer, "I'm logging out!");
                    }
                    self.logging_out = true;
                    tracing::info!(agent = %self.id, "Logging out");
                }
            }
            Directive::LogoutCancel => {
                if self.logging_out {
                    if channel == ChatChannel::Whisper {
                        self.tell_issuer(issuer, "Logout cancelled!");
                    }
                    self.logging_out = false;
                    tracing::info!(agent = %self.id, "Logout cancelled");
                }
            }
            _ => self.enqueue(filtered, issuer, channel, now),
        }
    }

    fn enqueue(&mut self, text: &str, issuer: &Issuer, channel: ChatChannel, not_before: Millis) {
        self.commands.push(QueuedCommand {
            text: text.to_string(),
            issuer: issuer.clone(),
            channel,
            not_before,
        });
    }

    fn tell_issuer(&mut self, issuer: &Issuer, text: &str) {
        self.outbox.push(Feedback::Tell {
            channel: ChatChannel::Whisper,
            to: issuer.id,
            text: text.to_string(),
        });
    }

    /// 1-based position among group members that are not the controller
    fn queue_index(&self) -> u64 {
        let mut index = 1;
        let Some(group) = self.facts.group.as_ref() else {
            return index;
        };
        let controller = self.controller.as_ref().map(|c| c.id);
        for member in &group.members {
            if Some(member.id) == controller {
                continue;
            }
            if member.id == self.id {
                break;
            }
            index += 1;
        }
        index
    }

    /// Execute every due command once, in submission order
    pub(super) fn handle_commands(&mut self, now: Millis) {
        for command in self.commands.take_due(now) {
            if !self.execute_command(&command) {
                tracing::debug!(
                    agent = %self.id,
                    command = %command.text,
                    channel = %command.channel,
                    "Unknown command dropped"
                );
            }
        }
    }

    /// Try the whole text, then shorter names with the rest as qualifier
    fn execute_command(&mut self, command: &QueuedCommand) -> bool {
        let event = Event::new("chat command")
            .with_param(command.text.as_str())
            .with_owner(command.issuer.id);

        for (name, qualifier) in action_candidates(&command.text) {
            let mut request = ActionRequest::new(name).with_event(event.clone());
            if let Some(qualifier) = qualifier {
                request = request.with_qualifier(qualifier);
            }
            let result = self.execute_anywhere(&request);
            if result.is_recognized() {
                self.report_action(name, result, false);
                return true;
            }
        }
        false
    }
}
