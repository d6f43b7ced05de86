//! Talking back to the controller

use crate::agent::feedback::{Cue, Feedback};
use crate::agent::{Agent, LifeCycleState};
use crate::command::SecurityLevel;

impl Agent {
    /// Whether the controller may hear from this agent at `level`
    ///
    /// Autonomous agents outside a group only whisper controllers that
    /// are on the same map and within whisper distance.
    pub fn is_tell_allowed(&self, level: SecurityLevel) -> bool {
        let Some(controller) = self.controller.as_ref() else {
            return false;
        };
        if controller.clearance < level {
            return false;
        }

        let whisper_distance = self.services.config.commands.whisper_distance;
        if whisper_distance > 0.0 && self.facts.group.is_none() && self.profile.autonomous {
            if let Some(position) = controller.position {
                let reachable = position.map == self.facts.position.map
                    && self.facts.position.within(&position, whisper_distance);
                if !reachable {
                    return false;
                }
            }
        }
        true
    }

    /// Tell the controller `text`, facing them when they are close by
    pub fn tell_master(&mut self, text: &str) -> bool {
        self.tell_master_at(text, SecurityLevel::AllowAll)
    }

    pub fn tell_master_at(&mut self, text: &str, level: SecurityLevel) -> bool {
        if !self.tell_master_no_facing(text, level) {
            return false;
        }

        let same_map = self
            .controller
            .as_ref()
            .and_then(|c| c.position)
            .is_some_and(|p| p.map == self.facts.position.map);
        if !self.facts.moving && !self.facts.in_conflict && same_map {
            self.outbox.cue(Cue::Talk);
        }
        true
    }

    pub fn tell_master_no_facing(&mut self, text: &str, level: SecurityLevel) -> bool {
        let commands = &self.services.config.commands;
        let unsupervised = self.controller.as_ref().map_or(true, |c| !c.is_human());
        if unsupervised
            && (commands.say_without_controller
                || self.engines.get(LifeCycleState::Normal).has_strategy("debug"))
        {
            self.outbox.push(Feedback::Say { text: text.to_string() });
            return true;
        }

        if !self.is_tell_allowed(level) {
            return false;
        }
        let Some(to) = self.controller.as_ref().map(|c| c.id) else {
            return false;
        };

        let repeat_delay = commands.repeat_delay_ms;
        if !self.outbox.should_tell(text, self.clock, repeat_delay) {
            return false;
        }

        let channel = self.outbox.reply_channel(self.clock);
        self.outbox.push(Feedback::Tell {
            channel,
            to,
            text: text.to_string(),
        });
        true
    }

    /// Report a failure; only human controllers are told
    pub fn tell_error(&mut self, text: &str) -> bool {
        if !self.is_tell_allowed(SecurityLevel::AllowAll) {
            return false;
        }
        let Some(controller) = self.controller.as_ref().filter(|c| c.is_human()) else {
            return false;
        };
        let to = controller.id;
        self.outbox.push(Feedback::Error {
            to,
            text: text.to_string(),
        });
        true
    }
}
