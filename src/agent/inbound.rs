//! World messages in, classified triggers and chat replies out

use crate::action::Event;
use crate::agent::feedback::Feedback;
use crate::agent::{Agent, LifeCycleState};
use crate::command::{ChatChannel, Language};
use crate::core::types::Millis;
use crate::events::{ChatPayload, MessageDirection, Opcode, QueuedReply, TriggerQueue, WorldMessage};
use crate::strategy::ActionContext;
use crate::throttle::ActivityCategory;
use rand::Rng;

/// Knockbacks launching the agent harder than this are left alone
const MAX_HANDLED_KNOCKBACK: f64 = 35.0;

/// Longest cast pushback that still postpones the next decision pass
const MAX_SPELL_DELAY_MS: u64 = 1_000;

impl Agent {
    fn queue_for(&mut self, direction: MessageDirection) -> &mut TriggerQueue {
        match direction {
            MessageDirection::ToAgent => &mut self.to_agent,
            MessageDirection::FromController => &mut self.from_controller,
            MessageDirection::ToController => &mut self.to_controller,
        }
    }

    /// Take one raw message
    ///
    /// A few message types get an immediate reaction here; the rest are
    /// classified and queued for the next tick, or dropped when the table
    /// has no trigger for them.
    pub fn receive(&mut self, direction: MessageDirection, message: WorldMessage, now: Millis) {
        self.clock = now;

        if direction == MessageDirection::ToAgent {
            match message.opcode {
                Opcode::SpellFailure => {
                    if message.field_actor("caster") == Some(self.id) {
                        let spell = message.field_u64("spell").and_then(|s| u32::try_from(s).ok());
                        if let Some(spell) = spell {
                            if self.memory.interrupt_spell(spell) {
                                tracing::debug!(agent = %self.id, spell, "Cast interrupted");
                            }
                        }
                    }
                    return;
                }
                Opcode::SpellDelayed => {
                    if message.field_actor("caster") == Some(self.id) {
                        let delay = message.field_u64("delay").unwrap_or(0);
                        if delay <= MAX_SPELL_DELAY_MS {
                            self.pacing.increase(delay);
                        }
                    }
                    return;
                }
                Opcode::Knockback => {
                    let vertical = -message.field_f64("vertical_speed").unwrap_or(0.0);
                    if vertical > MAX_HANDLED_KNOCKBACK {
                        return;
                    }
                    self.memory.interrupt();
                    self.memory.stop_movement();
                    tracing::debug!(agent = %self.id, "Knocked back");
                    return;
                }
                Opcode::Chat => {
                    self.consider_chat(&message, now);
                    return;
                }
                Opcode::Emote | Opcode::TextEmote if !message.field_bool("from_player") => {
                    return;
                }
                _ => {}
            }
        }

        let Some(trigger) = self
            .services
            .classifier
            .classify(direction, message.opcode)
            .map(str::to_string)
        else {
            tracing::trace!(agent = %self.id, opcode = ?message.opcode, "Unclassified message dropped");
            return;
        };
        self.queue_for(direction).push(trigger, message);
    }

    /// Hand every queued trigger to the current engine, oldest first
    pub(super) fn drain_triggers(&mut self) {
        for direction in [
            MessageDirection::ToAgent,
            MessageDirection::FromController,
            MessageDirection::ToController,
        ] {
            let items = self.queue_for(direction).drain();
            for item in items {
                let mut event = Event::new(item.trigger.as_str()).with_payload(item.message.payload);
                if let Some(source) = item.message.source {
                    event = event.with_owner(source);
                }

                let state = self.engines.current_state();
                let mut ctx = ActionContext {
                    agent: self.id,
                    state,
                    now: self.clock,
                    memory: &mut self.memory,
                    facts: &self.facts,
                };
                let handled = self
                    .engines
                    .get_mut(state)
                    .dispatch_trigger(&item.trigger, &event, &mut ctx);
                if handled == 0 {
                    tracing::trace!(agent = %self.id, trigger = %item.trigger, "Trigger ignored");
                }
            }
        }
    }

    /// Maybe schedule a conversational reply to a chat line
    fn consider_chat(&mut self, message: &WorldMessage, now: Millis) {
        if !self.services.config.chat.random_talk
            || self.throttle.cached(ActivityCategory::All) != Some(true)
        {
            return;
        }

        let Ok(chat) = serde_json::from_value::<ChatPayload>(message.payload.clone()) else {
            tracing::debug!(agent = %self.id, "Malformed chat payload");
            return;
        };

        if chat.channel_name.as_deref() == Some("World")
            || chat.sender == self.id
            || chat.language == Language::Addon
        {
            return;
        }
        if chat.sender_is_agent && now < self.memory.chat_paused_until {
            return;
        }

        let mentioned = chat
            .text
            .to_lowercase()
            .contains(&self.name.to_lowercase());

        if self.facts.in_battleground
            && !mentioned
            && (chat.channel == ChatChannel::Channel || chat.sender_is_agent)
        {
            return;
        }
        if let Some(controller) = self.controller.as_ref().filter(|c| c.is_human()) {
            if controller.id != chat.sender {
                return;
            }
        }

        let answer = if chat.sender_is_agent {
            let odds = if mentioned { 31 } else { 21 };
            self.rng.gen_range(0..odds) == 0
        } else {
            mentioned || self.rng.gen_range(0..5) == 0
        };
        if !answer {
            return;
        }

        let in_conflict = self.facts.in_conflict
            || self.engines.current_state() == LifeCycleState::Conflict;
        let delay_secs: u64 = if in_conflict {
            self.rng.gen_range(10..=25)
        } else {
            self.rng.gen_range(5..=15)
        };
        let pause_secs: u64 = self.rng.gen_range(5..=25);

        tracing::debug!(agent = %self.id, to = %chat.sender_name, delay_secs, "Chat reply scheduled");
        self.replies.push(QueuedReply {
            channel: chat.channel,
            channel_name: chat.channel_name,
            to: chat.sender,
            to_name: chat.sender_name,
            prompt: chat.text,
            due: now + delay_secs * 1_000,
        });
        self.memory.chat_paused_until = now + pause_secs * 1_000;
    }

    pub(super) fn emit_due_replies(&mut self, now: Millis) {
        for reply in self.replies.take_due(now) {
            self.outbox.push(Feedback::ChatReply {
                channel: reply.channel,
                channel_name: reply.channel_name,
                to: reply.to,
                to_name: reply.to_name,
                prompt: reply.prompt,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::agent::testing::agent;
    use crate::events::{MessageDirection, Opcode, WorldMessage};
    use serde_json::json;

    #[test]
    fn test_unclassified_messages_are_dropped() {
        let mut agent = agent();
        agent.receive(MessageDirection::ToAgent, WorldMessage::new(Opcode::Other(99)), 0);
        agent.receive(MessageDirection::ToController, WorldMessage::new(Opcode::LevelUp), 0);
        assert_eq!(agent.pending_triggers(MessageDirection::ToAgent), 0);
        assert_eq!(agent.pending_triggers(MessageDirection::ToController), 0);
    }

    #[test]
    fn test_classified_messages_queue_by_direction() {
        let mut agent = agent();
        agent.receive(MessageDirection::ToAgent, WorldMessage::new(Opcode::GroupInvite), 0);
        agent.receive(MessageDirection::ToController, WorldMessage::new(Opcode::ReadyCheck), 0);
        assert_eq!(agent.pending_triggers(MessageDirection::ToAgent), 1);
        assert_eq!(agent.pending_triggers(MessageDirection::ToController), 1);
        assert_eq!(agent.pending_triggers(MessageDirection::FromController), 0);
    }

    #[test]
    fn test_emotes_only_from_players() {
        let mut agent = agent();
        agent.receive(MessageDirection::ToAgent, WorldMessage::new(Opcode::Emote), 0);
        assert_eq!(agent.pending_triggers(MessageDirection::ToAgent), 0);

        let emote = WorldMessage::new(Opcode::Emote).with_payload(json!({ "from_player": true }));
        agent.receive(MessageDirection::ToAgent, emote, 0);
        assert_eq!(agent.pending_triggers(MessageDirection::ToAgent), 1);
    }

    #[test]
    fn test_spell_failure_interrupts_own_cast_only() {
        let mut agent = agent();
        agent.memory_mut().casting = Some(133);

        let other = WorldMessage::new(Opcode::SpellFailure)
            .with_payload(json!({ "caster": crate::core::types::ActorId::from_u128(999), "spell": 133 }));
        agent.receive(MessageDirection::ToAgent, other, 0);
        assert_eq!(agent.memory().casting, Some(133));

        let own = WorldMessage::new(Opcode::SpellFailure)
            .with_payload(json!({ "caster": agent.id(), "spell": 133 }));
        agent.receive(MessageDirection::ToAgent, own, 0);
        assert_eq!(agent.memory().casting, None);
    }

    #[test]
    fn test_spell_failure_with_oversized_id_is_dropped() {
        let mut agent = agent();
        agent.memory_mut().casting = Some(133);

        // Low 32 bits are 133
        let oversized = (1u64 << 32) + 133;
        let failure = WorldMessage::new(Opcode::SpellFailure)
            .with_payload(json!({ "caster": agent.id(), "spell": oversized }));
        agent.receive(MessageDirection::ToAgent, failure, 0);
        assert_eq!(agent.memory().casting, Some(133));
    }

    #[test]
    fn test_spell_delay_pushes_next_check() {
        let mut agent = agent();
        let before = agent.next_check_in();
        let delayed = WorldMessage::new(Opcode::SpellDelayed)
            .with_payload(json!({ "caster": agent.id(), "delay": 500 }));
        agent.receive(MessageDirection::ToAgent, delayed, 0);
        assert_eq!(agent.next_check_in(), before + 500);

        let long = WorldMessage::new(Opcode::SpellDelayed)
            .with_payload(json!({ "caster": agent.id(), "delay": 5_000 }));
        agent.receive(MessageDirection::ToAgent, long, 0);
        assert_eq!(agent.next_check_in(), before + 500);
    }

    #[test]
    fn test_knockback_stops_movement_unless_launched() {
        let mut agent = agent();
        agent.memory_mut().casting = Some(1);
        agent.memory_mut().moving_to = Some(Default::default());

        let launched = WorldMessage::new(Opcode::Knockback).with_payload(json!({ "vertical_speed": -40.0 }));
        agent.receive(MessageDirection::ToAgent, launched, 0);
        assert!(agent.memory().is_moving());

        let shove = WorldMessage::new(Opcode::Knockback).with_payload(json!({ "vertical_speed": -10.0 }));
        agent.receive(MessageDirection::ToAgent, shove, 0);
        assert!(!agent.memory().is_moving());
        assert_eq!(agent.memory().casting, None);
    }
}
