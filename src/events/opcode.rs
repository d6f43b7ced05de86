//! World message vocabulary

use crate::command::{ChatChannel, Language};
use crate::core::types::ActorId;
use serde::{Deserialize, Serialize};

/// Which way a message travels relative to the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageDirection {
    /// Sent by the world to the agent
    ToAgent,
    /// Sent by the agent's controller to the world
    FromController,
    /// Sent by the world to the agent's controller
    ToController,
}

/// Message types the agent knows about
///
/// Anything else arrives as `Other` and is dropped at classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // world -> agent
    PetitionOffer,
    GroupInvite,
    GuildInvite,
    NotEnoughMoney,
    NotEnoughReputation,
    GroupSetLeader,
    SpeedChange,
    ResurrectRequest,
    InventoryChangeFailure,
    TradeStatus,
    TradeStatusExtended,
    LootResponse,
    ItemPushResult,
    PartyCommandResult,
    LevelUp,
    XpGain,
    CastFailed,
    DuelRequested,
    BattlefieldStatus,
    LfgRoleCheck,
    LfgProposal,
    TextEmote,
    Emote,
    LootStartRoll,
    ArenaTeamInvite,
    GroupDestroyed,
    GroupList,
    QuestUpdateComplete,
    QuestUpdateAddKill,
    QuestConfirmAccept,
    // world -> controller
    ReadyCheck,
    ReadyCheckFinished,
    QuestOfferReward,
    // controller -> world
    UseObject,
    AreaTrigger,
    GossipHello,
    QuestGiverHello,
    ActivateTaxi,
    ActivateTaxiExpress,
    TaxiClearAllNodes,
    TaxiClearNode,
    GroupUninvite,
    GroupUninviteGuid,
    LfgTeleport,
    CastSpell,
    ReleaseSpirit,
    ReclaimCorpse,
    CompleteQuest,
    AcceptQuest,
    ConfirmQuest,
    PushQuestToParty,
    // handled inline before classification
    SpellFailure,
    SpellDelayed,
    Chat,
    Knockback,
    Other(u16),
}

/// A raw message with an opaque payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldMessage {
    pub opcode: Opcode,
    pub source: Option<ActorId>,
    pub payload: serde_json::Value,
}

impl WorldMessage {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            source: None,
            payload: serde_json::Value::Null,
        }
    }

    pub fn from(mut self, source: ActorId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(|v| v.as_str())
    }

    pub fn field_f64(&self, key: &str) -> Option<f64> {
        self.payload.get(key).and_then(|v| v.as_f64())
    }

    pub fn field_u64(&self, key: &str) -> Option<u64> {
        self.payload.get(key).and_then(|v| v.as_u64())
    }

    pub fn field_bool(&self, key: &str) -> bool {
        self.payload
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    pub fn field_actor(&self, key: &str) -> Option<ActorId> {
        self.payload
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Payload carried by `Opcode::Chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub channel: ChatChannel,
    /// Name of the public channel, for `ChatChannel::Channel`
    #[serde(default)]
    pub channel_name: Option<String>,
    pub sender: ActorId,
    pub sender_name: String,
    #[serde(default)]
    pub sender_is_agent: bool,
    #[serde(default)]
    pub language: Language,
    pub text: String,
}

impl ChatPayload {
    pub fn into_message(self) -> WorldMessage {
        let source = self.sender;
        let payload = serde_json::to_value(&self).unwrap_or(serde_json::Value::Null);
        WorldMessage::new(Opcode::Chat).from(source).with_payload(payload)
    }
}
