//! Static message-type to trigger-name table

use crate::events::opcode::{MessageDirection, Opcode};
use ahash::AHashMap;

/// Maps (direction, opcode) to the trigger strategies listen for
///
/// Built once at startup and shared read-only by every agent.
#[derive(Debug, Clone, Default)]
pub struct ClassifierTable {
    routes: AHashMap<(MessageDirection, Opcode), String>,
}

impl ClassifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock routes for every message type the engine understands
    pub fn standard() -> Self {
        use MessageDirection::{FromController, ToAgent, ToController};

        let mut table = Self::new();

        table.route(FromController, Opcode::UseObject, "use game object");
        table.route(FromController, Opcode::AreaTrigger, "area trigger");
        table.route(FromController, Opcode::GossipHello, "gossip hello");
        table.route(FromController, Opcode::QuestGiverHello, "gossip hello");
        table.route(FromController, Opcode::ActivateTaxi, "activate taxi");
        table.route(FromController, Opcode::ActivateTaxiExpress, "activate taxi");
        table.route(FromController, Opcode::TaxiClearAllNodes, "taxi done");
        table.route(FromController, Opcode::TaxiClearNode, "taxi done");
        table.route(FromController, Opcode::GroupUninvite, "uninvite");
        table.route(FromController, Opcode::GroupUninviteGuid, "uninvite guid");
        table.route(FromController, Opcode::LfgTeleport, "lfg teleport");
        table.route(FromController, Opcode::CastSpell, "see spell");
        table.route(FromController, Opcode::ReleaseSpirit, "release spirit");
        table.route(FromController, Opcode::ReclaimCorpse, "revive from corpse");
        table.route(FromController, Opcode::CompleteQuest, "complete quest");
        table.route(FromController, Opcode::AcceptQuest, "accept quest");
        table.route(FromController, Opcode::ConfirmQuest, "confirm quest");
        table.route(FromController, Opcode::PushQuestToParty, "quest share");

        table.route(ToAgent, Opcode::PetitionOffer, "petition offer");
        table.route(ToAgent, Opcode::GroupInvite, "group invite");
        table.route(ToAgent, Opcode::GuildInvite, "guild invite");
        table.route(ToAgent, Opcode::NotEnoughMoney, "not enough money");
        table.route(ToAgent, Opcode::NotEnoughReputation, "not enough reputation");
        table.route(ToAgent, Opcode::GroupSetLeader, "group set leader");
        table.route(ToAgent, Opcode::SpeedChange, "check mount state");
        table.route(ToAgent, Opcode::ResurrectRequest, "resurrect request");
        table.route(ToAgent, Opcode::InventoryChangeFailure, "inventory change failure");
        table.route(ToAgent, Opcode::TradeStatus, "trade status");
        table.route(ToAgent, Opcode::TradeStatusExtended, "trade status extended");
        table.route(ToAgent, Opcode::LootResponse, "loot response");
        table.route(ToAgent, Opcode::ItemPushResult, "item push result");
        table.route(ToAgent, Opcode::PartyCommandResult, "party command");
        table.route(ToAgent, Opcode::LevelUp, "levelup");
        table.route(ToAgent, Opcode::XpGain, "xpgain");
        table.route(ToAgent, Opcode::CastFailed, "cast failed");
        table.route(ToAgent, Opcode::DuelRequested, "duel requested");
        table.route(ToAgent, Opcode::BattlefieldStatus, "bg status");
        table.route(ToAgent, Opcode::LfgRoleCheck, "lfg role check");
        table.route(ToAgent, Opcode::LfgProposal, "lfg proposal");
        table.route(ToAgent, Opcode::TextEmote, "receive text emote");
        table.route(ToAgent, Opcode::Emote, "receive emote");
        table.route(ToAgent, Opcode::LootStartRoll, "master loot roll");
        table.route(ToAgent, Opcode::ArenaTeamInvite, "arena team invite");
        table.route(ToAgent, Opcode::GroupDestroyed, "group destroyed");
        table.route(ToAgent, Opcode::GroupList, "group list");
        table.route(ToAgent, Opcode::QuestUpdateComplete, "quest update complete");
        table.route(ToAgent, Opcode::QuestUpdateAddKill, "quest update add kill");
        table.route(ToAgent, Opcode::QuestConfirmAccept, "confirm quest");

        table.route(ToController, Opcode::PartyCommandResult, "party command");
        table.route(ToController, Opcode::ReadyCheck, "ready check");
        table.route(ToController, Opcode::ReadyCheckFinished, "ready check finished");
        table.route(ToController, Opcode::QuestOfferReward, "questgiver quest details");

        table
    }

    pub fn route(&mut self, direction: MessageDirection, opcode: Opcode, trigger: impl Into<String>) {
        self.routes.insert((direction, opcode), trigger.into());
    }

    /// Trigger name for a message, or `None` when it should be dropped
    pub fn classify(&self, direction: MessageDirection, opcode: Opcode) -> Option<&str> {
        self.routes.get(&(direction, opcode)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
