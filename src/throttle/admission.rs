//! Ordered admission rules deciding full versus minimal activity

use crate::core::config::ThrottleConfig;
use crate::core::types::{ActorId, Millis};
use crate::throttle::scaling::{auto_scale, rotation_number};
use crate::throttle::{ActivityCategory, LoadGauge};
use crate::world::{WorldFacts, WorldView};
use derive_more::Display;
use serde::Serialize;

/// Which rule produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdmissionReason {
    #[display(fmt = "always active")]
    AlwaysActive,
    #[display(fmt = "in conflict")]
    InConflict,
    #[display(fmt = "initializing")]
    Initializing,
    #[display(fmt = "network")]
    Network,
    #[display(fmt = "instance")]
    Instance,
    #[display(fmt = "human on map")]
    HumanOnMap,
    #[display(fmt = "human in zone")]
    HumanInZone,
    #[display(fmt = "real guild")]
    RealGuild,
    #[display(fmt = "human nearby")]
    HumanNearby,
    #[display(fmt = "human controller")]
    HumanController,
    #[display(fmt = "grouped with human")]
    GroupedWithHuman,
    #[display(fmt = "leader throttled")]
    LeaderThrottled,
    #[display(fmt = "queued")]
    Queued,
    #[display(fmt = "friend")]
    Friend,
    #[display(fmt = "crowded")]
    Crowded,
    #[display(fmt = "detailed move")]
    DetailedMove,
    #[display(fmt = "disabled")]
    Disabled,
    #[display(fmt = "scaled to zero")]
    ScaledToZero,
    #[display(fmt = "rotation {}/{}", number, threshold)]
    Rotation { number: u32, threshold: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub allowed: bool,
    pub reason: AdmissionReason,
}

impl Verdict {
    fn allow(reason: AdmissionReason) -> Self {
        Self { allowed: true, reason }
    }

    fn deny(reason: AdmissionReason) -> Self {
        Self { allowed: false, reason }
    }
}

/// Everything one admission decision reads
pub struct AdmissionContext<'a> {
    pub agent: ActorId,
    pub level: u32,
    pub has_human_controller: bool,
    pub facts: &'a WorldFacts,
    pub config: &'a ThrottleConfig,
    pub world: &'a dyn WorldView,
    pub gauge: &'a LoadGauge,
    pub now: Millis,
}

/// Evaluate the admission rules in order; the first match decides
///
/// `initializing` is the agent's startup latch. It is re-evaluated against
/// host uptime until the grace window has passed and then stays cleared.
pub fn admit(
    category: ActivityCategory,
    ctx: &AdmissionContext<'_>,
    seed: u64,
    initializing: &mut bool,
) -> Verdict {
    let config = ctx.config;
    let facts = ctx.facts;

    if config.active_alone_percent >= 100 && !config.smart_scale {
        return Verdict::allow(AdmissionReason::AlwaysActive);
    }

    if !category.exempt_from_conflict() && facts.in_conflict {
        return Verdict::allow(AdmissionReason::InConflict);
    }

    if *initializing {
        *initializing = ctx.gauge.uptime_ms() < config.init_grace_ms();
        if *initializing {
            return Verdict::deny(AdmissionReason::Initializing);
        }
    }

    if category == ActivityCategory::Network {
        return Verdict::allow(AdmissionReason::Network);
    }

    if !facts.open_world {
        return Verdict::allow(AdmissionReason::Instance);
    }

    if let Some(verdict) = forced_by_company(ctx) {
        return verdict;
    }

    if facts.queued_for_group_content || facts.group.as_ref().is_some_and(|g| g.matchmade) {
        return Verdict::allow(AdmissionReason::Queued);
    }

    if config.force_when_friend && ctx.world.befriended_by_online_human(ctx.agent) {
        return Verdict::allow(AdmissionReason::Friend);
    }

    if category.spreads_agents()
        && ctx.world.humans_within(&facts.position, config.spread_radius)
            >= config.spread_density_threshold
    {
        return Verdict::allow(AdmissionReason::Crowded);
    }

    if category == ActivityCategory::DetailedMove {
        return Verdict::deny(AdmissionReason::DetailedMove);
    }

    rotation_share(ctx, seed)
}

/// Rule 6: humans on the map, in the zone, in the guild, nearby, directing
/// the agent, or in its group
fn forced_by_company(ctx: &AdmissionContext<'_>) -> Option<Verdict> {
    let config = ctx.config;
    let facts = ctx.facts;
    let position = &facts.position;

    if config.force_when_in_map && ctx.world.map_has_human(position.map) {
        return Some(Verdict::allow(AdmissionReason::HumanOnMap));
    }

    if config.force_when_in_zone && ctx.world.zone_has_human(position.map, position.zone) {
        return Some(Verdict::allow(AdmissionReason::HumanInZone));
    }

    if config.force_when_in_guild && facts.in_real_guild {
        return Some(Verdict::allow(AdmissionReason::RealGuild));
    }

    if ctx.world.human_within(position, config.force_radius) {
        return Some(Verdict::allow(AdmissionReason::HumanNearby));
    }

    if ctx.has_human_controller {
        return Some(Verdict::allow(AdmissionReason::HumanController));
    }

    let group = facts.group.as_ref()?;
    for member in &group.members {
        if !member.in_world && member.map != position.map {
            continue;
        }
        if member.id == ctx.agent {
            continue;
        }
        if member.kind.counts_as_human() {
            return Some(Verdict::allow(AdmissionReason::GroupedWithHuman));
        }
        if member.id == group.leader
            && ctx.world.cached_allowance(member.id, ActivityCategory::Party) == Some(false)
        {
            return Some(Verdict::deny(AdmissionReason::LeaderThrottled));
        }
    }
    None
}

/// Rule 11: a lag-scaled share of agents, picked by rotation number
fn rotation_share(ctx: &AdmissionContext<'_>, seed: u64) -> Verdict {
    let config = ctx.config;
    let percent = config.active_alone_percent;
    if percent == 0 {
        return Verdict::deny(AdmissionReason::Disabled);
    }

    let mut scaled = percent.min(100);
    if config.smart_scale
        && ctx.level >= config.smart_scale_min_level
        && ctx.level <= config.smart_scale_max_level
    {
        scaled = auto_scale(
            scaled,
            ctx.gauge.max_update_time_ms(),
            config.smart_scale_floor_ms,
            config.smart_scale_ceiling_ms,
        );
    }

    let threshold = percent * scaled / 100;
    if threshold == 0 {
        return Verdict::deny(AdmissionReason::ScaledToZero);
    }

    let cycles_per_minute = percent as f64 * scaled as f64 / 100.0 * config.rotation_rate;
    let number = rotation_number(seed, 100, cycles_per_minute, ctx.now);
    let reason = AdmissionReason::Rotation { number, threshold };
    if number <= threshold {
        Verdict::allow(reason)
    } else {
        Verdict::deny(reason)
    }
}
