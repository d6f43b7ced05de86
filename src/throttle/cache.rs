//! Per-agent allowance cache

use crate::core::types::{ActorId, Millis};
use crate::throttle::admission::{admit, AdmissionContext, AdmissionReason, Verdict};
use crate::throttle::scaling::rotation_seed;
use crate::throttle::ActivityCategory;

#[derive(Debug, Clone, Copy, Default)]
struct CachedAllowance {
    allowed: bool,
    reason: Option<AdmissionReason>,
    checked_at: Option<Millis>,
}

/// Throttle state owned by one agent
///
/// Each category keeps its last decision for the configured recheck
/// interval. A category that has never been evaluated is computed on first
/// use.
#[derive(Debug, Clone)]
pub struct ActivityThrottle {
    seed: u64,
    initializing: bool,
    cache: [CachedAllowance; ActivityCategory::COUNT],
}

impl ActivityThrottle {
    pub fn new(agent: ActorId) -> Self {
        Self {
            seed: rotation_seed(agent),
            initializing: true,
            cache: [CachedAllowance::default(); ActivityCategory::COUNT],
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Cached decision for `category`, recomputed when stale or when `force` is set
    pub fn is_allowed(
        &mut self,
        category: ActivityCategory,
        ctx: &AdmissionContext<'_>,
        force: bool,
    ) -> bool {
        let interval = ctx.config.recheck_interval_ms;
        let entry = self.cache[category.index()];
        if !force {
            if let Some(checked_at) = entry.checked_at {
                if ctx.now < checked_at + interval {
                    return entry.allowed;
                }
            }
        }

        let verdict = self.evaluate(category, ctx);
        if entry.checked_at.is_some() && entry.allowed != verdict.allowed {
            tracing::debug!(
                agent = %ctx.agent,
                %category,
                allowed = verdict.allowed,
                reason = %verdict.reason,
                "Activity allowance changed"
            );
        }
        self.cache[category.index()] = CachedAllowance {
            allowed: verdict.allowed,
            reason: Some(verdict.reason),
            checked_at: Some(ctx.now),
        };
        verdict.allowed
    }

    /// Run the admission rules without touching the cache
    pub fn evaluate(&mut self, category: ActivityCategory, ctx: &AdmissionContext<'_>) -> Verdict {
        admit(category, ctx, self.seed, &mut self.initializing)
    }

    /// Last computed decision, if the category was ever evaluated
    pub fn cached(&self, category: ActivityCategory) -> Option<bool> {
        let entry = self.cache[category.index()];
        entry.checked_at.map(|_| entry.allowed)
    }

    pub fn cached_reason(&self, category: ActivityCategory) -> Option<AdmissionReason> {
        self.cache[category.index()].reason
    }

    /// One line per evaluated category, used by `debug throttle`
    pub fn summary(&self) -> String {
        ActivityCategory::ALL
            .iter()
            .filter_map(|category| {
                let entry = self.cache[category.index()];
                entry.reason.map(|reason| {
                    format!(
                        "{}={} ({})",
                        category,
                        if entry.allowed { "full" } else { "minimal" },
                        reason
                    )
                })
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
