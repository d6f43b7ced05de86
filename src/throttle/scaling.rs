//! Lag-driven scaling and the per-agent rotation number

use crate::core::types::{ActorId, Millis};
use ahash::RandomState;

/// Fixed keys so a rotation seed does not change for the life of the process
///
/// ahash output may differ between targets and crate versions, so seeds are
/// not comparable across hosts.
const ROTATION_KEYS: [u64; 4] = [
    0x5851_f42d_4c95_7f2d,
    0x1405_7b7e_f767_814f,
    0x9e37_79b9_7f4a_7c15,
    0x2545_f491_4f6c_dd1d,
];

/// Scale an activity percentage down as host update time grows
///
/// At or below `floor_ms` the percentage is unchanged; above `ceiling_ms`
/// it is zero; in between it falls linearly. When the ceiling is not above
/// the floor the decision is binary.
pub fn auto_scale(percent: u32, max_update_ms: u32, floor_ms: u32, ceiling_ms: u32) -> u32 {
    if ceiling_ms <= floor_ms {
        return if max_update_ms > ceiling_ms { 0 } else { percent };
    }

    if max_update_ms > ceiling_ms {
        return 0;
    }

    if max_update_ms <= floor_ms {
        return percent;
    }

    let lag_progress = (max_update_ms - floor_ms) as f64 / (ceiling_ms - floor_ms) as f64;
    (percent as f64 * (1.0 - lag_progress)) as u32
}

/// Stable per-agent seed for [`rotation_number`]
pub fn rotation_seed(agent: ActorId) -> u64 {
    let [k0, k1, k2, k3] = ROTATION_KEYS;
    RandomState::with_seeds(k0, k1, k2, k3).hash_one(agent)
}

/// Number in `0..=max` that is fixed per agent and advances slowly with time
///
/// It moves up by one `cycles_per_minute` times a minute, wrapping at
/// `max`, so membership of a `number <= threshold` subset rotates gradually
/// instead of reshuffling.
pub fn rotation_number(seed: u64, max: u32, cycles_per_minute: f64, now: Millis) -> u32 {
    let mut number = seed;
    if cycles_per_minute > 0.0 {
        let seconds = now / 1000;
        let cycle = (seconds as f64 * cycles_per_minute / 60.0) as u64;
        number = number.wrapping_add(cycle);
    }
    (number % (max as u64 + 1)) as u32
}
