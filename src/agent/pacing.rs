//! React-delay pacing between decision passes

use crate::core::config::PacingConfig;
use crate::core::types::Millis;
use rand::Rng;

/// Situation the react delay depends on
#[derive(Debug, Clone, Copy, Default)]
pub struct PaceInputs {
    pub human_controller: bool,
    pub in_battleground: bool,
    /// In conflict by world facts or by life-cycle state
    pub in_conflict: bool,
    pub resting: bool,
}

/// Countdown until the agent is next allowed to think
#[derive(Debug, Clone, Default)]
pub struct Pacing {
    next_check_ms: Millis,
}

impl Pacing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn countdown(&mut self, elapsed: Millis) {
        self.next_check_ms = self.next_check_ms.saturating_sub(elapsed);
    }

    pub fn is_ready(&self) -> bool {
        self.next_check_ms == 0
    }

    pub fn remaining(&self) -> Millis {
        self.next_check_ms
    }

    pub fn set(&mut self, delay: Millis) {
        self.next_check_ms = delay;
    }

    /// Wait at least `delay`; a longer pending wait is kept
    pub fn yield_for(&mut self, delay: Millis) {
        self.next_check_ms = self.next_check_ms.max(delay);
    }

    pub fn increase(&mut self, delay: Millis) {
        self.next_check_ms += delay;
    }
}

fn scaled(base: Millis, factor: f64) -> Millis {
    (base as f64 * factor) as Millis
}

/// How long to wait before the next decision pass
pub fn react_delay(config: &PacingConfig, inputs: PaceInputs, rng: &mut impl Rng) -> Millis {
    let base = config.react_delay_ms;
    if inputs.human_controller {
        return base;
    }

    if !config.dynamic_react_delay {
        if config.fast_react_in_battleground && inputs.in_battleground {
            return base;
        }
        return if inputs.in_conflict {
            scaled(base, 2.5)
        } else {
            base * 10
        };
    }

    if inputs.in_battleground {
        let fast = config.fast_react_in_battleground;
        return match (inputs.in_conflict, fast) {
            (true, true) => scaled(base, 2.5),
            (true, false) => base * 5,
            (false, true) => base,
            (false, false) => base * 10,
        };
    }

    if inputs.in_conflict {
        base * 5
    } else if !inputs.resting {
        base * rng.gen_range(10..=30u64)
    } else {
        base * rng.gen_range(20..=200u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_countdown_and_yield() {
        let mut pacing = Pacing::new();
        assert!(pacing.is_ready());

        pacing.set(500);
        pacing.yield_for(100);
        assert_eq!(pacing.remaining(), 500);
        pacing.yield_for(800);
        assert_eq!(pacing.remaining(), 800);

        pacing.countdown(300);
        assert_eq!(pacing.remaining(), 500);
        pacing.countdown(10_000);
        assert!(pacing.is_ready());

        pacing.increase(250);
        assert_eq!(pacing.remaining(), 250);
    }

    #[test]
    fn test_human_controller_reacts_at_base() {
        let config = PacingConfig::default();
        let inputs = PaceInputs {
            human_controller: true,
            ..PaceInputs::default()
        };
        assert_eq!(react_delay(&config, inputs, &mut rng()), config.react_delay_ms);
    }

    #[test]
    fn test_static_delays() {
        let config = PacingConfig {
            dynamic_react_delay: false,
            ..PacingConfig::default()
        };
        let calm = PaceInputs::default();
        let fighting = PaceInputs {
            in_conflict: true,
            ..calm
        };
        assert_eq!(react_delay(&config, calm, &mut rng()), 1_000);
        assert_eq!(react_delay(&config, fighting, &mut rng()), 250);
    }

    #[test]
    fn test_dynamic_delays_stay_in_band() {
        let config = PacingConfig::default();
        let mut rng = rng();

        let fighting = PaceInputs {
            in_conflict: true,
            ..PaceInputs::default()
        };
        assert_eq!(react_delay(&config, fighting, &mut rng), 500);

        let bg = PaceInputs {
            in_battleground: true,
            ..PaceInputs::default()
        };
        assert_eq!(react_delay(&config, bg, &mut rng), 100);

        for _ in 0..50 {
            let awake = react_delay(&config, PaceInputs::default(), &mut rng);
            assert!((1_000..=3_000).contains(&awake));

            let resting = PaceInputs {
                resting: true,
                ..PaceInputs::default()
            };
            let rested = react_delay(&config, resting, &mut rng);
            assert!((2_000..=20_000).contains(&rested));
        }
    }
}
