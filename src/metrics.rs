//! Synthetic hash-rate, power and earnings model.
//!
//! Values are illustrative only. Every noise term is drawn from the caller's
//! RNG so a seeded generator replays the same run.

use crate::{state::SimulationState, worker::Worker};
use rand::Rng;

/// Per-worker hash-rate noise bound, MH/s.
pub const HASH_RATE_NOISE: f64 = 5.0;
/// Per-tick temperature drift bound, °C.
pub const TEMPERATURE_DRIFT: f64 = 1.0;
pub const MAX_TEMPERATURE: f64 = 85.0;
/// Watts drawn per MH/s.
pub const WATTS_PER_MHS: f64 = 3.5;
pub const BTC_PER_MHS_PER_DAY: f64 = 0.000_000_15;
/// One tick is one second of accrual, so a day is this many ticks.
pub const TICKS_PER_DAY: f64 = 86_400.0;

/// Recomputes the aggregate rate, power draw and per-worker readings for the
/// given multiplier.
///
/// The aggregate draws its own noise per worker; the per-worker readings use
/// fresh draws, so the aggregate is not the sum of the displayed worker rates.
pub fn update_hash_rates<R: Rng + ?Sized>(
    state: &mut SimulationState,
    workers: &mut [Worker],
    multiplier: f64,
    rng: &mut R,
) {
    state.hash_rate = workers.iter().fold(0.0, |sum, worker| {
        sum + worker.base_hash_rate * multiplier + hash_rate_noise(rng)
    });
    state.power_usage = power_for(state.hash_rate);

    for worker in workers.iter_mut() {
        worker.current_hash_rate = worker.base_hash_rate * multiplier + hash_rate_noise(rng);
        // Only the ceiling is enforced.
        let drift = rng.gen_range(-TEMPERATURE_DRIFT..=TEMPERATURE_DRIFT);
        worker.temperature = (worker.temperature + drift).min(MAX_TEMPERATURE);
    }

    tracing::debug!(
        hash_rate = state.hash_rate,
        power_usage = state.power_usage,
        "hash rates updated"
    );
}

/// Credits one tick's worth of earnings at the current aggregate rate.
pub fn accrue_earnings(state: &mut SimulationState) {
    let earned = earnings_per_tick(state.hash_rate);
    state.earnings_today += earned;
    state.total_balance += earned;
}

pub fn earnings_per_tick(hash_rate: f64) -> f64 {
    (hash_rate * BTC_PER_MHS_PER_DAY) / TICKS_PER_DAY
}

pub fn power_for(hash_rate: f64) -> f64 {
    (hash_rate * WATTS_PER_MHS).round()
}

fn hash_rate_noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-HASH_RATE_NOISE..=HASH_RATE_NOISE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algorithm::Algorithm, worker::nominal_hash_rate};
    use rand::{
        rngs::{mock::StepRng, StdRng},
        SeedableRng,
    };

    const EPSILON: f64 = 1e-9;

    #[test]
    fn aggregate_stays_within_noise_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for algorithm in Algorithm::ALL {
            let mut state = SimulationState::new();
            let mut workers = Worker::roster();
            let m = algorithm.multiplier();
            let nominal = nominal_hash_rate(&workers, m);

            for _ in 0..200 {
                update_hash_rates(&mut state, &mut workers, m, &mut rng);
                assert!(state.hash_rate >= nominal - 15.0 - EPSILON, "{algorithm}: {}", state.hash_rate);
                assert!(state.hash_rate <= nominal + 15.0 + EPSILON, "{algorithm}: {}", state.hash_rate);
                for worker in &workers {
                    let base = worker.base_hash_rate * m;
                    assert!((worker.current_hash_rate - base).abs() <= HASH_RATE_NOISE + EPSILON);
                }
            }
        }
    }

    #[test]
    fn power_is_rounded_proportional_draw() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = SimulationState::new();
        let mut workers = Worker::roster();
        for _ in 0..100 {
            update_hash_rates(&mut state, &mut workers, 0.6, &mut rng);
            assert_eq!(state.power_usage, (state.hash_rate * 3.5).round());
            assert_eq!(state.power_usage.fract(), 0.0);
        }
        assert_eq!(power_for(100.0), 350.0);
        assert_eq!(power_for(100.1), 350.0);
        assert_eq!(power_for(100.2), 351.0);
    }

    #[test]
    fn earnings_accrue_exactly_one_tick_of_reward() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = SimulationState::new();
        let mut workers = Worker::roster();

        for _ in 0..50 {
            update_hash_rates(&mut state, &mut workers, 1.0, &mut rng);
            let before_today = state.earnings_today;
            let before_total = state.total_balance;
            accrue_earnings(&mut state);

            let expected = (state.hash_rate * 0.000_000_15) / 86_400.0;
            assert!(state.earnings_today >= before_today);
            assert!(state.total_balance >= before_total);
            assert!((state.earnings_today - before_today - expected).abs() < 1e-20);
            assert!((state.total_balance - before_total - expected).abs() < 1e-20);
        }
    }

    #[test]
    fn temperature_never_exceeds_ceiling() {
        // Every draw lands at the top of its range: temperatures climb each tick.
        let mut rng = StepRng::new(u64::MAX, 0);
        let mut state = SimulationState::new();
        let mut workers = Worker::roster();
        for _ in 0..100 {
            update_hash_rates(&mut state, &mut workers, 1.0, &mut rng);
            assert!(workers.iter().all(|w| w.temperature <= MAX_TEMPERATURE));
        }
        assert!(workers.iter().all(|w| w.temperature > 84.0));

        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..5_000 {
            update_hash_rates(&mut state, &mut workers, 1.0, &mut rng);
            assert!(workers.iter().all(|w| w.temperature <= MAX_TEMPERATURE));
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = SimulationState::new();
            let mut workers = Worker::roster();
            (0..10)
                .map(|_| {
                    update_hash_rates(&mut state, &mut workers, 0.3, &mut rng);
                    state.hash_rate
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }
}
