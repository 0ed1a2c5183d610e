use crate::{
    algorithm::{self, Algorithm},
    gui_data::{GuiData, WorkerData},
    metrics,
    scheduler::{RepeatingTask, TICK_PERIOD},
    state::SimulationState,
    worker::{nominal_hash_rate, Worker},
};
use rand::Rng;
use std::time::Instant;

/// Owns the whole simulation: state, roster, algorithm selection, the noise
/// source and the tick schedule.
///
/// Everything is mutated through `&mut self`, so one tick is always applied
/// in full before anything else can observe the state.
pub struct Simulator<R> {
    state: SimulationState,
    workers: Vec<Worker>,
    algorithm: Option<Algorithm>,
    rng: R,
    ticker: RepeatingTask,
}

impl<R: Rng> Simulator<R> {
    pub fn new(rng: R, algorithm: Option<Algorithm>) -> Self {
        Self::with_workers(rng, algorithm, Worker::roster())
    }

    pub fn with_workers(rng: R, algorithm: Option<Algorithm>, workers: Vec<Worker>) -> Self {
        Self {
            state: SimulationState::new(),
            workers,
            algorithm,
            rng,
            ticker: RepeatingTask::new(TICK_PERIOD),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    #[cfg(test)]
    pub fn history(&self) -> &crate::hash_rate::HashRateHistory {
        &self.state.history
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    /// Stopped -> Active. Returns `false` without side effects if already active.
    ///
    /// Live figures stay at zero until the first tick lands.
    #[tracing::instrument(skip(self, now))]
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state.active {
            tracing::debug!("start ignored, already active");
            return false;
        }
        self.state.active = true;
        self.state.active_workers = self.workers.len();
        self.ticker.schedule(now);
        tracing::info!(
            workers = self.state.active_workers,
            algorithm = algorithm::label_for(self.algorithm),
            nominal_hash_rate = nominal_hash_rate(&self.workers, algorithm::multiplier_for(self.algorithm)),
            "mining started"
        );
        true
    }

    /// Active -> Stopped. Returns `false` if already stopped.
    #[tracing::instrument(skip(self))]
    pub fn stop(&mut self) -> bool {
        if !self.state.active {
            return false;
        }
        self.ticker.cancel();
        self.state.active = false;
        self.state.clear_live_figures();
        tracing::info!(
            earnings_today = self.state.earnings_today,
            total_balance = self.state.total_balance,
            "mining stopped"
        );
        true
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.state.active {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Changes the algorithm. While active the hash rates are recomputed at
    /// once and the fresh aggregate is charted; earnings are not accrued and
    /// nothing is reset.
    pub fn select_algorithm(&mut self, selection: Option<Algorithm>) {
        self.algorithm = selection;
        tracing::info!(algorithm = algorithm::label_for(selection), "algorithm selected");
        if self.state.active {
            self.refresh_hash_rates();
            self.state.history.record(self.state.hash_rate);
        }
    }

    /// Runs a tick if one is due at `now`. Returns whether it did.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.ticker.poll(now) {
            self.tick();
            true
        } else {
            false
        }
    }

    /// Applies one tick: hash rates, earnings, history. No-op while stopped.
    pub fn tick(&mut self) {
        if !self.state.active {
            return;
        }
        self.refresh_hash_rates();
        metrics::accrue_earnings(&mut self.state);
        self.state.history.record(self.state.hash_rate);
        self.state.ticks += 1;
        tracing::debug!(
            tick = self.state.ticks,
            earnings_today = self.state.earnings_today,
            samples = self.state.history.len(),
            "tick applied"
        );
    }

    pub fn snapshot(&self) -> GuiData {
        let active = self.state.active;
        GuiData {
            is_active: active,
            algorithm: algorithm::label_for(self.algorithm).to_string(),
            hash_rate: self.state.hash_rate,
            power_usage: self.state.power_usage,
            active_workers: self.state.active_workers,
            earnings_today: self.state.earnings_today,
            total_balance: self.state.total_balance,
            ticks: self.state.ticks,
            workers: self
                .workers
                .iter()
                .map(|w| WorkerData {
                    name: w.name.clone(),
                    gpu: w.gpu.clone(),
                    hash_rate: if active { w.current_hash_rate } else { 0.0 },
                    temperature: if active { w.temperature } else { 0.0 },
                })
                .collect(),
            history: self.state.history.to_vec(),
        }
    }

    fn refresh_hash_rates(&mut self) {
        let multiplier = algorithm::multiplier_for(self.algorithm);
        metrics::update_hash_rates(&mut self.state, &mut self.workers, multiplier, &mut self.rng);
    }
}
