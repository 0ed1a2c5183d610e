use crate::hash_rate::HashRateHistory;

/// Aggregate simulator state. Earnings and balance only ever grow; stopping
/// clears the live figures but leaves them and the history alone.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub active: bool,
    /// MH/s
    pub hash_rate: f64,
    /// Watts, always a whole number.
    pub power_usage: f64,
    pub active_workers: usize,
    pub earnings_today: f64,
    pub total_balance: f64,
    pub history: HashRateHistory,
    /// Ticks applied since the simulator was created.
    pub ticks: u64,
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            active: false,
            hash_rate: 0.0,
            power_usage: 0.0,
            active_workers: 0,
            earnings_today: 0.0,
            total_balance: 0.0,
            history: HashRateHistory::new(),
            ticks: 0,
        }
    }

    /// Zeroes the live figures on the way to Stopped.
    pub fn clear_live_figures(&mut self) {
        self.hash_rate = 0.0;
        self.power_usage = 0.0;
        self.active_workers = 0;
    }
}
