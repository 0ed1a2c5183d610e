use serde::Serialize;

/// Read-only view of the simulator handed to display sinks after each change.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GuiData {
    pub is_active: bool,
    pub algorithm: String,
    pub hash_rate: f64,
    pub power_usage: f64,
    pub active_workers: usize,
    pub earnings_today: f64,
    pub total_balance: f64,
    pub ticks: u64,
    pub workers: Vec<WorkerData>,
    pub history: Vec<f64>,
}

/// Per-worker readings. Both figures read zero while mining is stopped.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WorkerData {
    pub name: String,
    pub gpu: String,
    pub hash_rate: f64,
    pub temperature: f64,
}
