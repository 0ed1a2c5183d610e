/// A simulated mining rig. Base rate is in MH/s, temperature in °C.
#[derive(Clone, Debug, PartialEq)]
pub struct Worker {
    pub name: String,
    pub gpu: String,
    pub base_hash_rate: f64,
    pub current_hash_rate: f64,
    pub temperature: f64,
}

impl Worker {
    pub fn new(name: impl Into<String>, gpu: impl Into<String>, base_hash_rate: f64, temperature: f64) -> Self {
        Self {
            name: name.into(),
            gpu: gpu.into(),
            base_hash_rate,
            current_hash_rate: 0.0,
            temperature,
        }
    }

    /// The fixed roster every simulator starts with.
    pub fn roster() -> Vec<Worker> {
        vec![
            Worker::new("Worker #1", "NVIDIA RTX 3080", 95.0, 65.0),
            Worker::new("Worker #2", "AMD RX 6800 XT", 64.0, 70.0),
            Worker::new("Worker #3", "NVIDIA RTX 3070", 62.0, 63.0),
        ]
    }
}

/// Sum of `base_hash_rate * multiplier` over `workers`, i.e. the aggregate
/// rate with all noise terms at zero.
pub fn nominal_hash_rate(workers: &[Worker], multiplier: f64) -> f64 {
    workers.iter().map(|w| w.base_hash_rate * multiplier).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_three_idle_workers() {
        let roster = Worker::roster();
        assert_eq!(roster.len(), 3);
        assert!(roster.iter().all(|w| w.current_hash_rate == 0.0));
        assert_eq!(roster[1].gpu, "AMD RX 6800 XT");
        assert_eq!(roster[2].temperature, 63.0);
    }

    #[test]
    fn nominal_rate_scales_base_rates() {
        let roster = Worker::roster();
        assert_eq!(nominal_hash_rate(&roster, 1.0), 221.0);
        assert!((nominal_hash_rate(&roster, 0.8) - 176.8).abs() < 1e-9);
    }
}
