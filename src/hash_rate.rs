use std::collections::VecDeque;

/// Number of samples kept for the chart, one per tick.
pub const HISTORY_CAPACITY: usize = 60;

/// Rolling window of aggregate hash-rate samples, oldest first.
#[derive(Clone, Debug)]
pub struct HashRateHistory {
    samples: VecDeque<f64>,
}

impl HashRateHistory {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Appends `sample`, evicting the oldest entry once the window is full.
    #[inline(always)]
    pub fn record(&mut self, sample: f64) {
        self.samples.push_back(sample);
        while self.samples.len() > HISTORY_CAPACITY {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

impl Default for HashRateHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_samples_in_arrival_order() {
        let mut history = HashRateHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);

        for sample in [10.0, 20.0, 30.0] {
            history.record(sample);
        }
        assert_eq!(history.to_vec(), vec![10.0, 20.0, 30.0]);
        assert_eq!(history.latest(), Some(30.0));
    }

    #[test]
    fn evicts_oldest_after_sixty_samples() {
        let mut history = HashRateHistory::new();
        for i in 0..61 {
            history.record(i as f64);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert!(!history.iter().any(|s| s == 0.0));
        assert_eq!(history.iter().next(), Some(1.0));
        assert_eq!(history.latest(), Some(60.0));
    }

    #[test]
    fn never_grows_past_capacity() {
        let mut history = HashRateHistory::new();
        for i in 0..500 {
            history.record(i as f64);
            assert!(history.len() <= HISTORY_CAPACITY);
        }
        assert_eq!(history.iter().next(), Some(440.0));
    }
}
