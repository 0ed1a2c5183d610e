use std::time::{Duration, Instant};

/// Period of one simulation tick. Earnings accrual assumes exactly this.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A cancellable repeating task driven by caller-supplied instants.
///
/// The task never runs anything itself: the owner calls [`poll`](Self::poll)
/// from its loop and performs the work when it returns `true`, so a tick can
/// never start while another is in progress.
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    period: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTask {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    #[cfg(test)]
    pub fn is_scheduled(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arms the task to first fire one period after `now`. Returns `false`
    /// and leaves the existing schedule untouched if already armed.
    pub fn schedule(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.period);
        true
    }

    /// Disarms the task. Returns `false` if it was not armed.
    pub fn cancel(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Returns `true` at most once per call when a period has elapsed.
    /// Missed periods are dropped rather than replayed in a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let next = due + self.period;
        self.next_due = Some(if next <= now { now + self.period } else { next });
        true
    }
}
