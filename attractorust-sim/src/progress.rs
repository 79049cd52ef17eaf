use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Shared cancellation flag and progress counter for an integration run.
///
/// The stepper increments the counter once per accepted step and checks the
/// flag once per inner iteration; an observer (typically the UI thread)
/// reads progress and may cancel at any time. With a maximum configured,
/// the counter cancels itself once the maximum is reached — reaching the
/// target point count is the expected steady-state termination path, not a
/// failure.
#[derive(Debug)]
pub struct ProgressCancel {
    cancelled: AtomicBool,
    total: AtomicU64,
    maximum: Option<u64>,
}

impl ProgressCancel {
    /// A counter with no maximum: only an explicit `cancel` stops the run.
    pub fn unbounded() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            total: AtomicU64::new(0),
            maximum: None,
        }
    }

    /// A counter that cancels itself once `maximum` increments accumulate.
    pub fn limited(maximum: u64) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            total: AtomicU64::new(0),
            maximum: Some(maximum),
        }
    }

    /// Whether the run has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Cancel the run. Cooperative: in-flight work observes the flag on its
    /// next iteration.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Advance the counter by `count`, cancelling once the maximum is hit.
    pub fn increment(&self, count: u64) {
        let total = self.total.fetch_add(count, Ordering::Relaxed) + count;
        if let Some(maximum) = self.maximum {
            if total >= maximum {
                self.cancel();
            }
        }
    }

    /// Total increments so far.
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// The configured maximum, if any.
    pub fn maximum(&self) -> Option<u64> {
        self.maximum
    }

    /// Read the current progress as `(total, maximum)`.
    pub fn progress(&self) -> (u64, Option<u64>) {
        (self.total(), self.maximum)
    }
}

impl Default for ProgressCancel {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_clean() {
        let p = ProgressCancel::unbounded();
        assert!(!p.is_cancelled());
        assert_eq!(p.total(), 0);
        assert_eq!(p.maximum(), None);
    }

    #[test]
    fn increments_accumulate() {
        let p = ProgressCancel::unbounded();
        p.increment(3);
        p.increment(4);
        assert_eq!(p.total(), 7);
        assert!(!p.is_cancelled());
    }

    #[test]
    fn cancel_is_sticky() {
        let p = ProgressCancel::unbounded();
        p.cancel();
        assert!(p.is_cancelled());
        p.increment(1);
        assert!(p.is_cancelled());
    }

    #[test]
    fn reaching_the_maximum_cancels() {
        let p = ProgressCancel::limited(10);
        p.increment(9);
        assert!(!p.is_cancelled());
        p.increment(1);
        assert!(p.is_cancelled());
        assert_eq!(p.progress(), (10, Some(10)));
    }

    #[test]
    fn overshooting_the_maximum_cancels() {
        let p = ProgressCancel::limited(10);
        p.increment(25);
        assert!(p.is_cancelled());
        assert_eq!(p.total(), 25);
    }

    #[test]
    fn unbounded_never_self_cancels() {
        let p = ProgressCancel::unbounded();
        p.increment(1_000_000);
        assert!(!p.is_cancelled());
    }

    #[test]
    fn cancel_from_another_thread_is_observed() {
        let p = Arc::new(ProgressCancel::unbounded());
        let p2 = Arc::clone(&p);
        std::thread::spawn(move || p2.cancel()).join().unwrap();
        assert!(p.is_cancelled());
    }
}
