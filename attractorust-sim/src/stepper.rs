use std::sync::Arc;

use tracing::debug;

use attractorust_core::{rk4_step, DynamicalSystem, Vec3};

use crate::error::SimError;
use crate::progress::ProgressCancel;
use crate::series::Series;

pub(crate) fn validate_step_size(h: f64) -> crate::Result<()> {
    if h <= 0.0 || !h.is_finite() {
        return Err(SimError::InvalidStepSize(h));
    }
    Ok(())
}

/// A resumable RK4 integrator driven by an external tick loop.
///
/// Each [`update`](Self::update) performs at most `iterations_per_tick`
/// steps and returns, so a frame-paced host controls the compute budget per
/// tick; the integration picks up where it left off on the next call. Every
/// accepted step appends the new state to the owned [`Series`] and advances
/// the shared [`ProgressCancel`] counter by one.
///
/// Generic over the system for static dispatch, like the rest of the crate.
/// Not internally synchronized — one thread drives a given stepper, while
/// the shared progress handle may be cancelled or read from anywhere.
#[derive(Debug)]
pub struct Rk4Stepper<S: DynamicalSystem> {
    state: Vec3,
    h: f64,
    system: S,
    series: Series,
    progress: Arc<ProgressCancel>,
    iterations_per_tick: u32,
}

impl<S: DynamicalSystem> Rk4Stepper<S> {
    /// Create a stepper at `initial`, consuming `series` as the target
    /// buffer. The step size must be positive and finite.
    pub fn new(
        initial: Vec3,
        h: f64,
        system: S,
        series: Series,
        progress: Arc<ProgressCancel>,
        iterations_per_tick: u32,
    ) -> crate::Result<Self> {
        validate_step_size(h)?;
        debug!(h, iterations_per_tick, "Stepper created");
        Ok(Self {
            state: initial,
            h,
            system,
            series,
            progress,
            iterations_per_tick,
        })
    }

    /// One external tick: advance by the per-tick quota unless cancelled.
    pub fn update(&mut self) {
        if !self.progress.is_cancelled() {
            self.advance(self.iterations_per_tick);
        }
    }

    /// Perform up to `max_iterations` RK4 steps.
    ///
    /// The cancellation flag is checked before every step; on cancellation
    /// the call stops immediately and partial progress is retained. Returns
    /// the number of steps actually performed. `advance(0)` is a no-op.
    pub fn advance(&mut self, max_iterations: u32) -> u32 {
        let mut performed = 0;
        while performed < max_iterations && !self.progress.is_cancelled() {
            self.state = rk4_step(&self.system, self.state, self.h);
            self.series.push(self.state);
            self.progress.increment(1);
            performed += 1;
        }
        performed
    }

    /// Restart integration from a fresh point.
    ///
    /// The series is left untouched; clearing it (or keeping the old
    /// trajectory and appending) is the caller's choice.
    pub fn reset(&mut self, state: Vec3) {
        self.state = state;
    }

    /// The current state vector (double precision).
    pub fn state(&self) -> Vec3 {
        self.state
    }

    pub fn step_size(&self) -> f64 {
        self.h
    }

    pub fn iterations_per_tick(&self) -> u32 {
        self.iterations_per_tick
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    /// The accumulated trajectory.
    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn series_mut(&mut self) -> &mut Series {
        &mut self.series
    }

    /// The shared cancellation/progress handle.
    pub fn progress(&self) -> &Arc<ProgressCancel> {
        &self.progress
    }

    /// Tear down the stepper, recovering the sample buffer.
    pub fn into_series(self) -> Series {
        self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attractorust_core::Lorenz;

    fn stepper(progress: Arc<ProgressCancel>, per_tick: u32) -> Rk4Stepper<Lorenz> {
        Rk4Stepper::new(
            Vec3::new(1.0, 1.0, 1.0),
            0.001,
            Lorenz::default(),
            Series::new(),
            progress,
            per_tick,
        )
        .unwrap()
    }

    #[test]
    fn rejects_bad_step_sizes() {
        for h in [0.0, -0.001, f64::NAN, f64::INFINITY] {
            let result = Rk4Stepper::new(
                Vec3::ZERO,
                h,
                Lorenz::default(),
                Series::new(),
                Arc::new(ProgressCancel::unbounded()),
                100,
            );
            assert!(matches!(result, Err(SimError::InvalidStepSize(_))));
        }
    }

    #[test]
    fn advance_zero_is_a_noop() {
        let progress = Arc::new(ProgressCancel::unbounded());
        let mut s = stepper(Arc::clone(&progress), 100);
        let before = s.state();

        assert_eq!(s.advance(0), 0);
        assert_eq!(s.series().len(), 0);
        assert_eq!(s.state(), before);
        assert_eq!(progress.total(), 0);
    }

    #[test]
    fn advance_appends_one_sample_per_step() {
        let progress = Arc::new(ProgressCancel::unbounded());
        let mut s = stepper(Arc::clone(&progress), 100);

        assert_eq!(s.advance(25), 25);
        assert_eq!(s.series().len(), 25);
        assert_eq!(progress.total(), 25);

        // The last sample is the current state, narrowed to f32.
        let state = s.state();
        let last = s.series().get(24).unwrap();
        assert_eq!(last, [state.x as f32, state.y as f32, state.z as f32]);
    }

    #[test]
    fn split_advance_equals_one_advance() {
        let progress_a = Arc::new(ProgressCancel::unbounded());
        let progress_b = Arc::new(ProgressCancel::unbounded());
        let mut a = stepper(progress_a, 100);
        let mut b = stepper(progress_b, 100);

        a.advance(5);
        a.advance(5);
        b.advance(10);

        assert_eq!(a.state(), b.state(), "no hidden state reset between calls");
        assert_eq!(a.series().positions(), b.series().positions());
    }

    #[test]
    fn update_consumes_the_per_tick_quota() {
        let progress = Arc::new(ProgressCancel::unbounded());
        let mut s = stepper(Arc::clone(&progress), 42);

        s.update();
        assert_eq!(s.series().len(), 42);
        s.update();
        assert_eq!(s.series().len(), 84);
    }

    #[test]
    fn cancellation_stops_mid_advance() {
        // A limit of 7 cancels the listener on the 7th increment, so an
        // advance(100) must stop with exactly 7 samples appended.
        let progress = Arc::new(ProgressCancel::limited(7));
        let mut s = stepper(Arc::clone(&progress), 100);

        assert_eq!(s.advance(100), 7);
        assert_eq!(s.series().len(), 7);
        assert_eq!(progress.total(), 7);
    }

    #[test]
    fn cancelled_stepper_is_inert() {
        let progress = Arc::new(ProgressCancel::unbounded());
        let mut s = stepper(Arc::clone(&progress), 100);
        s.advance(10);

        progress.cancel();
        assert_eq!(s.advance(100), 0);
        s.update();
        assert_eq!(s.series().len(), 10, "no appends after cancellation");
    }

    #[test]
    fn fixed_point_stays_at_origin() {
        let progress = Arc::new(ProgressCancel::unbounded());
        let mut s = Rk4Stepper::new(
            Vec3::ZERO,
            0.001,
            Lorenz::default(),
            Series::new(),
            progress,
            100,
        )
        .unwrap();

        s.advance(1000);
        assert_eq!(s.state(), Vec3::ZERO);
        assert!(s.series().iter().all(|p| p == [0.0, 0.0, 0.0]));
    }

    #[test]
    fn reset_repositions_without_touching_the_series() {
        let progress = Arc::new(ProgressCancel::unbounded());
        let mut s = stepper(Arc::clone(&progress), 100);
        s.advance(10);

        s.reset(Vec3::ZERO);
        assert_eq!(s.state(), Vec3::ZERO);
        assert_eq!(s.series().len(), 10);

        // From the fixed point, further steps append zeros.
        s.advance(5);
        assert_eq!(s.series().len(), 15);
        assert_eq!(s.series().get(14), Some([0.0, 0.0, 0.0]));
    }

    #[test]
    fn into_series_recovers_the_buffer() {
        let progress = Arc::new(ProgressCancel::unbounded());
        let mut s = stepper(progress, 100);
        s.advance(30);

        let series = s.into_series();
        assert_eq!(series.len(), 30);
    }
}
