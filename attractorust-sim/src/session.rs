use std::mem;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use attractorust_core::{Lorenz, Vec3};

use crate::progress::ProgressCancel;
use crate::series::Series;
use crate::stepper::{validate_step_size, Rk4Stepper};

fn default_sigma() -> f64 {
    Lorenz::DEFAULT_SIGMA
}

fn default_rho() -> f64 {
    Lorenz::DEFAULT_RHO
}

fn default_beta() -> f64 {
    Lorenz::DEFAULT_BETA
}

fn default_initial() -> f64 {
    1.0
}

fn default_h() -> f64 {
    0.001
}

fn default_points() -> usize {
    100_000
}

fn default_speed() -> u32 {
    100
}

/// Settings for one Lorenz integration run.
///
/// Plain numeric fields supplied by the host (UI, preferences file, …).
/// Edits take effect on the next [`Simulation::start`]; a running stepper
/// never sees its parameters change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    #[serde(default = "default_rho")]
    pub rho: f64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_initial")]
    pub x0: f64,
    #[serde(default = "default_initial")]
    pub y0: f64,
    #[serde(default = "default_initial")]
    pub z0: f64,
    /// Integration step size.
    #[serde(default = "default_h")]
    pub h: f64,
    /// Target trajectory length; the run cancels itself once reached.
    #[serde(default = "default_points")]
    pub points: usize,
    /// Integration steps per external tick.
    #[serde(default = "default_speed")]
    pub speed: u32,
}

impl SimConfig {
    /// Initial state vector `(x₀, y₀, z₀)`.
    pub fn initial_state(&self) -> Vec3 {
        Vec3::new(self.x0, self.y0, self.z0)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sigma: default_sigma(),
            rho: default_rho(),
            beta: default_beta(),
            x0: default_initial(),
            y0: default_initial(),
            z0: default_initial(),
            h: default_h(),
            points: default_points(),
            speed: default_speed(),
        }
    }
}

/// Owns one attractor trajectory: config, sample buffer, progress handle,
/// and the stepper while a run is active.
///
/// The host drives it with `update()` once per frame and reads the series
/// for display. Reconfiguration is an explicit state transition — `stop`,
/// edit, `start` — never a live mutation of a running stepper. The sample
/// buffer is reused across runs so steady-state restarts do not reallocate.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    progress: Arc<ProgressCancel>,
    stepper: Option<Rk4Stepper<Lorenz>>,
    /// Buffer kept between runs; moved into the stepper while one is active.
    parked: Series,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            progress: Arc::new(ProgressCancel::unbounded()),
            stepper: None,
            parked: Series::new(),
        }
    }

    /// Begin a fresh run from the current config.
    ///
    /// Any previous run is stopped and its samples discarded. The buffer is
    /// pre-sized exactly to `points` and a fresh progress handle limited to
    /// `points` is installed, so the run cancels itself on completion.
    pub fn start(&mut self) -> crate::Result<()> {
        self.stop();

        validate_step_size(self.config.h)?;
        let system = Lorenz::new(self.config.sigma, self.config.rho, self.config.beta)?;
        self.parked.ensure_capacity(self.config.points, true)?;

        let progress = Arc::new(ProgressCancel::limited(self.config.points as u64));
        let stepper = Rk4Stepper::new(
            self.config.initial_state(),
            self.config.h,
            system,
            mem::take(&mut self.parked),
            Arc::clone(&progress),
            self.config.speed,
        )?;

        info!(
            points = self.config.points,
            speed = self.config.speed,
            h = self.config.h,
            "Integration session started"
        );
        self.progress = progress;
        self.stepper = Some(stepper);
        Ok(())
    }

    /// Stop the current run, clearing the trajectory but keeping its storage.
    pub fn stop(&mut self) {
        self.progress.cancel();
        if let Some(stepper) = self.stepper.take() {
            let mut series = stepper.into_series();
            debug!(samples = series.len(), "Integration session stopped");
            series.clear();
            self.parked = series;
        }
    }

    /// One external tick: advance the active run by `speed` steps.
    pub fn update(&mut self) {
        if let Some(stepper) = self.stepper.as_mut() {
            stepper.update();
        }
    }

    /// Whether a run is active and not yet cancelled or complete.
    pub fn is_running(&self) -> bool {
        self.stepper.is_some() && !self.progress.is_cancelled()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replace the config. Takes effect on the next `start`.
    pub fn set_config(&mut self, config: SimConfig) {
        self.config = config;
    }

    /// The trajectory accumulated so far (empty when never started).
    pub fn series(&self) -> &Series {
        match &self.stepper {
            Some(stepper) => stepper.series(),
            None => &self.parked,
        }
    }

    /// The shared progress handle for the current run. Observers may clone
    /// the `Arc` to watch or cancel from another thread.
    pub fn progress(&self) -> &Arc<ProgressCancel> {
        &self.progress
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.stop();
    }
}
