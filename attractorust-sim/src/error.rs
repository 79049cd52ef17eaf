use thiserror::Error;

/// Errors originating from the simulation layer.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid step size: {0} (must be positive and finite)")]
    InvalidStepSize(f64),

    #[error("requested capacity too large: {samples} samples")]
    CapacityTooLarge { samples: usize },

    #[error("buffer allocation failed for {samples} samples")]
    Allocation { samples: usize },

    #[error(transparent)]
    Core(#[from] attractorust_core::CoreError),
}
