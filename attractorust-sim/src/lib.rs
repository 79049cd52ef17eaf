pub mod error;
pub mod progress;
pub mod series;
pub mod session;
pub mod stepper;

pub use error::SimError;
pub use progress::ProgressCancel;
pub use series::Series;
pub use session::{SimConfig, Simulation};
pub use stepper::Rk4Stepper;

/// Convenience result type for the simulation crate.
pub type Result<T> = std::result::Result<T, SimError>;
