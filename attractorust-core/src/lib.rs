pub mod error;
pub mod lorenz;
pub mod rossler;
pub mod step;
pub mod system;
pub mod vec3;

// Re-export primary types for convenience.
pub use error::CoreError;
pub use lorenz::Lorenz;
pub use rossler::Rossler;
pub use step::rk4_step;
pub use system::DynamicalSystem;
pub use vec3::Vec3;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
