use thiserror::Error;

/// Errors originating from the core integration engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("non-finite system parameter {name}: {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },
}
