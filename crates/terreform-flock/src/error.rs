//! Flock error types.

/// Errors raised when constructing a [`Flock`](crate::Flock).
#[derive(Debug, thiserror::Error)]
pub enum FlockError {
    /// A count, speed, force or bound is out of range.
    #[error("invalid flock configuration: {0}")]
    InvalidConfiguration(String),
}
