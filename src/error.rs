use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, TreemapError>;

/// Errors raised while building, mutating or checking a treemap tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreemapError {
    /// Leaf sizes must be finite and non-negative.
    #[error("invalid leaf size {size}: sizes must be finite and non-negative")]
    InvalidSize { size: f64 },

    /// Nested input that is neither a leaf nor a sub-sequence.
    #[error("invalid nested data at offset {position}: {reason}")]
    InvalidNestedData { position: usize, reason: String },

    /// A container's cached aggregate disagrees with the sum of its children.
    #[error("stale aggregate: cached size {cached} but children sum to {actual}")]
    StaleAggregate { cached: f64, actual: f64 },
}
