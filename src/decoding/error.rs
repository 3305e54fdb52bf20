//! Error types for detection decoding.

use thiserror::Error;

/// Result alias for decoding operations.
pub type Result<T> = std::result::Result<T, DetectError>;

/// Errors that abort detection for a single frame.
///
/// None of these poison later frames; decoding the same input again
/// produces the same error.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Raw tensor dimensions disagree across fields or with the configuration.
    #[error("shape mismatch in `{field}`: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        field: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    /// A decoded class index has no entry in the label table.
    #[error("class index {class_id} out of range for label table of length {len}")]
    LabelTableTooSmall { class_id: usize, len: usize },
    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// The label source contained no labels.
    #[error("label table is empty")]
    EmptyLabelTable,
    /// Reading the label file failed.
    #[error("failed to read label table: {0}")]
    Io(#[from] std::io::Error),
}
