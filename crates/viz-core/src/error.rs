//! Error taxonomy for chart construction and rendering

use thiserror::Error;

/// Errors raised at the chart API boundary.
///
/// Layout math never sees invalid input: everything that could turn into a
/// NaN or an undefined pairing is rejected here first.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid container selector `{0}`")]
    InvalidSelector(String),

    #[error("no element matches container selector `{0}`")]
    ContainerNotFound(String),

    #[error("container `{0}` is not an HTML element")]
    ContainerNotHtml(String),

    #[error("container `{0}` is no longer attached to the document")]
    ContainerDetached(String),

    #[error("browser window or document is not available")]
    NoWindow,

    #[error("series `{group_id}` has {actual} points, expected {expected}")]
    SeriesLengthMismatch {
        group_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("series `{group_id}` has a different x label at index {index}")]
    LabelMismatch { group_id: String, index: usize },

    #[error("series `{group_id}` has invalid value {value} at index {index}")]
    InvalidValue {
        group_id: String,
        index: usize,
        value: f64,
    },

    #[error("group id `{0}` must match [a-zA-Z0-9_]+")]
    InvalidGroupId(String),

    #[error("group id `{0}` is used by more than one series")]
    DuplicateGroupId(String),

    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
