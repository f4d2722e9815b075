//! Error types for histogram construction and output.

use thiserror::Error;

/// Errors that can occur while building or saving a histogram.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VizError {
    /// No counts were given, or every dataset is empty.
    #[error("No counts to plot")]
    NoData,

    /// Legend has a different number of labels than there are datasets.
    #[error("Legend has {labels} labels but there are {datasets} datasets")]
    LegendMismatch {
        /// Number of datasets.
        datasets: usize,
        /// Number of legend labels.
        labels: usize,
    },

    /// Hamming sort was requested without a target string.
    #[error("Sorting by Hamming distance needs a target string")]
    MissingTarget,

    /// The target string and a counts key differ in length.
    #[error("Target string '{target}' and key '{key}' have different lengths")]
    TargetLength {
        /// The target string.
        target: String,
        /// The offending key.
        key: String,
    },

    /// An option value could not be parsed.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Writing the rendered histogram failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for histogram operations.
pub type VizResult<T> = Result<T, VizError>;
