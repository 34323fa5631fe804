use thiserror::Error;

use crate::cluster::KmeansFit;

/// Errors returned by the clustering engine, the location selector, and the
/// collaborators around them.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing to choose from: an empty filtered set reached the selector.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is larger than the dataset.
    ///
    /// Points are counted by position, so duplicates count toward `available`.
    #[error("insufficient data: requested {requested} clusters, but dataset has {available} points")]
    InsufficientData {
        /// Requested number of clusters.
        requested: usize,
        /// Number of points in the dataset.
        available: usize,
    },

    /// The iteration cap was reached before the centroid set repeated exactly.
    ///
    /// `best` holds the last centroid set together with its assignment.
    #[error("k-means did not converge after {iterations} iterations")]
    NonConvergence {
        /// Update steps performed.
        iterations: usize,
        /// Best-so-far clustering.
        best: Box<KmeansFit>,
    },

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A GPX document could not be parsed.
    #[error("gpx error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    /// A track point carried an unparseable timestamp.
    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// JSON (config or GeoJSON) could not be read or written.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
