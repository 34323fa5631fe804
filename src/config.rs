//! Pipeline configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::cluster::DEFAULT_MAX_ITER;
use crate::error::{Error, Result};
use crate::geofence::DEFAULT_RADIUS_MILES;

/// Configuration for home/work inference.
///
/// Every field has a default, so a JSON config only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    /// Number of k-means clusters per label.
    /// Default: 6
    pub clusters: usize,

    /// Iteration cap for k-means.
    /// Default: 300
    pub max_iter: usize,

    /// Geofence radius around the median position, in miles.
    /// Default: 75.0
    pub geofence_miles: f64,

    /// Offset of local time from UTC, in minutes, used for time windows.
    /// Default: 0
    pub utc_offset_minutes: i32,

    /// RNG seed. `None` draws fresh entropy on every run.
    pub seed: Option<u64>,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            clusters: 6,
            max_iter: DEFAULT_MAX_ITER,
            geofence_miles: DEFAULT_RADIUS_MILES,
            utc_offset_minutes: 0,
            seed: None,
        }
    }
}

impl LocateConfig {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameters that the individual stages would otherwise reject
    /// one label at a time.
    pub fn validate(&self) -> Result<()> {
        if self.clusters == 0 {
            return Err(Error::InvalidArgument {
                name: "clusters",
                message: "must be at least 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidArgument {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if !self.geofence_miles.is_finite() || self.geofence_miles < 0.0 {
            return Err(Error::InvalidArgument {
                name: "geofence_miles",
                message: "must be a finite, non-negative distance",
            });
        }
        self.utc_offset()?;
        Ok(())
    }

    /// The configured UTC offset.
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(Error::InvalidArgument {
                name: "utc_offset_minutes",
                message: "must be within +/- 24 hours",
            })
    }
}
