//! Points and fixes.
//!
//! [`Point`] is the plain 2-D vector the clustering engine works on. By
//! convention `x` is longitude and `y` is latitude, so the engine never has
//! to know it is dealing with geography.
//!
//! [`GpsFix`] is a point with the timestamp it was recorded at. Ingestion
//! produces fixes; time-window filtering turns them back into points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A 2-D real-valued vector: `x` = longitude, `y` = latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point from its two coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point from a latitude/longitude pair.
    pub const fn from_lat_lng(latitude: f64, longitude: f64) -> Self {
        Self {
            x: longitude,
            y: latitude,
        }
    }

    pub fn longitude(&self) -> f64 {
        self.x
    }

    pub fn latitude(&self) -> f64 {
        self.y
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// L1 (Manhattan) distance: `|dx| + |dy|`.
    #[inline]
    pub fn l1_distance(&self, other: &Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Coordinate-wise arithmetic mean, or `None` for an empty slice.
    pub fn mean(points: &[Point]) -> Option<Point> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// Coordinate-wise median, or `None` for an empty slice.
    ///
    /// The two axes are taken independently, so the result is usually not
    /// one of the input points.
    pub fn median(points: &[Point]) -> Option<Point> {
        let x = median(points.iter().map(|p| p.x))?;
        let y = median(points.iter().map(|p| p.y))?;
        Some(Point::new(x, y))
    }
}

/// Median of a sequence of values.
///
/// Even-length inputs yield the mean of the two middle values. Returns `None`
/// when there are no values.
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// A GPS fix: a position and the instant it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub timestamp: DateTime<Utc>,
    pub point: Point,
}

impl GpsFix {
    pub fn new(timestamp: DateTime<Utc>, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp,
            point: Point::from_lat_lng(latitude, longitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.point.y
    }

    pub fn longitude(&self) -> f64 {
        self.point.x
    }

    /// Check if the fix has valid WGS84 coordinates.
    pub fn is_valid(&self) -> bool {
        self.point.is_finite()
            && (-90.0..=90.0).contains(&self.latitude())
            && (-180.0..=180.0).contains(&self.longitude())
    }
}
