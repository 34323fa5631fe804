//! Location selection.
//!
//! K-means happily spends a cluster on a handful of repeated stale fixes far
//! from where the person actually spends time. Rather than trust cluster
//! sizes, the selector anchors on the per-axis median of the filtered points
//! and returns the centroid closest to it in L1 distance.

use crate::cluster::KmeansFit;
use crate::error::{Error, Result};
use crate::point::Point;

/// Pick the centroid of `fit` closest (L1) to the median of `filtered`.
///
/// `filtered` is the same point set that was clustered. Ties go to the
/// centroid with the lowest index.
///
/// # Errors
///
/// [`Error::EmptyInput`] if `filtered` is empty or `fit` has no centroids.
///
/// # Example
///
/// ```
/// use haunts::{cluster, select_location, Point};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let points: Vec<Point> = (0..30)
///     .map(|i| Point::new((i % 3) as f64 * 0.001, (i % 5) as f64 * 0.001))
///     .collect();
/// let fit = cluster(&points, 1, &mut StdRng::seed_from_u64(3)).unwrap();
/// let home = select_location(&points, &fit).unwrap();
/// assert!(home.l1_distance(&Point::new(0.001, 0.002)) < 0.01);
/// ```
pub fn select_location(filtered: &[Point], fit: &KmeansFit) -> Result<Point> {
    let anchor = Point::median(filtered).ok_or(Error::EmptyInput)?;
    closest_to(&anchor, fit.centroids()).ok_or(Error::EmptyInput)
}

/// First candidate minimizing the L1 distance to `anchor`.
fn closest_to(anchor: &Point, candidates: &[Point]) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for c in candidates {
        let score = c.l1_distance(anchor);
        match best {
            Some((_, s)) if s <= score => {}
            _ => best = Some((*c, score)),
        }
    }
    best.map(|(c, _)| c)
}
