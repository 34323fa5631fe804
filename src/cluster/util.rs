use crate::point::Point;

/// Index of the centroid closest to `point`.
///
/// Ties go to the lowest index. `centroids` must be non-empty.
#[inline]
pub(crate) fn nearest_centroid(point: &Point, centroids: &[Point]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (k, c) in centroids.iter().enumerate() {
        let d = point.distance_squared(c);
        // Strict `<` keeps the first of several equally close centroids.
        if d < best_dist {
            best_dist = d;
            best = k;
        }
    }
    best
}

/// Exact bit pattern of a coordinate, with `-0.0` folded into `0.0`.
#[inline]
fn coord_key(v: f64) -> u64 {
    (v + 0.0).to_bits()
}

/// Distinct `(x, y)` bit patterns of a centroid set, sorted.
fn centroid_keys(centroids: &[Point]) -> Vec<(u64, u64)> {
    let mut keys: Vec<(u64, u64)> = centroids
        .iter()
        .map(|c| (coord_key(c.x), coord_key(c.y)))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

/// Compare two centroid sets as unordered sets of exact coordinate tuples.
///
/// Order and multiplicity are ignored; coordinates must match bit for bit.
pub(crate) fn same_centroid_set(a: &[Point], b: &[Point]) -> bool {
    centroid_keys(a) == centroid_keys(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_centroid_tie_goes_to_lowest_index() {
        let centroids = [Point::new(-1.0, 0.0), Point::new(1.0, 0.0)];
        assert_eq!(nearest_centroid(&Point::new(0.0, 0.0), &centroids), 0);
        assert_eq!(nearest_centroid(&Point::new(0.5, 0.0), &centroids), 1);
    }

    #[test]
    fn test_same_centroid_set_ignores_order() {
        let a = [Point::new(0.0, 1.0), Point::new(2.0, 3.0)];
        let b = [Point::new(2.0, 3.0), Point::new(0.0, 1.0)];
        assert!(same_centroid_set(&a, &b));
    }

    #[test]
    fn test_same_centroid_set_is_exact() {
        let a = [Point::new(0.0, 1.0)];
        let b = [Point::new(0.0, 1.0 + f64::EPSILON)];
        assert!(!same_centroid_set(&a, &b));
    }

    #[test]
    fn test_same_centroid_set_signed_zero() {
        let a = [Point::new(-0.0, 0.0)];
        let b = [Point::new(0.0, -0.0)];
        assert!(same_centroid_set(&a, &b));
    }
}
