//! Per-label inference pipeline.
//!
//! ```text
//! fixes ─▶ geofence ─┬▶ work window ─▶ k-means ─▶ select ─▶ Work
//!                    └▶ home window ─▶ k-means ─▶ select ─▶ Home
//! ```
//!
//! The two labels share nothing but the fenced input, so with the `parallel`
//! feature they run on the rayon pool.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::cluster::Kmeans;
use crate::config::LocateConfig;
use crate::error::{Error, Result};
use crate::geofence::geofence;
use crate::locate::select_location;
use crate::point::{GpsFix, Point};
use crate::window::{self, Label};

/// A chosen location and how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledLocation {
    pub label: Label,
    pub location: Point,
    /// Number of fixes inside the label's time window.
    pub support: usize,
    /// K-means update steps.
    pub iterations: usize,
    /// False when the iteration cap was hit and the best-so-far clustering
    /// was used instead.
    pub converged: bool,
}

/// Outcome for both labels. A failure for one does not affect the other.
#[derive(Debug)]
pub struct Haunts {
    pub work: Result<LabeledLocation>,
    pub home: Result<LabeledLocation>,
    /// Fixes left after geofencing.
    pub fenced: usize,
}

impl Haunts {
    /// The labels that produced a location, work first.
    pub fn locations(&self) -> Vec<LabeledLocation> {
        [&self.work, &self.home]
            .into_iter()
            .filter_map(|r| r.as_ref().ok().cloned())
            .collect()
    }
}

/// Infer the location for one label from already-fenced fixes.
///
/// A run that exhausts `max_iter` is not an error here: the best-so-far
/// clustering is used and the result is marked `converged: false`.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if no fix falls in the label's window.
/// - [`Error::InsufficientData`] if fewer fixes than clusters do.
/// - [`Error::InvalidArgument`] for a bad config.
pub fn infer_location<R: Rng + ?Sized>(
    fixes: &[GpsFix],
    label: Label,
    config: &LocateConfig,
    rng: &mut R,
) -> Result<LabeledLocation> {
    let points = window::filter(fixes, &label.window(), config.utc_offset()?);
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }

    let kmeans = Kmeans::new(config.clusters).with_max_iter(config.max_iter);
    let (fit, converged) = match kmeans.fit_with_rng(&points, rng) {
        Ok(fit) => (fit, true),
        Err(Error::NonConvergence { iterations, best }) => {
            warn!(
                "{}: k-means stopped after {} iterations without converging",
                label, iterations
            );
            (*best, false)
        }
        Err(e) => return Err(e),
    };

    let location = select_location(&points, &fit)?;
    info!(
        "{}: ({:.6}, {:.6}) from {} fixes, k={}, {} iterations",
        label,
        location.latitude(),
        location.longitude(),
        points.len(),
        fit.k(),
        fit.iterations()
    );

    Ok(LabeledLocation {
        label,
        location,
        support: points.len(),
        iterations: fit.iterations(),
        converged,
    })
}

/// Geofence the trail, then infer both work and home.
///
/// With a seed, each label gets its own deterministic RNG stream so results
/// do not depend on which label runs first.
///
/// # Errors
///
/// Only for an invalid config. Per-label failures are reported in
/// [`Haunts`].
pub fn infer_haunts(fixes: &[GpsFix], config: &LocateConfig) -> Result<Haunts> {
    config.validate()?;
    let fenced = geofence(fixes, config.geofence_miles)?;
    info!("{} of {} fixes inside the geofence", fenced.len(), fixes.len());

    let run = |label: Label| {
        let result = match config.seed {
            Some(seed) => infer_location(
                &fenced,
                label,
                config,
                &mut StdRng::seed_from_u64(label_seed(seed, label)),
            ),
            None => infer_location(&fenced, label, config, &mut rand::rng()),
        };
        if let Err(e) = &result {
            warn!("{}: no location ({})", label, e);
        }
        result
    };

    #[cfg(feature = "parallel")]
    let (work, home) = rayon::join(|| run(Label::Work), || run(Label::Home));
    #[cfg(not(feature = "parallel"))]
    let (work, home) = (run(Label::Work), run(Label::Home));

    Ok(Haunts {
        work,
        home,
        fenced: fenced.len(),
    })
}

fn label_seed(seed: u64, label: Label) -> u64 {
    match label {
        Label::Work => seed,
        Label::Home => seed.wrapping_add(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    /// Monday 2024-01-01, one fix every 20 minutes for a week, all at `at`.
    fn week_at(at: Point) -> Vec<GpsFix> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..7 * 24 * 3)
            .map(|i| GpsFix {
                timestamp: start + Duration::minutes(20 * i),
                point: at,
            })
            .collect()
    }

    #[test]
    fn test_infer_location_single_spot() {
        let spot = Point::from_lat_lng(47.6, -122.3);
        let fixes = week_at(spot);
        let config = LocateConfig::default();

        let loc = infer_location(&fixes, Label::Work, &config, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(loc.location, spot);
        // 7 hours x 3 fixes x 5 days
        assert_eq!(loc.support, 105);
        assert!(loc.converged);
    }

    #[test]
    fn test_empty_window() {
        // Saturday only: no work hours at all.
        let start = Utc.with_ymd_and_hms(2024, 1, 6, 12, 0, 0).unwrap();
        let fixes = vec![GpsFix::new(start, 1.0, 1.0)];
        let err = infer_location(
            &fixes,
            Label::Work,
            &LocateConfig::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }

    #[test]
    fn test_sparse_window_is_insufficient() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let fixes = vec![GpsFix::new(start, 1.0, 1.0), GpsFix::new(start, 1.0, 1.1)];
        let err = infer_location(
            &fixes,
            Label::Work,
            &LocateConfig::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData {
                requested: 6,
                available: 2
            }
        ));
    }

    #[test]
    fn test_one_label_failing_keeps_the_other() {
        // Half an hour of Monday office time, nothing in the home window.
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let fixes: Vec<GpsFix> = (0..30)
            .map(|i| GpsFix::new(start + Duration::minutes(i), 10.0, 20.0))
            .collect();
        let config = LocateConfig {
            seed: Some(3),
            ..Default::default()
        };

        let haunts = infer_haunts(&fixes, &config).unwrap();
        assert!(haunts.work.is_ok());
        assert!(matches!(haunts.home, Err(Error::EmptyInput)));
        assert_eq!(haunts.locations().len(), 1);
        assert_eq!(haunts.fenced, 30);
    }

    #[test]
    fn test_iteration_cap_uses_best_so_far() {
        // Monday noon onwards, 40 fixes strung along a convex curve so no
        // cluster mean lands back on a fix.
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let fixes: Vec<GpsFix> = (0..40)
            .map(|i| {
                let t = i as f64;
                GpsFix::new(
                    start + Duration::minutes(i),
                    10.0 + t * t * 0.001,
                    20.0 + t * 0.003,
                )
            })
            .collect();
        let config = LocateConfig {
            clusters: 3,
            max_iter: 1,
            ..Default::default()
        };

        let loc = infer_location(&fixes, Label::Work, &config, &mut StdRng::seed_from_u64(11))
            .unwrap();
        assert!(!loc.converged);
        assert_eq!(loc.iterations, 1);
        assert_eq!(loc.support, 40);

        let points: Vec<Point> = fixes.iter().map(|f| f.point).collect();
        let best = match Kmeans::new(3)
            .with_max_iter(1)
            .fit_with_rng(&points, &mut StdRng::seed_from_u64(11))
        {
            Err(Error::NonConvergence { best, .. }) => best,
            other => panic!("expected non-convergence, got {other:?}"),
        };
        assert!(best.centroids().contains(&loc.location));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = LocateConfig {
            clusters: 0,
            ..Default::default()
        };
        assert!(infer_haunts(&[], &config).is_err());
    }
}
