//! Outlier geofencing.
//!
//! Location histories collect fixes from trips and GPS glitches. Before any
//! windowing, fixes further than a fixed radius from the trail's median are
//! discarded. The fence is a box, not a circle: latitude is fenced first
//! around the median latitude, then longitude around the median longitude of
//! what survived.

use log::debug;

use crate::error::{Error, Result};
use crate::point::{median, GpsFix};

/// Statute miles per degree, used for both axes.
pub const MILES_PER_DEGREE: f64 = 69.11;

/// Default fence radius in miles.
pub const DEFAULT_RADIUS_MILES: f64 = 75.0;

/// Keep the fixes within `radius_miles` of the median position.
///
/// Bounds are inclusive. Order of the surviving fixes is preserved.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `radius_miles` is negative or not finite.
pub fn geofence(fixes: &[GpsFix], radius_miles: f64) -> Result<Vec<GpsFix>> {
    if !radius_miles.is_finite() || radius_miles < 0.0 {
        return Err(Error::InvalidArgument {
            name: "radius_miles",
            message: "must be a finite, non-negative distance",
        });
    }
    let degrees = radius_miles / MILES_PER_DEGREE;

    let kept = fence_axis(fixes.to_vec(), degrees, GpsFix::latitude);
    let kept = fence_axis(kept, degrees, GpsFix::longitude);

    debug!(
        "geofence: kept {} of {} fixes ({} mi)",
        kept.len(),
        fixes.len(),
        radius_miles
    );
    Ok(kept)
}

fn fence_axis(fixes: Vec<GpsFix>, degrees: f64, axis: fn(&GpsFix) -> f64) -> Vec<GpsFix> {
    let Some(center) = median(fixes.iter().map(axis)) else {
        return fixes;
    };
    let (lo, hi) = (center - degrees, center + degrees);
    fixes
        .into_iter()
        .filter(|f| {
            let v = axis(f);
            v >= lo && v <= hi
        })
        .collect()
}
