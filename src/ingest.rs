//! Track-log ingestion.
//!
//! Reads GPX documents into time-ordered [`GpsFix`]es. Track points, route
//! points and waypoints are all accepted; anything without a timestamp is
//! skipped since it cannot be placed in a time window.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use gpx::{Gpx, Waypoint};
use log::debug;

use crate::error::Result;
use crate::point::GpsFix;

/// Parse a GPX document into fixes sorted by timestamp.
///
/// Points with invalid coordinates are dropped.
pub fn read_gpx<R: Read>(reader: R) -> Result<Vec<GpsFix>> {
    let gpx: Gpx = gpx::read(reader)?;

    let waypoints = gpx
        .tracks
        .iter()
        .flat_map(|t| t.segments.iter())
        .flat_map(|s| s.points.iter())
        .chain(gpx.routes.iter().flat_map(|r| r.points.iter()))
        .chain(gpx.waypoints.iter());

    let mut fixes = Vec::new();
    let mut untimed = 0usize;
    let mut invalid = 0usize;
    for wpt in waypoints {
        match to_fix(wpt)? {
            Some(fix) if fix.is_valid() => fixes.push(fix),
            Some(_) => invalid += 1,
            None => untimed += 1,
        }
    }

    if untimed > 0 || invalid > 0 {
        debug!(
            "gpx: skipped {} points without time, {} with invalid coordinates",
            untimed, invalid
        );
    }

    fixes.sort_by_key(|f| f.timestamp);
    Ok(fixes)
}

/// Read a GPX file from disk.
pub fn read_gpx_file(path: impl AsRef<Path>) -> Result<Vec<GpsFix>> {
    let file = File::open(path.as_ref())?;
    let fixes = read_gpx(BufReader::new(file))?;
    debug!("{}: {} fixes", path.as_ref().display(), fixes.len());
    Ok(fixes)
}

fn to_fix(wpt: &Waypoint) -> Result<Option<GpsFix>> {
    let Some(time) = &wpt.time else {
        return Ok(None);
    };
    let timestamp = DateTime::parse_from_rfc3339(&time.format()?)?.with_timezone(&Utc);
    let point = wpt.point();
    Ok(Some(GpsFix::new(timestamp, point.y(), point.x())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <wpt lat="47.6000" lon="-122.3000"><time>2024-01-01T09:00:00Z</time></wpt>
  <trk>
    <trkseg>
      <trkpt lat="47.6100" lon="-122.3300"><time>2024-01-01T12:00:00Z</time></trkpt>
      <trkpt lat="47.6200" lon="-122.3400"><time>2024-01-01T08:30:00Z</time></trkpt>
      <trkpt lat="47.6300" lon="-122.3500"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_read_gpx_sorted_and_timed() {
        let fixes = read_gpx(SAMPLE.as_bytes()).unwrap();
        assert_eq!(fixes.len(), 3);

        let first = &fixes[0];
        assert_eq!(
            first.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap()
        );
        assert_eq!(first.latitude(), 47.62);
        assert_eq!(first.longitude(), -122.34);

        assert!(fixes.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_read_gpx_rejects_garbage() {
        assert!(read_gpx("not xml at all".as_bytes()).is_err());
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_gpx_file("/nonexistent/track.gpx"),
            Err(crate::Error::Io(_))
        ));
    }
}
