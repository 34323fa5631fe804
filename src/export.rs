//! GeoJSON export of inferred locations.
//!
//! One `Point` feature per location, coordinates in GeoJSON `[lon, lat]`
//! order, ready to drop onto any web map.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::error::Result;
use crate::pipeline::LabeledLocation;

/// Build a GeoJSON FeatureCollection from labeled locations.
pub fn to_geojson(locations: &[LabeledLocation]) -> Value {
    let features: Vec<Value> = locations
        .iter()
        .map(|loc| {
            json!({
                "type": "Feature",
                "properties": {
                    "label": loc.label.as_str(),
                    "support": loc.support,
                    "iterations": loc.iterations,
                    "converged": loc.converged,
                },
                "geometry": {
                    "type": "Point",
                    "coordinates": [loc.location.longitude(), loc.location.latitude()],
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write labeled locations to `path` as GeoJSON.
pub fn write_geojson(path: impl AsRef<Path>, locations: &[LabeledLocation]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &to_geojson(locations))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use crate::window::Label;

    fn home() -> LabeledLocation {
        LabeledLocation {
            label: Label::Home,
            location: Point::from_lat_lng(47.6, -122.3),
            support: 42,
            iterations: 3,
            converged: true,
        }
    }

    #[test]
    fn test_feature_collection_shape() {
        let geojson = to_geojson(&[home()]);
        assert_eq!(geojson["type"], "FeatureCollection");

        let feature = &geojson["features"][0];
        assert_eq!(feature["properties"]["label"], "Home");
        assert_eq!(feature["properties"]["support"], 42);
        assert_eq!(feature["geometry"]["coordinates"][0], -122.3);
        assert_eq!(feature["geometry"]["coordinates"][1], 47.6);
    }

    #[test]
    fn test_empty_collection() {
        let geojson = to_geojson(&[]);
        assert_eq!(geojson["features"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_write_geojson() {
        let path = std::env::temp_dir().join(format!("haunts-{}.geojson", std::process::id()));
        write_geojson(&path, &[home()]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, to_geojson(&[home()]));
        std::fs::remove_file(&path).unwrap();
    }
}
