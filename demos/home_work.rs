//! Home and work from a synthetic two-week trail.

use chrono::{Datelike, Duration, TimeZone, Timelike, Utc};
use haunts::{infer_haunts, GpsFix, LocateConfig, Point};
use rand::prelude::*;

fn main() {
    let home = Point::from_lat_lng(51.5074, -0.1278);
    let work = Point::from_lat_lng(51.5155, -0.0922);

    let mut rng = StdRng::seed_from_u64(1);
    let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(); // a Monday

    // One fix every 10 minutes: at work 09:00-17:59 on weekdays, home otherwise.
    let fixes: Vec<GpsFix> = (0..14 * 24 * 6)
        .map(|i| {
            let timestamp = start + Duration::minutes(10 * i);
            let weekday = timestamp.weekday().num_days_from_monday();
            let at = if weekday < 5 && (9..18).contains(&timestamp.hour()) {
                work
            } else {
                home
            };
            let point = Point::new(
                at.x + rng.random_range(-0.0003..0.0003),
                at.y + rng.random_range(-0.0003..0.0003),
            );
            GpsFix { timestamp, point }
        })
        .collect();

    let config = LocateConfig {
        seed: Some(42),
        ..Default::default()
    };
    let haunts = infer_haunts(&fixes, &config).unwrap();

    println!("=== {} fixes, {} inside the geofence ===", fixes.len(), haunts.fenced);
    for (name, result) in [("Work", &haunts.work), ("Home", &haunts.home)] {
        match result {
            Ok(loc) => println!(
                "  {name}: ({:.5}, {:.5}) from {} fixes",
                loc.location.latitude(),
                loc.location.longitude(),
                loc.support
            ),
            Err(e) => println!("  {name}: unavailable ({e})"),
        }
    }
}
