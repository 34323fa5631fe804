//! Home and work from a GPS trail.
//!
//! `haunts` infers where someone lives and works from a time-stamped location
//! history. The trail is geofenced around its median, split into "work hours"
//! and "home hours" windows, and each window is clustered with k-means. The
//! cluster center closest to the window's median wins.
//!
//! The pieces, leaf first:
//! - [`cluster`]: k-means over 2-D points (Lloyd iterations, exact-repeat
//!   convergence, iteration cap)
//! - [`locate`]: median-anchored choice among the centroids
//! - [`geofence`], [`window`], [`ingest`]: fence, time windows, GPX reading
//! - [`pipeline`]: the per-label glue, [`export`] for GeoJSON output
//!
//! ## Features
//!
//! - **`parallel`** - infer the two labels concurrently with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use haunts::{cluster, select_location, Point};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // 90 fixes around one spot and 10 stale ones far away.
//! let mut points: Vec<Point> = (0..90)
//!     .map(|i| Point::new((i % 9) as f64 * 1e-4, (i / 9) as f64 * 1e-4))
//!     .collect();
//! points.extend((0..10).map(|i| Point::new(1.0 + i as f64 * 1e-4, 1.0)));
//!
//! let fit = cluster(&points, 2, &mut StdRng::seed_from_u64(7)).unwrap();
//! let spot = select_location(&points, &fit).unwrap();
//! assert!(spot.x < 0.01 && spot.y < 0.01);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod config;
pub mod error;
pub mod export;
pub mod geofence;
pub mod ingest;
pub mod locate;
pub mod pipeline;
pub mod point;
pub mod window;

pub use cluster::{cluster, Clustering, Kmeans, KmeansFit};
pub use config::LocateConfig;
pub use error::{Error, Result};
pub use locate::select_location;
pub use pipeline::{infer_haunts, infer_location, Haunts, LabeledLocation};
pub use point::{GpsFix, Point};
pub use window::{Label, TimeWindow};
