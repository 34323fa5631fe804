//! Clustering engine.
//!
//! K-means over 2-D [`Point`](crate::point::Point)s. Nothing in here knows
//! about geography or time: a point is just an `(x, y)` pair.
//!
//! ## K-means
//!
//! Assign each point to the nearest centroid, then move each centroid to the
//! mean of its points. Repeat until the centroid set stops changing.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - You know k in advance
//!
//! GPS trails violate the second one all the time, which is why the result
//! goes through [`select_location`](crate::locate::select_location) instead of
//! being used directly.
//!
//! ## Usage
//!
//! ```rust
//! use haunts::cluster::{Clustering, Kmeans};
//! use haunts::Point;
//!
//! // Two blobs of ten points each, around (0, 0) and (10, 10).
//! let data: Vec<Point> = (0..20)
//!     .map(|i| {
//!         let offset = if i < 10 { 0.0 } else { 10.0 };
//!         Point::new(offset + (i % 10) as f64 * 0.01, offset)
//!     })
//!     .collect();
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[9]);   // Same blob
//! assert_ne!(labels[0], labels[10]);  // Different blobs
//! ```

mod kmeans;
mod traits;
mod util;

pub use kmeans::{cluster, Kmeans, KmeansFit, DEFAULT_MAX_ITER};
pub use traits::Clustering;
