//! K-means (Lloyd's algorithm) over 2-D points.
//!
//! # The Algorithm
//!
//! 1. Draw two independent samples of k points without replacement. One is
//!    the starting centroid set, the other stands in for "the previous
//!    iteration" so the loop has something to compare against.
//! 2. Assign every point to its nearest centroid (ties: lowest index).
//! 3. Move each centroid to the mean of its points. A centroid that received
//!    no points stays where it is.
//! 4. Stop once the new centroid set equals the previous one, compared as an
//!    unordered set of exact coordinate tuples.
//!
//! Exact equality is the stopping rule, so in principle the centroids can
//! keep moving by a few ulps forever. `max_iter` bounds that; running out of
//! iterations is reported as [`Error::NonConvergence`] with the last result
//! attached.
//!
//! Lloyd's algorithm finds a local optimum only. Different seeds can give
//! different answers.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use super::traits::Clustering;
use super::util::{nearest_centroid, same_centroid_set};
use crate::error::{Error, Result};
use crate::point::Point;

/// Default iteration cap.
pub const DEFAULT_MAX_ITER: usize = 300;

/// K-means clustering.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum number of update steps.
    max_iter: usize,
    /// Optional RNG seed for reproducibility.
    seed: Option<u64>,
}

/// Result of a k-means run.
///
/// `centroids[k]` is the center of cluster `k`, `clusters[k]` holds the points
/// assigned to it, and `labels[i]` is the cluster of input point `i`. The
/// assignment is the one computed against exactly these centroids.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    centroids: Vec<Point>,
    labels: Vec<usize>,
    clusters: Vec<Vec<Point>>,
    iterations: usize,
}

impl KmeansFit {
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn clusters(&self) -> &[Vec<Point>] {
        &self.clusters
    }

    /// Number of update steps performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.centroids.len()
    }
}

impl Kmeans {
    /// Create a new k-means clusterer with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
        }
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seed the initialization so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit using the configured seed, or thread-local entropy when unseeded.
    pub fn fit(&self, data: &[Point]) -> Result<KmeansFit> {
        match self.seed {
            Some(s) => self.fit_with_rng(data, &mut StdRng::seed_from_u64(s)),
            None => self.fit_with_rng(data, &mut rand::rng()),
        }
    }

    /// Fit drawing the initial centroids from `rng`.
    ///
    /// The configured seed is ignored.
    pub fn fit_with_rng<R: Rng + ?Sized>(&self, data: &[Point], rng: &mut R) -> Result<KmeansFit> {
        self.validate(data)?;

        let previous = sample(data, self.k, rng);
        let current = sample(data, self.k, rng);
        self.lloyd(data, current, previous)
    }

    fn validate(&self, data: &[Point]) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidArgument {
                name: "k",
                message: "must be at least 1",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidArgument {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if data.is_empty() {
            return Err(Error::InvalidArgument {
                name: "data",
                message: "must not be empty",
            });
        }
        if data.len() < self.k {
            return Err(Error::InsufficientData {
                requested: self.k,
                available: data.len(),
            });
        }
        if !data.iter().all(Point::is_finite) {
            return Err(Error::InvalidArgument {
                name: "data",
                message: "coordinates must be finite",
            });
        }
        Ok(())
    }

    /// Run Lloyd iterations from the given starting sets.
    fn lloyd(
        &self,
        data: &[Point],
        mut current: Vec<Point>,
        mut previous: Vec<Point>,
    ) -> Result<KmeansFit> {
        let mut iterations = 0;
        let (mut labels, mut clusters) = assign(data, &current);

        loop {
            if same_centroid_set(&current, &previous) {
                debug!(
                    "k-means converged: k={}, n={}, iterations={}",
                    self.k,
                    data.len(),
                    iterations
                );
                return Ok(KmeansFit {
                    centroids: current,
                    labels,
                    clusters,
                    iterations,
                });
            }

            if iterations >= self.max_iter {
                debug!(
                    "k-means hit iteration cap: k={}, n={}, max_iter={}",
                    self.k,
                    data.len(),
                    self.max_iter
                );
                return Err(Error::NonConvergence {
                    iterations,
                    best: Box::new(KmeansFit {
                        centroids: current,
                        labels,
                        clusters,
                        iterations,
                    }),
                });
            }

            let next = update(&current, &clusters);
            previous = std::mem::replace(&mut current, next);
            (labels, clusters) = assign(data, &current);
            iterations += 1;
        }
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Point]) -> Result<Vec<usize>> {
        self.fit(data).map(|fit| fit.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Cluster `points` into `k` groups, drawing the initial centroids from `rng`.
///
/// Shorthand for `Kmeans::new(k).fit_with_rng(points, rng)`.
pub fn cluster<R: Rng + ?Sized>(points: &[Point], k: usize, rng: &mut R) -> Result<KmeansFit> {
    Kmeans::new(k).fit_with_rng(points, rng)
}

/// Draw `k` points without replacement. Caller guarantees `k <= data.len()`.
fn sample<R: Rng + ?Sized>(data: &[Point], k: usize, rng: &mut R) -> Vec<Point> {
    index::sample(rng, data.len(), k)
        .iter()
        .map(|i| data[i])
        .collect()
}

/// Assignment step: per-point labels and per-cluster members.
fn assign(data: &[Point], centroids: &[Point]) -> (Vec<usize>, Vec<Vec<Point>>) {
    let mut labels = Vec::with_capacity(data.len());
    let mut clusters: Vec<Vec<Point>> = vec![Vec::new(); centroids.len()];
    for p in data {
        let k = nearest_centroid(p, centroids);
        labels.push(k);
        clusters[k].push(*p);
    }
    (labels, clusters)
}

/// Update step: each centroid becomes the mean of its members; empty
/// clusters keep their current centroid.
fn update(centroids: &[Point], clusters: &[Vec<Point>]) -> Vec<Point> {
    centroids
        .iter()
        .zip(clusters)
        .map(|(c, members)| Point::mean(members).unwrap_or(*c))
        .collect()
}
