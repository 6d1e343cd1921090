// src/math/algorithms/clustering.rs

//! # Proximity Clustering
//!
//! Groups geolocated points that lie within a fixed great-circle radius of
//! each other. Two strategies are available:
//!
//! - [`ClusteringStrategy::Star`]: single pass over the input. Each unvisited
//!   point seeds a cluster and claims every later unvisited point within the
//!   radius *of the seed*. Membership is never tested against other members,
//!   so a chain of points does not merge. The result depends on input order.
//! - [`ClusteringStrategy::ConnectedComponents`]: same seeding, but every
//!   claimed point claims its own neighbours in turn (transitive closure).
//!
//! In both cases a cluster smaller than `min_cluster_size` is dropped and its
//! points are not offered to later seeds.

use crate::math::{
    error::{HotspotError, HotspotResult},
    geometry::sphere::coordinates::distance_km,
    types::{Cluster, GeoPoint},
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// How cluster membership is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusteringStrategy {
    /// Greedy seed-based grouping (membership tested against the seed only).
    #[default]
    Star,
    /// Full transitive closure under the radius.
    ConnectedComponents,
}

/// Konfiguration für die Proximity-Clusterbildung.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Maximaler Abstand (exklusiv) zum Seed in Kilometern.
    pub radius_km: f64,
    /// Cluster mit weniger Mitgliedern werden verworfen.
    pub min_cluster_size: usize,
    pub strategy: ClusteringStrategy,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            radius_km: 2.0,
            min_cluster_size: 4, // Minimum für ein sinnvolles Hüllpolygon
            strategy: ClusteringStrategy::Star,
        }
    }
}

impl ClusterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_min_cluster_size(mut self, size: usize) -> Self {
        self.min_cluster_size = size;
        self
    }

    pub fn with_strategy(mut self, strategy: ClusteringStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> HotspotResult<()> {
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(HotspotError::InvalidConfiguration {
                message: format!(
                    "Cluster radius must be a positive number of kilometres, got {}",
                    self.radius_km
                ),
            });
        }
        if self.min_cluster_size == 0 {
            return Err(HotspotError::InvalidConfiguration {
                message: "Minimum cluster size must be greater than 0.".to_string(),
            });
        }
        Ok(())
    }
}

/// Groups points into clusters according to a [`ClusterConfig`].
#[derive(Debug, Clone, Default)]
pub struct ProximityClusterer {
    config: ClusterConfig,
}

impl ProximityClusterer {
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Clusters `points` in input order. Every returned cluster has at least
    /// `min_cluster_size` members; clusters appear in discovery order.
    pub fn cluster(&self, points: &[GeoPoint]) -> HotspotResult<Vec<Cluster>> {
        self.config.validate()?;

        let mut visited = vec![false; points.len()];
        let mut clusters = Vec::new();
        let mut discarded = 0usize;

        for seed in 0..points.len() {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;

            let member_indices = match self.config.strategy {
                ClusteringStrategy::Star => self.grow_star(points, seed, &mut visited),
                ClusteringStrategy::ConnectedComponents => {
                    self.grow_connected(points, seed, &mut visited)
                }
            };

            if member_indices.len() >= self.config.min_cluster_size {
                clusters.push(Cluster::from_members(
                    member_indices.into_iter().map(|i| points[i].clone()).collect(),
                ));
            } else {
                discarded += 1;
            }
        }

        debug!(
            points = points.len(),
            clusters = clusters.len(),
            discarded,
            strategy = ?self.config.strategy,
            "proximity clustering finished"
        );
        Ok(clusters)
    }

    /// Claims every later unvisited point within the radius of the seed.
    fn grow_star(&self, points: &[GeoPoint], seed: usize, visited: &mut [bool]) -> Vec<usize> {
        let mut members = vec![seed];
        // Alle Indizes vor `seed` sind bereits besucht
        for candidate in (seed + 1)..points.len() {
            if !visited[candidate]
                && distance_km(&points[seed], &points[candidate]) < self.config.radius_km
            {
                visited[candidate] = true;
                members.push(candidate);
            }
        }
        members
    }

    /// Breadth-first flood from the seed; members in discovery order.
    fn grow_connected(&self, points: &[GeoPoint], seed: usize, visited: &mut [bool]) -> Vec<usize> {
        let mut members = vec![seed];
        let mut queue = VecDeque::from([seed]);

        while let Some(current) = queue.pop_front() {
            for candidate in 0..points.len() {
                if !visited[candidate]
                    && distance_km(&points[current], &points[candidate]) < self.config.radius_km
                {
                    visited[candidate] = true;
                    members.push(candidate);
                    queue.push_back(candidate);
                }
            }
        }
        members
    }
}

/// Star clustering with an explicit radius and minimum size.
pub fn cluster_points(
    points: &[GeoPoint],
    radius_km: f64,
    min_size: usize,
) -> HotspotResult<Vec<Cluster>> {
    ProximityClusterer::new(
        ClusterConfig::new()
            .with_radius_km(radius_km)
            .with_min_cluster_size(min_size),
    )
    .cluster(points)
}
