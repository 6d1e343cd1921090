// src/pipeline/config.rs

use crate::math::{
    algorithms::{clustering::ClusterConfig, smoothing::ChaikinSmoother},
    error::{HotspotError, HotspotResult},
    utils::constants,
};
use serde::{Deserialize, Serialize};

/// Konfiguration für einen Lauf der Hotspot-Pipeline.
///
/// Alle Parameter sind explizit; es gibt keinen globalen Zustand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub cluster: ClusterConfig,
    /// Glättung der Hüllpolygone (Standard: 2 Chaikin-Iterationen).
    pub smoothing: ChaikinSmoother,
    /// Kollineare Punkte auf Hüllkanten behalten.
    pub include_collinear_hull_points: bool,
    /// Obergrenze für die Punktanzahl; Clustering ist O(n²).
    pub max_points: usize,
    /// Hülle + Glättung pro Cluster parallel ausführen (nur mit Feature `parallel`).
    pub parallel: bool,
    /// Punkte jenseits dieser Breite werden als polnah gemeldet.
    pub polar_latitude_limit: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cluster: ClusterConfig::default(),
            smoothing: ChaikinSmoother::default(),
            include_collinear_hull_points: false,
            max_points: 10_000,
            parallel: true,
            polar_latitude_limit: constants::DEFAULT_POLAR_LATITUDE_LIMIT,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, cluster: ClusterConfig) -> Self {
        self.cluster = cluster;
        self
    }

    pub fn with_smoothing_passes(mut self, passes: usize) -> Self {
        self.smoothing.iterations = passes;
        self
    }

    pub fn with_collinear_hull_points(mut self, include: bool) -> Self {
        self.include_collinear_hull_points = include;
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_polar_latitude_limit(mut self, limit: f64) -> Self {
        self.polar_latitude_limit = limit;
        self
    }

    pub fn validate(&self) -> HotspotResult<()> {
        self.cluster.validate()?;
        self.smoothing.validate()?;
        if self.max_points == 0 {
            return Err(HotspotError::InvalidConfiguration {
                message: "Point limit must be greater than 0.".to_string(),
            });
        }
        if !(0.0..=90.0).contains(&self.polar_latitude_limit) {
            return Err(HotspotError::InvalidConfiguration {
                message: format!(
                    "Polar latitude limit must lie within 0..=90 degrees, got {}",
                    self.polar_latitude_limit
                ),
            });
        }
        Ok(())
    }
}
