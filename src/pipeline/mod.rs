// src/pipeline/mod.rs

//! # Hotspot Pipeline
//!
//! Raw points → clusters → convex hulls → smoothed polygons. Every run is a
//! pure recomputation from the given point snapshot; nothing is cached.
//!
//! Clustering is sequential (seed choice depends on earlier iterations). The
//! hull and smoothing stage has no cross-cluster dependency and runs as a
//! parallel map when the `parallel` feature and [`PipelineConfig::parallel`]
//! are both on. Output order is always the clusterer's discovery order.

pub mod config;
pub mod input;
pub mod output;

pub use config::PipelineConfig;
pub use input::{Ingested, MapRecord, RejectedRecord, ingest, parse_records};
pub use output::{
    ClusterResult, GeoWarning, MapView, OverlayStyle, PipelineOutput, SkippedCluster,
};

use crate::math::{
    algorithms::{
        clustering::ProximityClusterer,
        convex_hull::ConvexHullComputer,
        smoothing::Smoothing,
    },
    error::{HotspotError, HotspotResult},
    geometry::sphere::coordinates::is_near_pole,
    types::{Cluster, GeoPoint, PolygonRing},
};
use tracing::{debug, info, info_span, warn};

/// Runs the clustering and polygon pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct ClusterPipeline {
    config: PipelineConfig,
}

impl ClusterPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Clusters `points` and builds one overlay per qualifying cluster.
    ///
    /// Fails only on invalid configuration or when the point count exceeds
    /// `max_points`. A cluster whose polygon cannot be built is reported in
    /// [`PipelineOutput::skipped`] and does not affect the others.
    pub fn run(&self, points: &[GeoPoint]) -> HotspotResult<PipelineOutput> {
        let _span = info_span!("hotspot_pipeline", points = points.len()).entered();

        self.config.validate()?;
        if points.len() > self.config.max_points {
            return Err(HotspotError::TooManyPoints {
                limit: self.config.max_points,
                actual: points.len(),
            });
        }

        let mut output = PipelineOutput::default();
        self.flag_polar_points(points, &mut output.warnings);

        let clusters = ProximityClusterer::new(self.config.cluster.clone()).cluster(points)?;
        self.flag_antimeridian_clusters(&clusters, &mut output.warnings);

        for outcome in self.build_overlays(clusters) {
            match outcome {
                Ok(result) => output.clusters.push(result),
                Err(skipped) => output.skipped.push(skipped),
            }
        }

        info!(
            clusters = output.clusters.len(),
            skipped = output.skipped.len(),
            warnings = output.warnings.len(),
            "hotspot pipeline finished"
        );
        Ok(output)
    }

    /// Per-cluster hull and smoothing in discovery order. Runs on rayon's
    /// pool when the `parallel` feature and [`PipelineConfig::parallel`] are on.
    fn build_overlays(&self, clusters: Vec<Cluster>) -> Vec<Result<ClusterResult, SkippedCluster>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            if self.config.parallel {
                return clusters
                    .into_par_iter()
                    .enumerate()
                    .map(|(index, cluster)| self.build_overlay(index, cluster))
                    .collect();
            }
        }

        clusters
            .into_iter()
            .enumerate()
            .map(|(index, cluster)| self.build_overlay(index, cluster))
            .collect()
    }

    /// Hull and smoothing for one cluster.
    fn build_overlay(&self, index: usize, cluster: Cluster) -> Result<ClusterResult, SkippedCluster> {
        let members = cluster.into_members();
        let hull = ConvexHullComputer::new()
            .include_collinear(self.config.include_collinear_hull_points)
            .compute_ring(&members);

        match self.overlay_polygon(index, &members, &hull) {
            Ok((polygon, smoothed)) => Ok(ClusterResult {
                source_points: members,
                hull,
                polygon,
                smoothed,
            }),
            Err(err) => {
                warn!(cluster = index, error = %err, "skipping cluster");
                Err(SkippedCluster {
                    index,
                    member_ids: members.iter().map(|p| p.id).collect(),
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Smoothed hull, or the raw members (`false`) when the hull encloses no area.
    fn overlay_polygon(
        &self,
        index: usize,
        members: &[GeoPoint],
        hull: &PolygonRing,
    ) -> HotspotResult<(PolygonRing, bool)> {
        if let Some(bad) = hull
            .vertices()
            .iter()
            .position(|c| !(c.x.is_finite() && c.y.is_finite()))
        {
            return Err(HotspotError::GeometricFailure {
                operation: format!("convex hull has a non-finite vertex at index {bad}"),
            });
        }

        if hull.is_degenerate() {
            warn!(
                cluster = index,
                members = members.len(),
                hull_vertices = hull.len(),
                "degenerate hull, using raw points as polygon"
            );
            return Ok((PolygonRing::from_points(members), false));
        }

        let polygon = self.config.smoothing.smooth_ring(hull)?;
        debug!(
            cluster = index,
            members = members.len(),
            hull_vertices = hull.len(),
            polygon_vertices = polygon.len(),
            "cluster polygon built"
        );
        Ok((polygon, true))
    }

    fn flag_polar_points(&self, points: &[GeoPoint], warnings: &mut Vec<GeoWarning>) {
        for p in points {
            if is_near_pole(p.latitude, self.config.polar_latitude_limit) {
                warn!(id = p.id, latitude = p.latitude, "point lies near a pole");
                warnings.push(GeoWarning::NearPole {
                    id: p.id,
                    latitude: p.latitude,
                });
            }
        }
    }

    fn flag_antimeridian_clusters(&self, clusters: &[Cluster], warnings: &mut Vec<GeoWarning>) {
        for (cluster_index, cluster) in clusters.iter().enumerate() {
            let lon_span = cluster.longitude_span();
            if lon_span > 180.0 {
                warn!(cluster = cluster_index, lon_span, "cluster spans the antimeridian");
                warnings.push(GeoWarning::AntimeridianSpan {
                    cluster_index,
                    lon_span,
                });
            }
        }
    }
}

/// Runs the pipeline with default settings and returns the cluster overlays.
pub fn run(points: &[GeoPoint]) -> HotspotResult<Vec<ClusterResult>> {
    Ok(ClusterPipeline::default().run(points)?.clusters)
}

/// Validates raw map records and runs the pipeline on the accepted points.
///
/// Every accepted point becomes a marker regardless of cluster membership.
pub fn build_map_view(records: Vec<MapRecord>, config: &PipelineConfig) -> HotspotResult<MapView> {
    let Ingested { points, rejected } = ingest(records);
    let output = ClusterPipeline::new(config.clone()).run(&points)?;

    Ok(MapView {
        markers: points,
        overlays: output.clusters,
        skipped: output.skipped,
        rejected,
        warnings: output.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::algorithms::clustering::ClusterConfig;

    fn point(id: i64, lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(id, lat, lon).unwrap()
    }

    fn square_with_outlier() -> Vec<GeoPoint> {
        vec![
            point(1, 0.000, 0.000),
            point(2, 0.000, 0.010),
            point(3, 0.010, 0.000),
            point(4, 0.010, 0.010),
            point(5, 10.0, 10.0),
        ]
    }

    #[test]
    fn test_square_scenario() {
        let results = run(&square_with_outlier()).unwrap();
        assert_eq!(results.len(), 1);

        let result = &results[0];
        assert_eq!(result.member_count(), 4);
        assert_eq!(result.member_ids(), vec![1, 2, 3, 4]);
        assert_eq!(result.hull.len(), 4);
        assert_eq!(result.polygon.len(), 16);
        assert!(result.smoothed);
        assert!(result.polygon.is_ccw());
        assert!(result.polygon.is_well_formed());
    }

    #[test]
    fn test_empty_and_undersized_input() {
        assert!(run(&[]).unwrap().is_empty());
        assert!(run(&square_with_outlier()[..3]).unwrap().is_empty());
    }

    #[test]
    fn test_rerun_is_bit_identical() {
        let mut points = square_with_outlier();
        points.extend((0..12).map(|i| {
            point(
                100 + i,
                51.16 + (i % 4) as f64 * 0.003,
                71.44 + (i / 4) as f64 * 0.004,
            )
        }));

        let first = run(&points).unwrap();
        let second = run(&points).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let points: Vec<GeoPoint> = (0..5)
            .flat_map(|c| {
                (0..6).map(move |i| {
                    point(
                        c * 10 + i,
                        c as f64 + (i % 3) as f64 * 0.002,
                        (i / 3) as f64 * 0.003,
                    )
                })
            })
            .collect();

        let parallel = ClusterPipeline::new(PipelineConfig::new().with_parallel(true))
            .run(&points)
            .unwrap();
        let sequential = ClusterPipeline::new(PipelineConfig::new().with_parallel(false))
            .run(&points)
            .unwrap();

        assert_eq!(parallel.clusters.len(), 5);
        assert_eq!(parallel, sequential);
        let seeds: Vec<i64> = parallel.clusters.iter().map(|c| c.source_points[0].id).collect();
        assert_eq!(seeds, vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn test_collinear_cluster_falls_back_to_raw_points() {
        let points: Vec<GeoPoint> = (0..5).map(|i| point(i, i as f64 * 0.001, 0.0)).collect();
        let output = ClusterPipeline::default().run(&points).unwrap();

        assert_eq!(output.clusters.len(), 1);
        let result = &output.clusters[0];
        assert!(!result.smoothed);
        assert_eq!(result.hull.len(), 2);
        assert_eq!(result.polygon, PolygonRing::from_points(&points));
    }

    #[test]
    fn test_failing_cluster_is_skipped_not_fatal() {
        let pipeline = ClusterPipeline::default();

        // A NaN coordinate survives into the hull
        let mut poisoned_members = vec![
            point(1, 0.0, 0.0),
            point(2, 0.0, 0.01),
            point(3, 0.01, 0.0),
            point(4, 0.01, 0.01),
        ];
        poisoned_members[3].latitude = f64::NAN;
        let poisoned = Cluster::from_members(poisoned_members);
        let healthy = Cluster::from_members(square_with_outlier()[..4].to_vec());

        let outcomes = pipeline.build_overlays(vec![poisoned, healthy]);
        assert_eq!(outcomes.len(), 2);

        let skipped = outcomes[0].as_ref().unwrap_err();
        assert_eq!(skipped.index, 0);
        assert_eq!(skipped.member_ids, vec![1, 2, 3, 4]);
        assert!(skipped.reason.contains("non-finite"));

        let built = outcomes[1].as_ref().unwrap();
        assert_eq!(built.polygon.len(), 16);
    }

    #[test]
    fn test_collinear_hull_points_keep_degenerate_fallback() {
        let pipeline =
            ClusterPipeline::new(PipelineConfig::new().with_collinear_hull_points(true));

        let mut points: Vec<GeoPoint> = (0..5).map(|i| point(i, i as f64 * 0.001, 0.0)).collect();
        // Square with a repeated corner, far from the line
        points.extend([
            point(10, 1.0, 1.0),
            point(11, 1.0, 1.01),
            point(12, 1.01, 1.0),
            point(13, 1.01, 1.01),
            point(14, 1.0, 1.0),
        ]);

        let output = pipeline.run(&points).unwrap();
        assert_eq!(output.clusters.len(), 2);
        assert!(output.skipped.is_empty());

        let line = &output.clusters[0];
        assert!(!line.smoothed);
        assert!(line.hull.is_degenerate());
        assert_eq!(line.polygon, PolygonRing::from_points(&points[..5]));

        let square = &output.clusters[1];
        assert!(square.smoothed);
        assert_eq!(square.member_count(), 5);
        assert_eq!(square.hull.len(), 4);
        assert!(square.hull.is_well_formed());
        assert_eq!(square.polygon.len(), 16);
        assert!(square.polygon.is_well_formed());
    }

    #[test]
    fn test_too_many_points() {
        let pipeline = ClusterPipeline::new(PipelineConfig::new().with_max_points(4));
        assert!(matches!(
            pipeline.run(&square_with_outlier()),
            Err(HotspotError::TooManyPoints {
                limit: 4,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_smoothing_passes_are_configurable() {
        let pipeline = ClusterPipeline::new(PipelineConfig::new().with_smoothing_passes(3));
        let output = pipeline.run(&square_with_outlier()).unwrap();
        assert_eq!(output.clusters[0].polygon.len(), 32);

        let unsmoothed = ClusterPipeline::new(PipelineConfig::new().with_smoothing_passes(0))
            .run(&square_with_outlier())
            .unwrap();
        assert_eq!(unsmoothed.clusters[0].polygon, unsmoothed.clusters[0].hull);
    }

    #[test]
    fn test_geo_warnings() {
        let mut points: Vec<GeoPoint> = (0..4).map(|i| point(i, 88.0, i as f64 * 0.01)).collect();
        points.extend([
            point(10, 0.0, 179.999),
            point(11, 0.0, -179.999),
            point(12, 0.001, 179.999),
            point(13, 0.001, -179.999),
        ]);

        let output = ClusterPipeline::default().run(&points).unwrap();
        let polar = output
            .warnings
            .iter()
            .filter(|w| matches!(w, GeoWarning::NearPole { .. }))
            .count();
        assert_eq!(polar, 4);
        assert!(output.warnings.iter().any(|w| matches!(
            w,
            GeoWarning::AntimeridianSpan { cluster_index: 1, .. }
        )));
    }

    #[test]
    fn test_build_map_view() {
        let mut records: Vec<MapRecord> = square_with_outlier()
            .into_iter()
            .map(|p| MapRecord::new(p.id, Some(p.latitude), Some(p.longitude)))
            .collect();
        records.push(MapRecord::new(99, None, Some(1.0)));

        let view = build_map_view(records, &PipelineConfig::default()).unwrap();
        assert_eq!(view.markers.len(), 5);
        assert_eq!(view.overlays.len(), 1);
        assert_eq!(view.rejected.len(), 1);
        assert_eq!(view.rejected[0].id, 99);
        assert!(view.skipped.is_empty());

        let first = view.overlays[0].polygon.lat_lon_pairs()[0];
        assert!(first.0 >= 0.0 && first.0 <= 0.01);
        assert!(first.1 >= 0.0 && first.1 <= 0.01);
    }

    #[test]
    fn test_connected_components_strategy_through_pipeline() {
        use crate::math::algorithms::clustering::ClusteringStrategy;

        // A 1.5 km spaced chain of 5 points along the equator
        let points: Vec<GeoPoint> = (0..5)
            .map(|i| point(i, (i % 2) as f64 * 0.001, i as f64 * 0.0135))
            .collect();

        let star = ClusterPipeline::default().run(&points).unwrap();
        assert!(star.clusters.is_empty());

        let config = PipelineConfig::new().with_cluster(
            ClusterConfig::new().with_strategy(ClusteringStrategy::ConnectedComponents),
        );
        let connected = ClusterPipeline::new(config).run(&points).unwrap();
        assert_eq!(connected.clusters.len(), 1);
        assert_eq!(connected.clusters[0].member_count(), 5);
        assert!(connected.clusters[0].smoothed);
    }
}
