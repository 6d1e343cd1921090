// src/pipeline/output.rs

use crate::math::types::{GeoPoint, PolygonRing};
use crate::pipeline::input::RejectedRecord;
use serde::{Deserialize, Serialize};

/// One cluster overlay: the member points and the polygon drawn around them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    pub source_points: Vec<GeoPoint>,
    /// Unsmoothed convex hull of the members.
    pub hull: PolygonRing,
    /// Polygon to draw. Equals the raw member list when `smoothed` is false.
    pub polygon: PolygonRing,
    /// False when the hull was degenerate and the raw points were used instead.
    pub smoothed: bool,
}

impl ClusterResult {
    pub fn member_count(&self) -> usize {
        self.source_points.len()
    }

    pub fn member_ids(&self) -> Vec<i64> {
        self.source_points.iter().map(|p| p.id).collect()
    }
}

/// A cluster that could not be turned into a polygon. The rest of the run is unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCluster {
    /// Position of the cluster in discovery order.
    pub index: usize,
    pub member_ids: Vec<i64>,
    pub reason: String,
}

/// Input the flat lon/lat geometry cannot represent faithfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeoWarning {
    NearPole { id: i64, latitude: f64 },
    AntimeridianSpan { cluster_index: usize, lon_span: f64 },
}

/// Everything a single pipeline run produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub clusters: Vec<ClusterResult>,
    pub skipped: Vec<SkippedCluster>,
    pub warnings: Vec<GeoWarning>,
}

/// What the map view renders: every point as a marker, plus cluster overlays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub markers: Vec<GeoPoint>,
    pub overlays: Vec<ClusterResult>,
    pub skipped: Vec<SkippedCluster>,
    pub rejected: Vec<RejectedRecord>,
    pub warnings: Vec<GeoWarning>,
}

/// Colours and viewport the map view uses for markers and overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_weight: f64,
    pub marker_color: String,
    /// Initial map centre as `(latitude, longitude)`.
    pub center: (f64, f64),
    pub zoom: u8,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            fill_color: "#2563eb".to_string(),
            fill_opacity: 0.2,
            stroke_color: "#2563eb".to_string(),
            stroke_opacity: 0.8,
            stroke_weight: 2.0,
            marker_color: "#ef4444".to_string(),
            center: (51.1694, 71.4491), // Astana
            zoom: 12,
        }
    }
}
