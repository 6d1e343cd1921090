// ./src/lib.rs

//! Complaint hotspots: groups geolocated city complaints into proximity
//! clusters and wraps each cluster in a smoothed polygon for map overlays.
//!
//! ```no_run
//! use complaint_hotspots::{PipelineConfig, build_map_view, parse_records};
//!
//! let records = parse_records(r#"[{"id": 1, "lat": 51.17, "lon": 71.45}]"#)?;
//! let view = build_map_view(records, &PipelineConfig::default())?;
//! assert_eq!(view.markers.len(), 1);
//! # Ok::<(), complaint_hotspots::HotspotError>(())
//! ```

// Eigene Module deklarieren
pub mod debug;
pub mod math;
pub mod pipeline;

pub use debug::visualization::{SvgOptions, render_map_view_svg, save_map_view_svg};
pub use math::{
    algorithms::{
        ChaikinSmoother, ClusterConfig, ClusteringStrategy, ConvexHullComputer,
        ProximityClusterer, Smoothing, cluster_points, convex_hull, smooth,
    },
    error::{HotspotError, HotspotResult},
    geometry::{distance_km, haversine_km},
    types::{Cluster, Coord, GeoPoint, PolygonRing},
};
pub use pipeline::{
    ClusterPipeline, ClusterResult, GeoWarning, Ingested, MapRecord, MapView, OverlayStyle,
    PipelineConfig, PipelineOutput, RejectedRecord, SkippedCluster, build_map_view, ingest,
    parse_records, run,
};
