// src/math/mod.rs
pub mod algorithms;
pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{HotspotError, HotspotResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        algorithms::{
            clustering::{ClusterConfig, ClusteringStrategy, ProximityClusterer, cluster_points},
            convex_hull::{ConvexHullComputer, convex_hull},
            smoothing::{ChaikinSmoother, Smoothing, smooth},
        },
        error::{HotspotError, HotspotResult},
        geometry::sphere::coordinates::*,
        types::*,
    };
}
