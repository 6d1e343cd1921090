// src/math/algorithms/mod.rs

// Deklaration der verschiedenen Algorithmus-Kategorien
pub mod clustering;
pub mod convex_hull;
pub mod smoothing;

// Clustering
pub use self::clustering::{ClusterConfig, ClusteringStrategy, ProximityClusterer, cluster_points};

// Konvexe Hülle
pub use self::convex_hull::{ConvexHullComputer, convex_hull};

// Smoothing Algorithmen und Traits
pub use self::smoothing::{
    ChaikinSmoother,
    Smoothing, // Haupt-Trait
    smooth,
};
