// src/math/types/mod.rs
pub mod cluster;
pub mod point;
pub mod ring;

pub use cluster::*;
pub use point::*;
pub use ring::*;

// Re-export häufig verwendete externe Typen
pub use geo::Coord;
