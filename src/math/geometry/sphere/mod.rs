// src/math/geometry/sphere/mod.rs

pub mod coordinates;

pub use self::coordinates::{distance_km, haversine_km, is_near_pole};
