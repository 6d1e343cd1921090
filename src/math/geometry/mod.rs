// src/math/geometry/mod.rs

// Kugel-Geometrie: Großkreisdistanzen und Polarbereiche
pub mod sphere;

pub use self::sphere::{distance_km, haversine_km, is_near_pole};
