// src/math/geometry/sphere/coordinates.rs

//! Great-circle distance on a spherical Earth.
//!
//! Coordinates are taken at face value: latitudes outside ±90° or longitudes
//! outside ±180° give a mathematically defined but geographically meaningless
//! distance. Nothing here handles the poles or the antimeridian; see
//! [`is_near_pole`] for the check the pipeline uses to flag such input.

use crate::math::{
    types::GeoPoint,
    utils::{angles, constants},
};

/// Haversine distance in kilometres between two `(lat, lon)` positions in degrees.
///
/// The deltas enter as absolute values, so swapping the two positions gives a
/// bit-identical result.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = angles::deg_to_rad(lat1);
    let phi2 = angles::deg_to_rad(lat2);
    let dlat = angles::deg_to_rad((lat2 - lat1).abs());
    let dlon = angles::deg_to_rad((lon2 - lon1).abs());

    let a = (dlat * 0.5).sin().powi(2) + phi1.cos() * phi2.cos() * (dlon * 0.5).sin().powi(2);
    // Rundungsfehler können a minimal über 1 schieben
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    constants::EARTH_RADIUS_KM * c
}

/// Great-circle distance between two points in kilometres. Always `>= 0`.
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_km(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// True if `latitude` lies beyond `limit` degrees north or south.
pub fn is_near_pole(latitude: f64, limit: f64) -> bool {
    latitude.abs() > limit
}
