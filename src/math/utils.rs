// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    /// Mittlerer Erdradius in Kilometern (Haversine)
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
    /// Flächen darunter (in Quadratgrad) gelten als null
    pub const EPSILON: f64 = 1e-12;
    /// Ab diesem Betrag der Breite gilt ein Punkt als polnah
    pub const DEFAULT_POLAR_LATITUDE_LIMIT: f64 = 85.0;
}

/// Winkel-Hilfsfunktionen
pub mod angles {
    /// Konvertiert Grad zu Radiant
    #[inline]
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees.to_radians()
    }
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f64) -> bool {
        a.abs() < EPSILON
    }

    /// Lineare Interpolation
    pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a * (1.0 - t) + b * t
    }
}
