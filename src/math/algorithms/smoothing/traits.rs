// src/math/algorithms/smoothing/traits.rs

use crate::math::{
    error::{HotspotError, HotspotResult},
    types::{Coord, PolygonRing},
};

/// Haupt-Trait für Algorithmen, die einen geschlossenen Ring glätten.
///
/// Glättung ist rein geometrisch: es werden keine Metadaten pro Vertex
/// mitgeführt, das Ergebnis dient nur der Darstellung.
pub trait Smoothing {
    /// Glättet die Vertices eines geschlossenen Rings (letzte Kante implizit).
    ///
    /// Liefert einen Fehler, wenn zu wenige Vertices vorhanden sind oder das
    /// Ergebnis numerisch entartet (nicht-endliche Koordinaten).
    fn smooth_coords(&self, vertices: &[Coord<f64>]) -> HotspotResult<Vec<Coord<f64>>>;

    /// Hilfsmethode, um einen `PolygonRing` direkt zu glätten.
    fn smooth_ring(&self, ring: &PolygonRing) -> HotspotResult<PolygonRing> {
        let smoothed = self.smooth_coords(ring.vertices())?;
        if smoothed.len() < 3 {
            return Err(HotspotError::InsufficientPoints {
                expected: 3,
                actual: smoothed.len(),
            });
        }
        Ok(PolygonRing::with_vertices(smoothed))
    }
}
