// src/math/algorithms/smoothing/chaikin.rs

use crate::math::{
    algorithms::smoothing::traits::Smoothing,
    error::{HotspotError, HotspotResult},
    types::{Coord, PolygonRing},
    utils::comparison,
};
use serde::{Deserialize, Serialize};

/// Implementiert den Chaikin-Algorithmus (Corner Cutting) für geschlossene Ringe.
///
/// Jede Iteration ersetzt jede Kante `(v[i], v[i+1])` durch zwei Punkte bei
/// `cut_ratio` und `1 - cut_ratio` der Kantenlänge; die Vertex-Anzahl
/// verdoppelt sich also pro Iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaikinSmoother {
    /// Anzahl der anzuwendenden Glättungsiterationen. 0 lässt den Ring unverändert.
    pub iterations: usize,
    /// Schnittverhältnis; 0.25 ergibt die klassischen Gewichte 3/4 und 1/4.
    pub cut_ratio: f64,
}

impl Default for ChaikinSmoother {
    fn default() -> Self {
        Self {
            iterations: 2,
            cut_ratio: 0.25,
        }
    }
}

impl ChaikinSmoother {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    pub fn with_cut_ratio(mut self, ratio: f64) -> Self {
        self.cut_ratio = ratio;
        self
    }

    pub fn validate(&self) -> HotspotResult<()> {
        if !(self.cut_ratio > 0.0 && self.cut_ratio < 0.5) {
            return Err(HotspotError::InvalidConfiguration {
                message: format!(
                    "Chaikin cut ratio must lie strictly between 0 and 0.5, got {}",
                    self.cut_ratio
                ),
            });
        }
        Ok(())
    }

    /// Führt eine einzelne Iteration auf einem geschlossenen Ring durch.
    fn chaikin_iteration(&self, vertices: &[Coord<f64>]) -> Vec<Coord<f64>> {
        let n = vertices.len();
        let mut smoothed = Vec::with_capacity(n * 2);

        for i in 0..n {
            let current = vertices[i];
            let next = vertices[(i + 1) % n];

            smoothed.push(Self::lerp_coord(current, next, self.cut_ratio));
            smoothed.push(Self::lerp_coord(current, next, 1.0 - self.cut_ratio));
        }

        smoothed
    }

    #[inline]
    fn lerp_coord(a: Coord<f64>, b: Coord<f64>, t: f64) -> Coord<f64> {
        Coord {
            x: comparison::lerp(a.x, b.x, t),
            y: comparison::lerp(a.y, b.y, t),
        }
    }
}

impl Smoothing for ChaikinSmoother {
    fn smooth_coords(&self, vertices: &[Coord<f64>]) -> HotspotResult<Vec<Coord<f64>>> {
        if vertices.len() < 3 {
            return Err(HotspotError::InsufficientPoints {
                expected: 3,
                actual: vertices.len(),
            });
        }
        self.validate()?;

        let mut current = vertices.to_vec();
        for _ in 0..self.iterations {
            current = self.chaikin_iteration(&current);
        }

        if let Some(bad) = current.iter().position(|c| !(c.x.is_finite() && c.y.is_finite())) {
            return Err(HotspotError::GeometricFailure {
                operation: format!("Chaikin smoothing produced a non-finite vertex at index {bad}"),
            });
        }

        Ok(current)
    }
}

/// Glättet `ring` mit `passes` Chaikin-Iterationen und Standard-Schnittverhältnis.
pub fn smooth(ring: &PolygonRing, passes: usize) -> HotspotResult<PolygonRing> {
    ChaikinSmoother::new(passes).smooth_ring(ring)
}
