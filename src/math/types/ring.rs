// src/math/types/ring.rs

use crate::math::{
    error::{HotspotError, HotspotResult},
    types::GeoPoint,
    utils::comparison,
};
use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Implicitly closed polygon boundary in degrees (x = longitude, y = latitude).
///
/// The closing edge from the last vertex back to the first is never stored
/// as a duplicate vertex.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "Vec<[f64; 2]>", from = "Vec<[f64; 2]>")]
pub struct PolygonRing {
    vertices: Vec<Coord<f64>>,
}

impl PolygonRing {
    /// Wraps vertices as-is. A trailing copy of the first vertex is dropped.
    pub fn from_coords(mut vertices: Vec<Coord<f64>>) -> Self {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self { vertices }
    }

    /// Takes the vertices verbatim, without touching a closing duplicate.
    pub(crate) fn with_vertices(vertices: Vec<Coord<f64>>) -> Self {
        Self { vertices }
    }

    /// Builds a ring and requires at least 3 vertices.
    pub fn closed(vertices: Vec<Coord<f64>>) -> HotspotResult<Self> {
        let ring = Self::from_coords(vertices);
        if ring.len() < 3 {
            return Err(HotspotError::InsufficientPoints {
                expected: 3,
                actual: ring.len(),
            });
        }
        Ok(ring)
    }

    /// Ring through the given points in their current order.
    pub fn from_points(points: &[GeoPoint]) -> Self {
        Self::from_coords(points.iter().map(GeoPoint::coord).collect())
    }

    pub fn vertices(&self) -> &[Coord<f64>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices as `(latitude, longitude)` pairs for overlay drawing.
    pub fn lat_lon_pairs(&self) -> Vec<(f64, f64)> {
        self.vertices.iter().map(|c| (c.y, c.x)).collect()
    }

    /// At least 3 vertices, all finite, no two cyclically consecutive vertices equal.
    pub fn is_well_formed(&self) -> bool {
        let n = self.vertices.len();
        n >= 3
            && self.vertices.iter().all(|c| c.x.is_finite() && c.y.is_finite())
            && (0..n).all(|i| self.vertices[i] != self.vertices[(i + 1) % n])
    }

    /// Not drawable as an area: malformed, or (numerically) zero area.
    pub fn is_degenerate(&self) -> bool {
        !self.is_well_formed() || comparison::nearly_zero(self.signed_area())
    }

    /// Shoelace area in square degrees; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice_area: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice_area * 0.5
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// True when every turn has the same orientation (collinear turns ignored).
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut sign = None;
        for i in 0..n {
            let o = self.vertices[i];
            let a = self.vertices[(i + 1) % n];
            let b = self.vertices[(i + 2) % n];
            let cross = (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x);
            if cross != 0.0 {
                let current = cross > 0.0;
                match sign {
                    None => sign = Some(current),
                    Some(s) if s != current => return false,
                    _ => {}
                }
            }
        }
        sign.is_some()
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> Option<Coord<f64>> {
        if self.vertices.is_empty() {
            return None;
        }
        let n = self.vertices.len() as f64;
        let sum = self
            .vertices
            .iter()
            .fold(Coord { x: 0.0, y: 0.0 }, |acc, v| acc + *v);
        Some(Coord {
            x: sum.x / n,
            y: sum.y / n,
        })
    }

    /// `(min, max)` corners of the bounding box.
    pub fn bounds(&self) -> Option<(Coord<f64>, Coord<f64>)> {
        let first = *self.vertices.first()?;
        Some(self.vertices[1..].iter().fold((first, first), |(min, max), v| {
            (
                Coord {
                    x: min.x.min(v.x),
                    y: min.y.min(v.y),
                },
                Coord {
                    x: max.x.max(v.x),
                    y: max.y.max(v.y),
                },
            )
        }))
    }

    /// Converts to a `geo` polygon; `geo` closes the exterior ring itself.
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        Polygon::new(LineString::from(self.vertices.clone()), vec![])
    }
}

impl From<PolygonRing> for Vec<[f64; 2]> {
    fn from(ring: PolygonRing) -> Self {
        ring.vertices.iter().map(|c| [c.y, c.x]).collect()
    }
}

impl From<Vec<[f64; 2]>> for PolygonRing {
    fn from(pairs: Vec<[f64; 2]>) -> Self {
        PolygonRing::from_coords(
            pairs
                .into_iter()
                .map(|[lat, lon]| Coord { x: lon, y: lat })
                .collect(),
        )
    }
}
