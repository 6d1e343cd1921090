// src/math/algorithms/convex_hull.rs

//! # Convex Hull Module
//!
//! Andrew's monotone chain over geographic points, treating longitude as x
//! and latitude as y. Points are sorted by latitude first (ties by
//! longitude), a lower chain is built front to back and an upper chain back
//! to front, and the two are joined into a counter-clockwise ring.
//!
//! The hull operates on a locally flat lon/lat grid. It is not meaningful for
//! clusters that straddle the antimeridian.

use crate::math::types::{GeoPoint, PolygonRing};
use std::cmp::Ordering;

/// Computes the convex hull of a set of geolocated points.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvexHullComputer {
    /// Keep points lying exactly on a hull edge. Off by default: a zero
    /// cross product pops the middle point.
    include_collinear_points: bool,
}

impl ConvexHullComputer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether collinear points on the hull's boundary are kept.
    ///
    /// Only meaningful for input that spans an area; a fully collinear input
    /// with this flag set walks the line out and back.
    pub fn include_collinear(mut self, include: bool) -> Self {
        self.include_collinear_points = include;
        self
    }

    /// Orientation of the triplet `(o, a, b)` in the lon/lat plane.
    /// - Result > 0: left (counter-clockwise) turn.
    /// - Result < 0: right (clockwise) turn.
    /// - Result = 0: collinear.
    #[inline]
    pub fn cross(o: &GeoPoint, a: &GeoPoint, b: &GeoPoint) -> f64 {
        (a.longitude - o.longitude) * (b.latitude - o.latitude)
            - (a.latitude - o.latitude) * (b.longitude - o.longitude)
    }

    /// Returns the hull vertices in counter-clockwise order, first vertex not repeated.
    ///
    /// Inputs of three or fewer points are returned unchanged. For larger
    /// inputs the result is a subset of `points`; if they are all collinear
    /// (or identical) the result has fewer than 3 vertices and callers must
    /// treat it as degenerate.
    pub fn compute(&self, points: &[GeoPoint]) -> Vec<GeoPoint> {
        if points.len() <= 3 {
            return points.to_vec();
        }

        let mut sorted: Vec<&GeoPoint> = points.iter().collect();
        sorted.sort_by(|a, b| Self::lat_lon_order(a, b));

        let mut lower = self.monotone_chain(sorted.iter().copied());
        let mut upper = self.monotone_chain(sorted.iter().rev().copied());

        // Each chain ends where the other begins
        lower.pop();
        upper.pop();
        lower.extend(upper);

        lower.into_iter().cloned().collect()
    }

    /// Hull as a ring of coordinates.
    pub fn compute_ring(&self, points: &[GeoPoint]) -> PolygonRing {
        PolygonRing::from_points(&self.compute(points))
    }

    fn lat_lon_order(a: &GeoPoint, b: &GeoPoint) -> Ordering {
        a.latitude
            .total_cmp(&b.latitude)
            .then_with(|| a.longitude.total_cmp(&b.longitude))
    }

    /// One half of the hull: a stack that only ever turns left.
    fn monotone_chain<'a>(&self, points: impl Iterator<Item = &'a GeoPoint>) -> Vec<&'a GeoPoint> {
        let mut chain: Vec<&GeoPoint> = Vec::new();
        for candidate in points {
            // Doppelte Positionen würden sonst als kollinear behalten
            if chain.last().is_some_and(|last| {
                last.latitude == candidate.latitude && last.longitude == candidate.longitude
            }) {
                continue;
            }
            while chain.len() >= 2 {
                let turn = Self::cross(chain[chain.len() - 2], chain[chain.len() - 1], candidate);
                let pop = if self.include_collinear_points {
                    turn < 0.0
                } else {
                    turn <= 0.0
                };
                if !pop {
                    break;
                }
                chain.pop();
            }
            chain.push(candidate);
        }
        chain
    }
}

/// Convex hull with the default policy (collinear boundary points dropped).
pub fn convex_hull(points: &[GeoPoint]) -> Vec<GeoPoint> {
    ConvexHullComputer::default().compute(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn point(id: i64, lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(id, lat, lon).unwrap()
    }

    fn ids(points: &[GeoPoint]) -> Vec<i64> {
        points.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_convex_hull_square() {
        let points = vec![
            point(1, 0.0, 0.0),
            point(2, 0.0, 0.01),
            point(3, 0.01, 0.0),
            point(4, 0.01, 0.01),
            point(5, 0.004, 0.003), // Interior point
        ];

        let hull = convex_hull(&points);
        assert_eq!(ids(&hull), vec![1, 2, 4, 3]);

        let ring = PolygonRing::from_points(&hull);
        assert!(ring.is_ccw());
        assert!(ring.is_convex());
    }

    #[test]
    fn test_small_inputs_are_returned_unchanged() {
        // Collinear, and deliberately not sorted
        let points = vec![point(1, 0.02, 0.0), point(2, 0.0, 0.0), point(3, 0.01, 0.0)];
        assert_eq!(convex_hull(&points), points);
        assert!(convex_hull(&[]).is_empty());
    }

    #[test]
    fn test_collinear_input_degenerates() {
        let points: Vec<GeoPoint> = (0..5).map(|i| point(i, i as f64 * 0.001, 0.0)).collect();
        let hull = convex_hull(&points);
        assert_eq!(ids(&hull), vec![0, 4]);
    }

    #[test]
    fn test_identical_points_degenerate() {
        let points: Vec<GeoPoint> = (0..4).map(|i| point(i, 1.0, 1.0)).collect();
        assert!(convex_hull(&points).len() < 3);
    }

    #[test]
    fn test_collinear_edge_points() {
        let points = vec![
            point(1, 0.0, 0.0),
            point(2, 0.0, 1.0),
            point(3, 1.0, 1.0),
            point(4, 1.0, 0.0),
            point(5, 0.0, 0.5), // On the southern edge
        ];

        assert_eq!(convex_hull(&points).len(), 4);

        let with_collinear = ConvexHullComputer::new()
            .include_collinear(true)
            .compute(&points);
        assert_eq!(ids(&with_collinear), vec![1, 5, 2, 3, 4]);
    }

    #[test]
    fn test_duplicate_points_are_not_repeated() {
        let points = vec![
            point(1, 0.0, 0.0),
            point(2, 0.0, 0.01),
            point(3, 0.01, 0.0),
            point(4, 0.01, 0.01),
            point(5, 0.0, 0.0), // Same position as 1
        ];

        for include in [false, true] {
            let hull = ConvexHullComputer::new()
                .include_collinear(include)
                .compute(&points);
            assert_eq!(ids(&hull), vec![1, 2, 4, 3]);
            assert!(PolygonRing::from_points(&hull).is_well_formed());
        }
    }

    #[test]
    fn test_collinear_input_with_collinear_points_kept() {
        let points: Vec<GeoPoint> = (0..5).map(|i| point(i, i as f64 * 0.001, 0.0)).collect();
        let ring = ConvexHullComputer::new()
            .include_collinear(true)
            .compute_ring(&points);
        // Walks the line out and back: no area
        assert_eq!(ring.len(), 8);
        assert!(ring.is_degenerate());
    }

    #[test]
    fn test_random_cloud_hull_encloses_all_points() {
        let mut rng = StdRng::seed_from_u64(42);
        let points: Vec<GeoPoint> = (0..60)
            .map(|i| {
                point(
                    i,
                    51.16 + rng.random_range(0.0..0.02),
                    71.44 + rng.random_range(0.0..0.02),
                )
            })
            .collect();

        let hull = convex_hull(&points);
        assert!(hull.len() >= 3);
        assert!(hull.iter().all(|v| points.contains(v)));

        let ring = PolygonRing::from_points(&hull);
        assert!(ring.is_ccw());
        assert!(ring.is_convex());
        assert!(ring.is_well_formed());

        let n = hull.len();
        for p in &points {
            for i in 0..n {
                let turn = ConvexHullComputer::cross(&hull[i], &hull[(i + 1) % n], p);
                assert!(turn >= -1e-15, "point {} lies outside the hull", p.id);
            }
        }
    }
}
