// src/math/types/cluster.rs

use crate::math::types::GeoPoint;
use serde::{Deserialize, Serialize};

/// A group of co-located points. The first member is the seed the group was
/// grown from; the rest follow in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    members: Vec<GeoPoint>,
}

impl Cluster {
    pub(crate) fn from_members(members: Vec<GeoPoint>) -> Self {
        Self { members }
    }

    pub fn seed(&self) -> Option<&GeoPoint> {
        self.members.first()
    }

    pub fn members(&self) -> &[GeoPoint] {
        &self.members
    }

    pub fn into_members(self) -> Vec<GeoPoint> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.members.iter().map(|p| p.id).collect()
    }

    /// Difference between the largest and smallest member longitude in degrees.
    pub fn longitude_span(&self) -> f64 {
        let (min, max) = self
            .members
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
                (min.min(p.longitude), max.max(p.longitude))
            });
        if min.is_finite() { max - min } else { 0.0 }
    }
}
