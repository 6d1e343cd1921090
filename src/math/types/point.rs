// src/math/types/point.rs

use crate::math::error::{HotspotError, HotspotResult};
use chrono::NaiveDateTime;
use geo::Coord;
use serde::{Deserialize, Serialize};

/// A geolocated complaint as it enters the clustering pipeline.
///
/// Identity is `id`. Latitude and longitude are decimal degrees and are
/// guaranteed finite by every constructor and by deserialisation; no range
/// normalisation is done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredGeoPoint")]
pub struct GeoPoint {
    pub id: i64,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

/// Serialised form of [`GeoPoint`], checked through [`GeoPoint::new`] on the way in.
#[derive(Deserialize)]
struct StoredGeoPoint {
    id: i64,
    lat: f64,
    lon: f64,
    #[serde(default)]
    category: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    created_at: Option<NaiveDateTime>,
}

impl TryFrom<StoredGeoPoint> for GeoPoint {
    type Error = HotspotError;

    fn try_from(stored: StoredGeoPoint) -> Result<Self, Self::Error> {
        let point = GeoPoint::new(stored.id, stored.lat, stored.lon)?
            .with_category(stored.category)
            .with_status(stored.status);
        Ok(match stored.created_at {
            Some(created_at) => point.with_created_at(created_at),
            None => point,
        })
    }
}

impl GeoPoint {
    /// Creates a point, rejecting non-finite coordinates.
    pub fn new(id: i64, latitude: f64, longitude: f64) -> HotspotResult<Self> {
        if !latitude.is_finite() {
            return Err(HotspotError::InvalidPoint {
                id,
                reason: format!("latitude is not finite ({latitude})"),
            });
        }
        if !longitude.is_finite() {
            return Err(HotspotError::InvalidPoint {
                id,
                reason: format!("longitude is not finite ({longitude})"),
            });
        }
        Ok(Self {
            id,
            latitude,
            longitude,
            category: String::new(),
            status: String::new(),
            created_at: None,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Planar coordinate with x = longitude, y = latitude.
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// `(latitude, longitude)` in the order map overlays expect.
    pub fn lat_lon(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite_coordinates() {
        assert!(matches!(
            GeoPoint::new(7, f64::NAN, 10.0),
            Err(HotspotError::InvalidPoint { id: 7, .. })
        ));
        assert!(matches!(
            GeoPoint::new(8, 10.0, f64::INFINITY),
            Err(HotspotError::InvalidPoint { id: 8, .. })
        ));
    }

    #[test]
    fn test_coord_axis_order() {
        let p = GeoPoint::new(1, 51.17, 71.45).unwrap();
        assert_eq!(p.coord(), Coord { x: 71.45, y: 51.17 });
        assert_eq!(p.lat_lon(), (51.17, 71.45));
    }

    #[test]
    fn test_serializes_with_map_field_names() {
        let p = GeoPoint::new(3, 1.5, 2.5)
            .unwrap()
            .with_category("pothole")
            .with_status("new");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["lat"], 1.5);
        assert_eq!(json["lon"], 2.5);
        assert_eq!(json["category"], "pothole");
        assert!(json.get("created_at").is_none());

        let back: GeoPoint = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_deserialization_rejects_non_finite_coordinates() {
        let stored = StoredGeoPoint {
            id: 5,
            lat: f64::NAN,
            lon: 71.45,
            category: String::new(),
            status: String::new(),
            created_at: None,
        };
        assert!(matches!(
            GeoPoint::try_from(stored),
            Err(HotspotError::InvalidPoint { id: 5, .. })
        ));
    }
}
