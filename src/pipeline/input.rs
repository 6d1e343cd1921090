// src/pipeline/input.rs

//! Input boundary: records from the complaint map endpoint become validated
//! [`GeoPoint`]s. Malformed records are dropped and reported, never fatal to
//! the batch.

use crate::math::{
    error::{HotspotError, HotspotResult},
    types::GeoPoint,
};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// One record as served by the complaint map endpoint.
///
/// Coordinates are optional here: a record with a missing or non-numeric
/// coordinate still deserialises and is rejected by [`ingest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl MapRecord {
    pub fn new(id: i64, lat: Option<f64>, lon: Option<f64>) -> Self {
        Self {
            id,
            lat,
            lon,
            category: String::new(),
            status: String::new(),
            created_at: None,
        }
    }
}

/// Numbers pass through, numeric strings are parsed, anything else is missing.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Naive ISO timestamps, or RFC 3339 with an offset converted to UTC.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::String(raw)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(raw
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(&raw).ok().map(|dt| dt.naive_utc())))
}

impl TryFrom<MapRecord> for GeoPoint {
    type Error = HotspotError;

    fn try_from(record: MapRecord) -> Result<Self, Self::Error> {
        let latitude = record.lat.ok_or_else(|| HotspotError::InvalidPoint {
            id: record.id,
            reason: "missing or non-numeric latitude".to_string(),
        })?;
        let longitude = record.lon.ok_or_else(|| HotspotError::InvalidPoint {
            id: record.id,
            reason: "missing or non-numeric longitude".to_string(),
        })?;

        let point = GeoPoint::new(record.id, latitude, longitude)?
            .with_category(record.category)
            .with_status(record.status);
        Ok(match record.created_at {
            Some(created_at) => point.with_created_at(created_at),
            None => point,
        })
    }
}

/// A record dropped at the input boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub id: i64,
    pub reason: String,
}

/// Result of [`ingest`]: accepted points in input order, plus rejections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingested {
    pub points: Vec<GeoPoint>,
    pub rejected: Vec<RejectedRecord>,
}

/// Validates records, keeping the input order of the accepted ones.
pub fn ingest(records: impl IntoIterator<Item = MapRecord>) -> Ingested {
    let mut ingested = Ingested::default();

    for record in records {
        let id = record.id;
        match GeoPoint::try_from(record) {
            Ok(point) => ingested.points.push(point),
            Err(err) => {
                let reason = match err {
                    HotspotError::InvalidPoint { reason, .. } => reason,
                    other => other.to_string(),
                };
                warn!(id, %reason, "dropping malformed map record");
                ingested.rejected.push(RejectedRecord { id, reason });
            }
        }
    }

    ingested
}

/// Parses the JSON array served by the map endpoint.
pub fn parse_records(json: &str) -> HotspotResult<Vec<MapRecord>> {
    Ok(serde_json::from_str(json)?)
}
