//! Entity records as returned by the catalog REST API.
//!
//! DESIGN
//! ======
//! The API is the source of truth, so nearly every field is optional and
//! unknown fields are ignored. Records are display/edit payloads only; the
//! front-end never derives lifecycle state from them.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A research station (top of the catalog hierarchy).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Station {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub acronym: String,
    pub display_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// A mounting platform (tower, mast, building) at a station.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub station_id: i64,
    pub display_name: String,
    pub normalized_name: String,
    pub ecosystem_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub height_m: Option<f64>,
    pub mounting_structure: Option<String>,
    pub status: Option<String>,
    pub instrument_count: Option<u32>,
}

/// A measuring instrument (phenocam, multispectral sensor, ...) on a platform.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instrument {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub platform_id: i64,
    pub normalized_name: String,
    pub display_name: String,
    pub instrument_type: Option<String>,
    pub status: Option<String>,
    pub measurement_status: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub height_m: Option<f64>,
    pub viewing_direction: Option<String>,
    pub azimuth_degrees: Option<f64>,
    pub degrees_from_nadir: Option<f64>,
    pub camera_brand: Option<String>,
    pub camera_model: Option<String>,
    pub camera_resolution: Option<String>,
    pub camera_serial_number: Option<String>,
    pub camera_lens: Option<String>,
    pub camera_focal_length_mm: Option<f64>,
    pub camera_iso: Option<String>,
    pub camera_white_balance: Option<String>,
    pub sensor_brand: Option<String>,
    pub sensor_model: Option<String>,
    pub sensor_serial_number: Option<String>,
    pub number_of_channels: Option<u32>,
    pub wavelengths: Option<String>,
    pub deployment_date: Option<String>,
    pub decommission_date: Option<String>,
    pub calibration_date: Option<String>,
    pub first_measurement_year: Option<i32>,
    pub last_measurement_year: Option<i32>,
    pub roi_count: Option<u32>,
    pub description: Option<String>,
}

/// A region of interest drawn on a phenocam image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roi {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub instrument_id: i64,
    pub roi_name: String,
    pub description: Option<String>,
    pub color: Option<[u8; 3]>,
    pub points: Vec<[f64; 2]>,
    pub alpha: Option<f64>,
    pub thickness: Option<u32>,
    pub auto_generated: bool,
}

/// A planned or completed field campaign.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Campaign {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub station_id: Option<i64>,
    pub name: String,
    pub campaign_type: Option<String>,
    pub status: Option<String>,
    pub planned_start_datetime: Option<String>,
    pub planned_end_datetime: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_string_list")]
    pub objectives: Vec<String>,
    #[serde(deserialize_with = "deserialize_string_list")]
    pub expected_outcomes: Vec<String>,
    pub funding_source: Option<String>,
    pub budget: Option<f64>,
    pub coordinator: Option<String>,
}

/// A derived data product (time series, index, mosaic, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub name: String,
    pub product_type: Option<String>,
    pub processing_level: Option<String>,
    pub quality_score: Option<f64>,
    pub product_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub data_path: Option<String>,
    pub data_url: Option<String>,
    pub checksum: Option<String>,
    pub file_size_bytes: Option<u64>,
    pub citation: Option<String>,
    pub license: Option<String>,
    pub doi: Option<String>,
    pub instrument_id: Option<i64>,
    pub description: Option<String>,
}

/// A maintenance task attached to a station, platform or instrument.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub entity_type: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub entity_id: i64,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub scheduled_date: Option<String>,
    pub completed_date: Option<String>,
    pub description: String,
    pub technician: Option<String>,
}

/// Accept ids as JSON numbers or numeric strings; `null` maps to 0.
fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("id out of range: {n}"))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("invalid id: {s:?}"))),
        other => Err(D::Error::custom(format!("invalid id: {other}"))),
    }
}

/// Accept a string list as a JSON array, a JSON-encoded array string, or a
/// newline-separated string. Blank entries are dropped.
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(string_list_from_value(&value))
}

pub(crate) fn string_list_from_value(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s.trim().to_owned()),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        serde_json::Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.starts_with('[') {
                if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(trimmed) {
                    return string_list_from_value(&parsed);
                }
            }
            lines_to_list(trimmed)
        }
        _ => Vec::new(),
    }
}

/// Split free text into one trimmed entry per non-blank line.
#[must_use]
pub fn lines_to_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
