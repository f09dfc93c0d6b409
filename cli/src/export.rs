//! Station export: nest a station's platforms, instruments and ROIs into one
//! JSON document.
//!
//! Rows stay as raw JSON so every column the API sends survives the export.
//! Ordering follows the catalog: platforms and instruments by display name,
//! ROIs by ROI name.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::CliError;

pub const META_KEY: &str = "_export_meta";

/// Totals written into the export's `_export_meta` block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportCounts {
    pub platforms: usize,
    pub instruments: usize,
    pub rois: usize,
}

/// Numeric id of a row; the API sends ids as numbers or numeric strings.
#[must_use]
pub fn row_id(row: &Value, key: &str) -> Option<i64> {
    row.get(key).and_then(parse_id)
}

fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn text_key<'a>(row: &'a Value, key: &str) -> &'a str {
    row.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn by_text(key: &'static str) -> impl Fn(&Value, &Value) -> Ordering {
    move |a, b| {
        let (a, b) = (text_key(a, key), text_key(b, key));
        a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
    }
}

/// Build `station → platforms → instruments → rois`.
///
/// Instruments attach to their platform through `platform_id`; instruments
/// whose platform is not in `platforms` are dropped. `rois` is keyed by
/// instrument id.
///
/// # Errors
///
/// Returns [`CliError::InvalidPayload`] when a station or platform row is not
/// a JSON object.
pub fn nest_station(
    station: Value,
    mut platforms: Vec<Value>,
    instruments: Vec<Value>,
    mut rois: HashMap<i64, Vec<Value>>,
) -> Result<(Value, ExportCounts), CliError> {
    let Value::Object(mut station) = station else {
        return Err(CliError::InvalidPayload("station"));
    };
    platforms.sort_by(by_text("display_name"));

    let mut by_platform: HashMap<i64, Vec<Value>> = HashMap::new();
    for instrument in instruments {
        if let Some(platform_id) = row_id(&instrument, "platform_id") {
            by_platform.entry(platform_id).or_default().push(instrument);
        }
    }

    let mut counts = ExportCounts {
        platforms: platforms.len(),
        ..ExportCounts::default()
    };
    let mut nested = Vec::with_capacity(platforms.len());
    for platform in platforms {
        let Value::Object(mut platform) = platform else {
            return Err(CliError::InvalidPayload("platform"));
        };
        let platform_id = platform.get("id").and_then(parse_id);
        let mut attached = platform_id.and_then(|id| by_platform.remove(&id)).unwrap_or_default();
        attached.sort_by(by_text("display_name"));
        counts.instruments += attached.len();

        for instrument in &mut attached {
            let mut instrument_rois = row_id(instrument, "id")
                .and_then(|id| rois.remove(&id))
                .unwrap_or_default();
            instrument_rois.sort_by(by_text("roi_name"));
            counts.rois += instrument_rois.len();
            if let Value::Object(fields) = instrument {
                fields.insert("rois".to_owned(), Value::Array(instrument_rois));
            }
        }
        platform.insert("instruments".to_owned(), Value::Array(attached));
        nested.push(Value::Object(platform));
    }

    station.insert("platforms".to_owned(), Value::Array(nested));
    Ok((Value::Object(station), counts))
}

/// Attach the `_export_meta` block.
pub fn stamp(export: &mut Value, counts: ExportCounts, exported_at: &str) {
    if let Value::Object(fields) = export {
        fields.insert(
            META_KEY.to_owned(),
            json!({
                "exported_at": exported_at,
                "platform_count": counts.platforms,
                "instrument_count": counts.instruments,
                "roi_count": counts.rois,
            }),
        );
    }
}

/// `<acronym lowercase>_export.json` inside `dir`.
#[must_use]
pub fn default_file_name(dir: &Path, acronym: &str) -> PathBuf {
    dir.join(format!("{}_export.json", acronym.trim().to_lowercase()))
}

/// Station acronyms from a stations listing, sorted and deduplicated.
#[must_use]
pub fn station_acronyms(stations: &[Value]) -> Vec<String> {
    let mut acronyms: Vec<String> = stations
        .iter()
        .map(|s| text_key(s, "acronym").trim().to_uppercase())
        .filter(|a| !a.is_empty())
        .collect();
    acronyms.sort();
    acronyms.dedup();
    acronyms
}

/// Human-readable station label for progress output.
#[must_use]
pub fn station_label(station: &Value, acronym: &str) -> String {
    match text_key(station, "display_name").trim() {
        "" => acronym.to_owned(),
        name => format!("{name} ({acronym})"),
    }
}

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;
