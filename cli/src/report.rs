//! Read-only reports over live catalog data: drift between an export file and
//! the catalog, and per-station totals.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde_json::Value;

use crate::export::{ExportCounts, row_id, text_key};

const STATION_FIELDS: [&str; 4] = ["display_name", "description", "latitude", "longitude"];
const PLATFORM_FIELDS: [&str; 4] = ["display_name", "status", "latitude", "longitude"];

/// One field whose exported value differs from the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldChange {
    /// Platform `normalized_name`; `None` for station fields.
    pub platform: Option<String>,
    pub field: &'static str,
    pub local: Value,
    pub live: Value,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationDiff {
    pub station: Vec<FieldChange>,
    pub platforms: Vec<FieldChange>,
    /// Platforms in the catalog but not in the file.
    pub live_only: Vec<String>,
    /// Platforms in the file but not in the catalog.
    pub local_only: Vec<String>,
}

impl StationDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.station.is_empty() && self.platforms.is_empty() && self.live_only.is_empty() && self.local_only.is_empty()
    }

    /// Printable report, catalog value first: `field: 'live' -> 'local'`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec!["  No differences found".to_owned()];
        }
        let mut out = Vec::new();
        if !self.station.is_empty() {
            out.push("Station:".to_owned());
            for change in &self.station {
                out.push(format!("  {}: '{}' -> '{}'", change.field, shown(&change.live), shown(&change.local)));
            }
        }
        if !self.platforms.is_empty() {
            out.push("Platforms:".to_owned());
            for change in &self.platforms {
                let name = change.platform.as_deref().unwrap_or_default();
                out.push(format!(
                    "  {name}.{}: '{}' -> '{}'",
                    change.field,
                    shown(&change.live),
                    shown(&change.local)
                ));
            }
        }
        for (heading, names) in [("Only in catalog:", &self.live_only), ("Only in file:", &self.local_only)] {
            if !names.is_empty() {
                out.push(heading.to_owned());
                out.extend(names.iter().map(|n| format!("  {n}")));
            }
        }
        out
    }
}

fn field(row: &Value, key: &str) -> Value {
    row.get(key).cloned().unwrap_or(Value::Null)
}

/// JSON equality with numbers compared by value, so `64` matches `64.0`.
fn same(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y).is_eq(),
            _ => x == y,
        },
        _ => a == b,
    }
}

fn shown(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn platforms_by_name(rows: &[Value]) -> BTreeMap<&str, &Value> {
    rows.iter()
        .filter_map(|row| {
            let name = text_key(row, "normalized_name").trim();
            (!name.is_empty()).then_some((name, row))
        })
        .collect()
}

/// Compare an exported station document against the live station and its
/// platforms. Platforms are matched by `normalized_name`.
#[must_use]
pub fn diff_station(local: &Value, live_station: &Value, live_platforms: &[Value]) -> StationDiff {
    let mut diff = StationDiff::default();
    for key in STATION_FIELDS {
        let (local, live) = (field(local, key), field(live_station, key));
        if !same(&local, &live) {
            diff.station.push(FieldChange {
                platform: None,
                field: key,
                local,
                live,
            });
        }
    }

    let local_rows = local
        .get("platforms")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let local_platforms = platforms_by_name(local_rows);
    let live = platforms_by_name(live_platforms);

    for (name, live_row) in &live {
        let Some(local_row) = local_platforms.get(name) else {
            diff.live_only.push((*name).to_owned());
            continue;
        };
        for key in PLATFORM_FIELDS {
            let (local, live) = (field(local_row, key), field(live_row, key));
            if !same(&local, &live) {
                diff.platforms.push(FieldChange {
                    platform: Some((*name).to_owned()),
                    field: key,
                    local,
                    live,
                });
            }
        }
    }
    diff.local_only = local_platforms
        .keys()
        .filter(|name| !live.contains_key(*name))
        .map(|name| (*name).to_owned())
        .collect();
    diff
}

/// Totals for one station row of `summary`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationSummary {
    pub acronym: String,
    pub display_name: String,
    pub counts: ExportCounts,
}

impl StationSummary {
    #[must_use]
    pub fn new(station: &Value, acronym: &str, counts: ExportCounts) -> Self {
        Self {
            acronym: acronym.to_owned(),
            display_name: text_key(station, "display_name").trim().to_owned(),
            counts,
        }
    }
}

#[must_use]
pub fn summary_table(rows: &[StationSummary]) -> Vec<String> {
    let rule = "-".repeat(70);
    let mut out = vec![
        "Station Summary:".to_owned(),
        rule.clone(),
        format!("{:<10} {:<25} {:>10} {:>12} {:>8}", "Station", "Name", "Platforms", "Instruments", "ROIs"),
        rule,
    ];
    for row in rows {
        let name: String = row.display_name.chars().take(24).collect();
        out.push(format!(
            "{:<10} {name:<25} {:>10} {:>12} {:>8}",
            row.acronym, row.counts.platforms, row.counts.instruments, row.counts.rois
        ));
    }
    out
}

/// Instrument count for one `instrument_type` value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeCount {
    pub instrument_type: String,
    pub count: usize,
    /// Distinct platforms carrying this type.
    pub platforms: usize,
}

/// Group instruments by their raw `instrument_type`, largest group first.
#[must_use]
pub fn instruments_by_type(instruments: &[Value]) -> Vec<TypeCount> {
    let mut groups: HashMap<&str, (usize, BTreeSet<i64>)> = HashMap::new();
    for instrument in instruments {
        let kind = match text_key(instrument, "instrument_type").trim() {
            "" => "(none)",
            kind => kind,
        };
        let entry = groups.entry(kind).or_default();
        entry.0 += 1;
        if let Some(platform_id) = row_id(instrument, "platform_id") {
            entry.1.insert(platform_id);
        }
    }
    let mut rows: Vec<TypeCount> = groups
        .into_iter()
        .map(|(kind, (count, platforms))| TypeCount {
            instrument_type: kind.to_owned(),
            count,
            platforms: platforms.len(),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.instrument_type.cmp(&b.instrument_type)));
    rows
}

#[must_use]
pub fn type_table(rows: &[TypeCount]) -> Vec<String> {
    let rule = "-".repeat(45);
    let mut out = vec![
        "Instruments by Type:".to_owned(),
        rule.clone(),
        format!("{:<20} {:>10} {:>12}", "Type", "Count", "Platforms"),
        rule,
    ];
    out.extend(
        rows.iter()
            .map(|row| format!("{:<20} {:>10} {:>12}", row.instrument_type, row.count, row.platforms)),
    );
    out
}

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;
