//! Station dashboard state: instrument table with search, filters and sort.

#[cfg(test)]
#[path = "station_test.rs"]
mod station_test;

use std::collections::{BTreeSet, HashMap};

use catalog::query::{self, InstrumentSort, SortDirection};
use catalog::taxonomy::normalize_key;
use catalog::{Instrument, Platform, Station};

use crate::net::{ApiError, CatalogApi};
use crate::state::inline_edit::{self, CellEditor, EditRejected, PendingEdit};

/// Everything the dashboard loads for one station.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationData {
    pub station: Station,
    pub platforms: Vec<Platform>,
    pub instruments: Vec<Instrument>,
}

/// Fetch station, platforms and instruments concurrently.
///
/// # Errors
///
/// The station request must succeed; a failed platform or instrument list
/// also fails the load so the page can show one error.
pub async fn load<A: CatalogApi>(api: &A, acronym: &str) -> Result<StationData, ApiError> {
    let (station, platforms, instruments) =
        futures::join!(api.station(acronym), api.platforms(acronym), api.instruments(acronym));
    Ok(StationData {
        station: station?,
        platforms: platforms?,
        instruments: instruments?,
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationDashboardState {
    pub data: StationData,
    /// Applied search text (already debounced).
    pub query: String,
    pub type_filter: Option<String>,
    pub status_filter: Option<String>,
    pub sort: InstrumentSort,
    pub direction: SortDirection,
    pub editing: Option<CellEditor>,
    pub loading: bool,
    pub error: Option<String>,
}

impl StationDashboardState {
    /// Replace loaded data, keeping filters and sort.
    pub fn set_data(&mut self, data: StationData) {
        self.data = data;
        self.loading = false;
        self.error = None;
        if let Some(editor) = &self.editing {
            if !self.data.instruments.iter().any(|i| i.id == editor.row_id) {
                self.editing = None;
            }
        }
    }

    pub fn set_error(&mut self, err: &ApiError) {
        self.loading = false;
        self.error = Some(err.to_string());
    }

    /// Header click: same column flips direction, a new column starts ascending.
    pub fn toggle_sort(&mut self, field: InstrumentSort) {
        if self.sort == field {
            self.direction = self.direction.toggled();
        } else {
            self.sort = field;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Arrow for a header, shown only on the active column.
    #[must_use]
    pub fn sort_indicator(&self, field: InstrumentSort) -> &'static str {
        if self.sort == field { self.direction.arrow() } else { "" }
    }

    /// Rows after search, filters and sort.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&Instrument> {
        let type_filter = self.type_filter.as_deref().map(normalize_key);
        let status_filter = self.status_filter.as_deref().map(normalize_key);
        let mut rows: Vec<&Instrument> = query::filter_items(&self.data.instruments, &self.query)
            .into_iter()
            .filter(|i| matches_filter(i.instrument_type.as_deref(), type_filter.as_deref()))
            .filter(|i| matches_filter(i.status.as_deref(), status_filter.as_deref()))
            .collect();
        if self.sort == InstrumentSort::Platform {
            // Platform ids are meaningless to users; sort by the shown name.
            let names = self.platform_names();
            rows.sort_by(|a, b| {
                let ka = names.get(&a.platform_id).map(|n| n.to_lowercase());
                let kb = names.get(&b.platform_id).map(|n| n.to_lowercase());
                compare_optional(ka.as_ref(), kb.as_ref(), self.direction)
            });
        } else {
            query::sort_refs(&mut rows, self.sort, self.direction);
        }
        rows
    }

    fn platform_names(&self) -> HashMap<i64, &str> {
        self.data
            .platforms
            .iter()
            .map(|p| (p.id, p.display_name.as_str()))
            .collect()
    }

    /// Display name of a platform, or its id when unknown.
    #[must_use]
    pub fn platform_name(&self, platform_id: i64) -> String {
        self.data
            .platforms
            .iter()
            .find(|p| p.id == platform_id)
            .map_or_else(|| format!("#{platform_id}"), |p| p.display_name.clone())
    }

    /// Distinct raw values present for a column, for filter dropdowns.
    #[must_use]
    pub fn distinct_types(&self) -> Vec<String> {
        distinct(self.data.instruments.iter().map(|i| i.instrument_type.as_deref()))
    }

    #[must_use]
    pub fn distinct_statuses(&self) -> Vec<String> {
        distinct(self.data.instruments.iter().map(|i| i.status.as_deref()))
    }

    /// Close the open editor and apply `draft` to its row.
    ///
    /// `None` when no editor was open (a blur right after Enter).
    pub fn commit_editor(&mut self, draft: String) -> Option<Result<PendingEdit, EditRejected>> {
        let mut editor = self.editing.take()?;
        editor.draft = draft;
        Some(inline_edit::apply(&mut self.data.instruments, &editor))
    }

    pub fn instrument(&self, id: i64) -> Option<&Instrument> {
        self.data.instruments.iter().find(|i| i.id == id)
    }
}

fn matches_filter(value: Option<&str>, filter: Option<&str>) -> bool {
    match filter.filter(|f| !f.is_empty()) {
        None => true,
        Some(wanted) => value.is_some_and(|v| normalize_key(v) == wanted),
    }
}

fn compare_optional(a: Option<&String>, b: Option<&String>, direction: SortDirection) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Ascending => a.cmp(b),
            SortDirection::Descending => b.cmp(a),
        },
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
