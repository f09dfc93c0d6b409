//! Client-side search and sorting over entity lists.
//!
//! Search is a case-insensitive substring match over a handful of fields per
//! entity. Sorting is stable: ties keep their original order and missing
//! values always sort last, whichever direction is chosen.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::cmp::Ordering;

use time::PrimitiveDateTime;

use crate::dates;
use crate::model::{Campaign, Instrument, MaintenanceRecord, Platform, Product};

/// Entities that expose text fields to the search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Whether `item` matches `query` (blank queries match everything).
pub fn matches_query<T: Searchable>(item: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Items matching `query`, in their original order.
pub fn filter_items<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches_query(*item, query)).collect()
}

/// Sort direction for table headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Comparable projection of one field.
#[derive(Clone, Debug, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
    Time(PrimitiveDateTime),
    Missing,
}

impl SortKey {
    fn text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() { Self::Missing } else { Self::Text(trimmed.to_lowercase()) }
    }

    fn opt_text(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, Self::text)
    }

    fn opt_number(value: Option<f64>) -> Self {
        value.filter(|v| v.is_finite()).map_or(Self::Missing, Self::Number)
    }

    fn opt_time(value: Option<&str>) -> Self {
        value
            .and_then(|raw| dates::parse_timestamp(raw).ok())
            .map_or(Self::Missing, Self::Time)
    }

    fn compare(&self, other: &Self, direction: SortDirection) -> Ordering {
        let ordering = match (self, other) {
            (Self::Missing, Self::Missing) => return Ordering::Equal,
            (Self::Missing, _) => return Ordering::Greater,
            (_, Self::Missing) => return Ordering::Less,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            // Mixed kinds never happen for one field; keep input order.
            _ => Ordering::Equal,
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Entities that can be sorted by a field enum.
pub trait Sortable {
    type Field: Copy;
    fn sort_key(&self, field: Self::Field) -> SortKey;
}

/// Stable in-place sort by one field.
pub fn sort_items<T: Sortable>(items: &mut [T], field: T::Field, direction: SortDirection) {
    items.sort_by(|a, b| a.sort_key(field).compare(&b.sort_key(field), direction));
}

/// Stable sort of borrowed items (e.g. the output of [`filter_items`]).
pub fn sort_refs<T: Sortable>(items: &mut [&T], field: T::Field, direction: SortDirection) {
    items.sort_by(|a, b| a.sort_key(field).compare(&b.sort_key(field), direction));
}

impl Searchable for Instrument {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.display_name.as_str(), self.normalized_name.as_str()];
        fields.extend(self.instrument_type.as_deref());
        fields.extend(self.status.as_deref());
        fields.extend(self.camera_brand.as_deref());
        fields.extend(self.sensor_brand.as_deref());
        fields
    }
}

impl Searchable for Platform {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.display_name.as_str(), self.normalized_name.as_str()];
        fields.extend(self.ecosystem_code.as_deref());
        fields.extend(self.mounting_structure.as_deref());
        fields
    }
}

impl Searchable for Campaign {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.campaign_type.as_deref());
        fields.extend(self.coordinator.as_deref());
        fields
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.product_type.as_deref());
        fields.extend(self.processing_level.as_deref());
        fields.extend(self.description.as_deref());
        fields
    }
}

impl Searchable for MaintenanceRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str(), self.entity_type.as_str()];
        fields.extend(self.technician.as_deref());
        fields.extend(self.status.as_deref());
        fields
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstrumentSort {
    #[default]
    Name,
    Type,
    Platform,
    Status,
    MeasurementStatus,
    Deployed,
}

impl Sortable for Instrument {
    type Field = InstrumentSort;

    fn sort_key(&self, field: InstrumentSort) -> SortKey {
        match field {
            InstrumentSort::Name => SortKey::text(&self.display_name),
            InstrumentSort::Type => SortKey::opt_text(self.instrument_type.as_deref()),
            #[allow(clippy::cast_precision_loss)]
            InstrumentSort::Platform => SortKey::Number(self.platform_id as f64),
            InstrumentSort::Status => SortKey::opt_text(self.status.as_deref()),
            InstrumentSort::MeasurementStatus => SortKey::opt_text(self.measurement_status.as_deref()),
            InstrumentSort::Deployed => SortKey::opt_time(self.deployment_date.as_deref()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlatformSort {
    #[default]
    Name,
    Ecosystem,
    Instruments,
}

impl Sortable for Platform {
    type Field = PlatformSort;

    fn sort_key(&self, field: PlatformSort) -> SortKey {
        match field {
            PlatformSort::Name => SortKey::text(&self.display_name),
            PlatformSort::Ecosystem => SortKey::opt_text(self.ecosystem_code.as_deref()),
            PlatformSort::Instruments => SortKey::opt_number(self.instrument_count.map(f64::from)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CampaignSort {
    #[default]
    PlannedStart,
    Name,
    Status,
    Type,
}

impl Sortable for Campaign {
    type Field = CampaignSort;

    fn sort_key(&self, field: CampaignSort) -> SortKey {
        match field {
            CampaignSort::PlannedStart => SortKey::opt_time(self.planned_start_datetime.as_deref()),
            CampaignSort::Name => SortKey::text(&self.name),
            CampaignSort::Status => SortKey::opt_text(self.status.as_deref()),
            CampaignSort::Type => SortKey::opt_text(self.campaign_type.as_deref()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Name,
    Type,
    Level,
    Quality,
    Date,
}

impl Sortable for Product {
    type Field = ProductSort;

    fn sort_key(&self, field: ProductSort) -> SortKey {
        match field {
            ProductSort::Name => SortKey::text(&self.name),
            ProductSort::Type => SortKey::opt_text(self.product_type.as_deref()),
            ProductSort::Level => SortKey::opt_text(self.processing_level.as_deref()),
            ProductSort::Quality => SortKey::opt_number(self.quality_score),
            ProductSort::Date => SortKey::opt_time(self.product_date.as_deref()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaintenanceSort {
    #[default]
    Scheduled,
    Priority,
    Status,
}

impl Sortable for MaintenanceRecord {
    type Field = MaintenanceSort;

    fn sort_key(&self, field: MaintenanceSort) -> SortKey {
        match field {
            MaintenanceSort::Scheduled => SortKey::opt_time(self.scheduled_date.as_deref()),
            MaintenanceSort::Priority => SortKey::opt_number(self.priority.as_deref().map(priority_rank)),
            MaintenanceSort::Status => SortKey::opt_text(self.status.as_deref()),
        }
    }
}

/// Higher is more urgent; unknown priorities rank lowest.
fn priority_rank(priority: &str) -> f64 {
    match crate::taxonomy::normalize_key(priority).as_str() {
        "critical" | "urgent" => 4.0,
        "high" => 3.0,
        "medium" | "normal" => 2.0,
        "low" => 1.0,
        _ => 0.0,
    }
}
