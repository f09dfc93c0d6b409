//! Type/status taxonomies and the provider interface that serves them.
//!
//! DESIGN
//! ======
//! Every label, icon and color the UI shows for a coded value comes from a
//! [`TaxonomyProvider`]. The app installs one provider at the root: a
//! [`LayeredTaxonomy`] whose primary layer is the server's taxonomy document
//! and whose fallback is [`BuiltinTaxonomy`]. A value unknown to both layers
//! resolves to a neutral [`Term::fallback`] instead of an error.

#[cfg(test)]
#[path = "taxonomy_test.rs"]
mod taxonomy_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Icon used for any value missing from every taxonomy layer.
pub const DEFAULT_ICON: &str = "fa-cube";
/// Color used for any value missing from every taxonomy layer.
pub const DEFAULT_COLOR: &str = "#6b7280";

/// A named set of coded values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocabulary {
    InstrumentType,
    InstrumentStatus,
    MeasurementStatus,
    Ecosystem,
    CampaignType,
    CampaignStatus,
    ProductType,
    ProcessingLevel,
    MaintenanceStatus,
    MaintenancePriority,
}

impl Vocabulary {
    pub const ALL: [Vocabulary; 10] = [
        Self::InstrumentType,
        Self::InstrumentStatus,
        Self::MeasurementStatus,
        Self::Ecosystem,
        Self::CampaignType,
        Self::CampaignStatus,
        Self::ProductType,
        Self::ProcessingLevel,
        Self::MaintenanceStatus,
        Self::MaintenancePriority,
    ];
}

/// One coded value with its presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Canonical key as stored by the API.
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Font Awesome icon class.
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Hex color used for markers, icons and chips.
    #[serde(default = "default_color")]
    pub color: String,
    /// Other spellings the API has been seen to send.
    #[serde(default)]
    pub aliases: Vec<String>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_owned()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_owned()
}

impl Term {
    fn builtin(key: &str, label: &str, icon: &str, color: &str, aliases: &[&str]) -> Self {
        Self {
            key: key.to_owned(),
            label: label.to_owned(),
            icon: icon.to_owned(),
            color: color.to_owned(),
            aliases: aliases.iter().map(|a| (*a).to_owned()).collect(),
        }
    }

    /// Neutral term for a value no taxonomy layer knows.
    #[must_use]
    pub fn fallback(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty());
        Self {
            key: raw.map(normalize_key).unwrap_or_default(),
            label: raw.map_or_else(|| "Unknown".to_owned(), humanize),
            icon: default_icon(),
            color: default_color(),
            aliases: Vec::new(),
        }
    }

    /// Whether `raw` names this term (key or alias, normalized).
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        let needle = normalize_key(raw);
        normalize_key(&self.key) == needle || self.aliases.iter().any(|a| normalize_key(a) == needle)
    }

    /// CSS modifier derived from the key, e.g. `in_progress` -> `in-progress`.
    #[must_use]
    pub fn css_modifier(&self) -> String {
        if self.key.is_empty() {
            "unknown".to_owned()
        } else {
            self.key.replace('_', "-")
        }
    }
}

/// Lowercase and collapse separators so `Multispectral Sensor`,
/// `multispectral-sensor` and `MULTISPECTRAL_SENSOR` compare equal.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_sep = false;
    for ch in raw.trim().chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_sep = false;
        } else if !last_sep && !out.is_empty() {
            out.push('_');
            last_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// `in_progress` -> `In progress`.
#[must_use]
pub fn humanize(raw: &str) -> String {
    let spaced = raw.trim().replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Source of taxonomy terms for labels, icons and colors.
pub trait TaxonomyProvider: Send + Sync {
    /// All terms for a vocabulary, in display order.
    fn terms(&self, vocab: Vocabulary) -> Vec<Term>;

    /// Find the term for a raw value, if this provider knows it.
    fn lookup(&self, vocab: Vocabulary, raw: &str) -> Option<Term> {
        self.terms(vocab).into_iter().find(|t| t.matches(raw))
    }

    /// Resolve a possibly missing value, falling back to a neutral term.
    fn resolve(&self, vocab: Vocabulary, raw: Option<&str>) -> Term {
        raw.and_then(|r| self.lookup(vocab, r))
            .unwrap_or_else(|| Term::fallback(raw))
    }
}

/// Hardcoded tables matching the catalog's canonical vocabularies.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinTaxonomy;

impl TaxonomyProvider for BuiltinTaxonomy {
    fn terms(&self, vocab: Vocabulary) -> Vec<Term> {
        let rows: &[(&str, &str, &str, &str, &[&str])] = match vocab {
            Vocabulary::InstrumentType => &[
                ("phenocam", "Phenocam", "fa-camera", "#2563eb", &["PHE", "camera"]),
                ("multispectral_sensor", "Multispectral Sensor", "fa-satellite-dish", "#7c3aed", &["MS", "multispectral"]),
                ("hyperspectral_sensor", "Hyperspectral Sensor", "fa-rainbow", "#db2777", &["HYP", "hyperspectral"]),
                ("par_sensor", "PAR Sensor", "fa-sun", "#f59e0b", &["PAR"]),
                ("ndvi_sensor", "NDVI Sensor", "fa-leaf", "#16a34a", &["NDVI"]),
                ("pri_sensor", "PRI Sensor", "fa-seedling", "#0d9488", &["PRI"]),
                ("radiometer", "Radiometer", "fa-broadcast-tower", "#0891b2", &["RAD"]),
            ],
            Vocabulary::InstrumentStatus => &[
                ("active", "Active", "fa-circle-check", "#16a34a", &[]),
                ("inactive", "Inactive", "fa-circle-pause", "#6b7280", &[]),
                ("testing", "Testing", "fa-flask", "#0891b2", &[]),
                ("maintenance", "Maintenance", "fa-wrench", "#f59e0b", &["under_maintenance"]),
                ("planned", "Planned", "fa-calendar", "#2563eb", &[]),
                ("decommissioned", "Decommissioned", "fa-ban", "#dc2626", &["removed"]),
            ],
            Vocabulary::MeasurementStatus => &[
                ("operational", "Operational", "fa-signal", "#16a34a", &["active"]),
                ("intermittent", "Intermittent", "fa-wave-square", "#f59e0b", &[]),
                ("stopped", "Stopped", "fa-stop", "#dc2626", &["inactive"]),
                ("not_started", "Not started", "fa-hourglass-start", "#6b7280", &[]),
            ],
            Vocabulary::Ecosystem => &[
                ("FOR", "Forest", "fa-tree", "#166534", &["forest"]),
                ("AGR", "Arable Land", "fa-wheat-awn", "#ca8a04", &["agriculture"]),
                ("MIR", "Mires", "fa-water", "#0e7490", &["mire"]),
                ("LAK", "Lake", "fa-water", "#1d4ed8", &["lake"]),
                ("WET", "Wetland", "fa-droplet", "#0891b2", &["wetland"]),
                ("GRA", "Grassland", "fa-seedling", "#65a30d", &["grassland"]),
                ("HEA", "Heathland", "fa-spa", "#a16207", &["heath"]),
                ("ALP", "Alpine Forest", "fa-mountain", "#475569", &["alpine"]),
                ("CON", "Coniferous Forest", "fa-tree", "#14532d", &["coniferous"]),
                ("DEC", "Deciduous Forest", "fa-tree", "#4d7c0f", &["deciduous"]),
                ("MAR", "Marshland", "fa-water", "#0f766e", &["marsh"]),
                ("PEA", "Peatland", "fa-layer-group", "#78350f", &["peat"]),
                ("SHR", "Shrubland", "fa-spa", "#84cc16", &["shrub"]),
            ],
            Vocabulary::CampaignType => &[
                ("field_campaign", "Field Campaign", "fa-person-hiking", "#2563eb", &["field"]),
                ("calibration", "Calibration", "fa-sliders", "#7c3aed", &[]),
                ("validation", "Validation", "fa-clipboard-check", "#0d9488", &[]),
                ("maintenance", "Maintenance", "fa-wrench", "#f59e0b", &[]),
                ("research", "Research", "fa-microscope", "#db2777", &[]),
                ("monitoring", "Monitoring", "fa-chart-line", "#16a34a", &[]),
            ],
            Vocabulary::CampaignStatus => &[
                ("planned", "Planned", "fa-calendar", "#2563eb", &["planning"]),
                ("active", "Active", "fa-play", "#16a34a", &["ongoing", "in_progress"]),
                ("on_hold", "On Hold", "fa-pause", "#f59e0b", &["paused"]),
                ("completed", "Completed", "fa-check", "#0d9488", &["done"]),
                ("cancelled", "Cancelled", "fa-xmark", "#dc2626", &["canceled"]),
            ],
            Vocabulary::ProductType => &[
                ("time_series", "Time Series", "fa-chart-line", "#2563eb", &["timeseries"]),
                ("vegetation_index", "Vegetation Index", "fa-leaf", "#16a34a", &["index"]),
                ("image_collection", "Image Collection", "fa-images", "#7c3aed", &["images"]),
                ("phenology_metrics", "Phenology Metrics", "fa-calendar-days", "#0d9488", &["phenology"]),
                ("mosaic", "Mosaic", "fa-border-all", "#a16207", &[]),
                ("calibration_data", "Calibration Data", "fa-sliders", "#db2777", &["calibration"]),
            ],
            Vocabulary::ProcessingLevel => &[
                ("L0", "L0 – Raw", "fa-database", "#6b7280", &["level0"]),
                ("L1", "L1 – Calibrated", "fa-filter", "#2563eb", &["level1"]),
                ("L2", "L2 – Derived", "fa-gears", "#7c3aed", &["level2"]),
                ("L3", "L3 – Gridded", "fa-table-cells", "#0d9488", &["level3"]),
                ("L4", "L4 – Modelled", "fa-diagram-project", "#16a34a", &["level4"]),
            ],
            Vocabulary::MaintenanceStatus => &[
                ("pending", "Pending", "fa-clock", "#f59e0b", &["scheduled"]),
                ("in_progress", "In Progress", "fa-spinner", "#2563eb", &[]),
                ("completed", "Completed", "fa-check", "#16a34a", &["done"]),
                ("cancelled", "Cancelled", "fa-xmark", "#6b7280", &["canceled"]),
            ],
            Vocabulary::MaintenancePriority => &[
                ("low", "Low", "fa-arrow-down", "#6b7280", &[]),
                ("medium", "Medium", "fa-minus", "#2563eb", &["normal"]),
                ("high", "High", "fa-arrow-up", "#f59e0b", &[]),
                ("critical", "Critical", "fa-triangle-exclamation", "#dc2626", &["urgent"]),
            ],
        };
        rows.iter()
            .map(|(key, label, icon, color, aliases)| Term::builtin(key, label, icon, color, aliases))
            .collect()
    }
}

/// Taxonomy document served by `GET /api/config/taxonomy`.
///
/// Vocabularies absent from the document fall through to the next layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonomyDocument {
    pub vocabularies: HashMap<Vocabulary, Vec<Term>>,
}

impl TaxonomyProvider for TaxonomyDocument {
    fn terms(&self, vocab: Vocabulary) -> Vec<Term> {
        self.vocabularies.get(&vocab).cloned().unwrap_or_default()
    }
}

/// A primary provider backed by a fallback provider.
///
/// `terms` uses the primary list when it is non-empty; `lookup` tries the
/// primary first and then the fallback, so server-side additions extend the
/// built-in tables instead of hiding them.
pub struct LayeredTaxonomy<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> LayeredTaxonomy<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl LayeredTaxonomy<TaxonomyDocument, BuiltinTaxonomy> {
    /// Built-in tables only; used until (or if) the server document loads.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(TaxonomyDocument::default(), BuiltinTaxonomy)
    }
}

impl<P: TaxonomyProvider, F: TaxonomyProvider> TaxonomyProvider for LayeredTaxonomy<P, F> {
    fn terms(&self, vocab: Vocabulary) -> Vec<Term> {
        let primary = self.primary.terms(vocab);
        if primary.is_empty() { self.fallback.terms(vocab) } else { primary }
    }

    fn lookup(&self, vocab: Vocabulary, raw: &str) -> Option<Term> {
        self.primary
            .lookup(vocab, raw)
            .or_else(|| self.fallback.lookup(vocab, raw))
    }
}
