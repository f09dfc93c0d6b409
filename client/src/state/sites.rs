//! SITES station dashboard state: platform grid, selected platform's
//! instruments with photos, products and maintenance.

#[cfg(test)]
#[path = "sites_test.rs"]
mod sites_test;

use std::collections::{BTreeSet, HashMap};

use catalog::query::{self, ProductSort, SortDirection};
use catalog::taxonomy::normalize_key;
use catalog::{Instrument, MaintenanceRecord, Platform, Product, Roi, Station};
use serde_json::Value;

use crate::net::{ApiError, CatalogApi};
use crate::util::images::ImageManifest;

/// Everything loaded up front for one station.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SitesData {
    pub station: Station,
    pub platforms: Vec<Platform>,
    pub instruments: Vec<Instrument>,
    pub products: Vec<Product>,
    pub aoi: Option<Value>,
}

/// Load the station and its lists concurrently.
///
/// Products and the AOI are optional extras: their failures are logged and
/// leave them empty instead of failing the page.
///
/// # Errors
///
/// Fails when the station, platform or instrument request fails.
pub async fn load<A: CatalogApi>(api: &A, acronym: &str) -> Result<SitesData, ApiError> {
    let (station, platforms, instruments, products, aoi) = futures::join!(
        api.station(acronym),
        api.platforms(acronym),
        api.instruments(acronym),
        api.products(acronym),
        api.station_aoi(acronym),
    );
    let products = products.unwrap_or_else(|e| {
        log::warn!("products for {acronym} unavailable: {e}");
        Vec::new()
    });
    let aoi = aoi.unwrap_or_else(|e| {
        log::warn!("AOI for {acronym} unavailable: {e}");
        None
    });
    Ok(SitesData {
        station: station?,
        platforms: platforms?,
        instruments: instruments?,
        products,
        aoi,
    })
}

/// Resolve one photo per instrument, one after another.
///
/// A missing manifest means no photos rather than an error.
pub async fn load_photos<A: CatalogApi>(
    api: &A,
    base_path: &str,
    instruments: &[Instrument],
) -> HashMap<i64, Option<String>> {
    let manifest = match api.image_manifest().await {
        Ok(manifest) => manifest,
        Err(e) => {
            log::warn!("image manifest unavailable: {e}");
            ImageManifest::default()
        }
    };
    manifest.resolve_all(base_path, instruments).into_iter().collect()
}

/// ROIs for every instrument on a platform, fetched in sequence.
pub async fn load_platform_rois<A: CatalogApi>(api: &A, instruments: &[&Instrument]) -> Vec<(i64, Vec<Roi>)> {
    let mut out = Vec::with_capacity(instruments.len());
    for instrument in instruments {
        match api.instrument_rois(instrument.id).await {
            Ok(rois) => out.push((instrument.id, rois)),
            Err(e) => log::warn!("ROIs for instrument {} unavailable: {e}", instrument.id),
        }
    }
    out
}

/// Delete a product and report the outcome as a toast message.
///
/// # Errors
///
/// Propagates the API failure.
pub async fn delete_product<A: CatalogApi>(api: &A, product: &Product) -> Result<String, ApiError> {
    api.delete_product(product.id).await?;
    Ok(format!("Product \"{}\" deleted", product.name))
}

/// Maintenance history for one entity.
///
/// # Errors
///
/// Propagates the API failure.
pub async fn load_maintenance<A: CatalogApi>(
    api: &A,
    entity_type: &str,
    entity_id: i64,
) -> Result<Vec<MaintenanceRecord>, ApiError> {
    api.maintenance(entity_type, entity_id).await
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SitesDashboardState {
    pub data: SitesData,
    pub ecosystem_filter: Option<String>,
    pub selected_platform: Option<i64>,
    pub photos: HashMap<i64, Option<String>>,
    pub product_query: String,
    pub product_sort: ProductSort,
    pub product_direction: SortDirection,
    /// Maintenance for the entity the maintenance panel is showing.
    pub maintenance: Vec<MaintenanceRecord>,
    pub maintenance_target: Option<(String, i64)>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SitesDashboardState {
    pub fn set_data(&mut self, data: SitesData) {
        if let Some(selected) = self.selected_platform {
            if !data.platforms.iter().any(|p| p.id == selected) {
                self.selected_platform = None;
            }
        }
        self.data = data;
        self.loading = false;
        self.error = None;
    }

    pub fn set_error(&mut self, err: &ApiError) {
        self.loading = false;
        self.error = Some(err.to_string());
    }

    /// Ecosystem codes present on this station, for the filter chips.
    #[must_use]
    pub fn ecosystems(&self) -> Vec<String> {
        self.data
            .platforms
            .iter()
            .filter_map(|p| p.ecosystem_code.as_deref())
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Platforms passing the ecosystem filter, sorted by name.
    #[must_use]
    pub fn visible_platforms(&self) -> Vec<&Platform> {
        let wanted = self.ecosystem_filter.as_deref().map(normalize_key);
        let mut platforms: Vec<&Platform> = self
            .data
            .platforms
            .iter()
            .filter(|p| match wanted.as_deref().filter(|w| !w.is_empty()) {
                None => true,
                Some(w) => p.ecosystem_code.as_deref().is_some_and(|c| normalize_key(c) == w),
            })
            .collect();
        query::sort_refs(&mut platforms, query::PlatformSort::Name, SortDirection::Ascending);
        platforms
    }

    /// Change the ecosystem filter; a selection it hides is cleared.
    pub fn set_ecosystem_filter(&mut self, filter: Option<String>) {
        self.ecosystem_filter = filter.filter(|f| !f.trim().is_empty());
        if let Some(selected) = self.selected_platform {
            if !self.visible_platforms().iter().any(|p| p.id == selected) {
                self.selected_platform = None;
            }
        }
    }

    /// Clicking the selected platform again deselects it.
    pub fn select_platform(&mut self, platform_id: i64) {
        self.selected_platform = if self.selected_platform == Some(platform_id) {
            None
        } else {
            Some(platform_id)
        };
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Platform> {
        let id = self.selected_platform?;
        self.data.platforms.iter().find(|p| p.id == id)
    }

    /// Instruments on the selected platform, by name.
    #[must_use]
    pub fn selected_instruments(&self) -> Vec<&Instrument> {
        let Some(platform_id) = self.selected_platform else {
            return Vec::new();
        };
        let mut rows: Vec<&Instrument> = self
            .data
            .instruments
            .iter()
            .filter(|i| i.platform_id == platform_id)
            .collect();
        query::sort_refs(&mut rows, query::InstrumentSort::Name, SortDirection::Ascending);
        rows
    }

    /// Instrument count per platform, preferring the API's own count.
    #[must_use]
    pub fn instrument_count(&self, platform: &Platform) -> u32 {
        platform.instrument_count.unwrap_or_else(|| {
            let n = self
                .data
                .instruments
                .iter()
                .filter(|i| i.platform_id == platform.id)
                .count();
            u32::try_from(n).unwrap_or(u32::MAX)
        })
    }

    pub fn photo(&self, instrument_id: i64) -> Option<&str> {
        self.photos.get(&instrument_id).and_then(Option::as_deref)
    }

    /// Products after search and sort.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        let mut rows = query::filter_items(&self.data.products, &self.product_query);
        query::sort_refs(&mut rows, self.product_sort, self.product_direction);
        rows
    }

    pub fn toggle_product_sort(&mut self, field: ProductSort) {
        if self.product_sort == field {
            self.product_direction = self.product_direction.toggled();
        } else {
            self.product_sort = field;
            self.product_direction = SortDirection::Ascending;
        }
    }

    /// Point the maintenance panel at another entity, dropping old rows.
    pub fn set_maintenance_target(&mut self, entity_type: &str, entity_id: i64) {
        let target = (entity_type.to_owned(), entity_id);
        if self.maintenance_target.as_ref() != Some(&target) {
            self.maintenance.clear();
        }
        self.maintenance_target = Some(target);
    }

    /// Maintenance rows, earliest scheduled first.
    #[must_use]
    pub fn visible_maintenance(&self) -> Vec<&MaintenanceRecord> {
        let mut rows: Vec<&MaintenanceRecord> = self.maintenance.iter().collect();
        query::sort_refs(&mut rows, query::MaintenanceSort::Scheduled, SortDirection::Ascending);
        rows
    }
}
