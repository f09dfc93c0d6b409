//! In-memory [`CatalogApi`] for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;

use catalog::envelope::ListResponse;
use catalog::{Campaign, Instrument, MaintenanceRecord, Platform, Product, Roi, Station, TaxonomyDocument};
use serde_json::Value;

use super::api::CatalogApi;
use super::endpoints::CampaignQuery;
use super::error::ApiError;
use crate::util::images::ImageManifest;

/// One recorded call: operation name plus the id and payload, if any.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Call {
    pub op: &'static str,
    pub id: Option<i64>,
    pub payload: Option<Value>,
}

#[derive(Default)]
pub(crate) struct MockApi {
    pub stations: Vec<Station>,
    pub platforms: Vec<Platform>,
    pub instruments: Vec<Instrument>,
    pub rois: HashMap<i64, Vec<Roi>>,
    pub products: Vec<Product>,
    pub campaigns: Vec<Campaign>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub aoi: Option<Value>,
    pub taxonomy: Option<TaxonomyDocument>,
    pub manifest: ImageManifest,
    failures: RefCell<HashMap<&'static str, ApiError>>,
    calls: RefCell<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call to `op` fail with `err`.
    pub fn fail(&self, op: &'static str, err: ApiError) {
        self.failures.borrow_mut().insert(op, err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Names of the calls made so far, in order.
    pub fn ops(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(|c| c.op).collect()
    }

    fn record(&self, op: &'static str, id: Option<i64>, payload: Option<&Value>) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call {
            op,
            id,
            payload: payload.cloned(),
        });
        match self.failures.borrow().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl CatalogApi for MockApi {
    async fn verify_session(&self) -> Result<(), ApiError> {
        self.record("verify_session", None, None)
    }

    async fn taxonomy(&self) -> Result<Option<TaxonomyDocument>, ApiError> {
        self.record("taxonomy", None, None)?;
        Ok(self.taxonomy.clone())
    }

    async fn stations(&self) -> Result<Vec<Station>, ApiError> {
        self.record("stations", None, None)?;
        Ok(self.stations.clone())
    }

    async fn station(&self, acronym: &str) -> Result<Station, ApiError> {
        self.record("station", None, None)?;
        self.stations
            .iter()
            .find(|s| s.acronym.eq_ignore_ascii_case(acronym))
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, ""))
    }

    async fn station_aoi(&self, _acronym: &str) -> Result<Option<Value>, ApiError> {
        self.record("station_aoi", None, None)?;
        Ok(self.aoi.clone())
    }

    async fn platforms(&self, _acronym: &str) -> Result<Vec<Platform>, ApiError> {
        self.record("platforms", None, None)?;
        Ok(self.platforms.clone())
    }

    async fn instruments(&self, _acronym: &str) -> Result<Vec<Instrument>, ApiError> {
        self.record("instruments", None, None)?;
        Ok(self.instruments.clone())
    }

    async fn instrument_rois(&self, instrument_id: i64) -> Result<Vec<Roi>, ApiError> {
        self.record("instrument_rois", Some(instrument_id), None)?;
        Ok(self.rois.get(&instrument_id).cloned().unwrap_or_default())
    }

    async fn save_instrument(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError> {
        self.record("save_instrument", id, Some(payload))
    }

    async fn patch_instrument(&self, id: i64, payload: &Value) -> Result<(), ApiError> {
        self.record("patch_instrument", Some(id), Some(payload))
    }

    async fn products(&self, _acronym: &str) -> Result<Vec<Product>, ApiError> {
        self.record("products", None, None)?;
        Ok(self.products.clone())
    }

    async fn save_product(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError> {
        self.record("save_product", id, Some(payload))
    }

    async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.record("delete_product", Some(id), None)
    }

    async fn campaigns(&self, query: &CampaignQuery) -> Result<ListResponse<Campaign>, ApiError> {
        self.record("campaigns", Some(i64::from(query.page)), None)?;
        Ok(ListResponse::Bare(self.campaigns.clone()))
    }

    async fn save_campaign(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError> {
        self.record("save_campaign", id, Some(payload))
    }

    async fn delete_campaign(&self, id: i64) -> Result<(), ApiError> {
        self.record("delete_campaign", Some(id), None)
    }

    async fn maintenance(&self, _entity_type: &str, entity_id: i64) -> Result<Vec<MaintenanceRecord>, ApiError> {
        self.record("maintenance", Some(entity_id), None)?;
        Ok(self
            .maintenance
            .iter()
            .filter(|m| m.entity_id == entity_id)
            .cloned()
            .collect())
    }

    async fn save_maintenance(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError> {
        self.record("save_maintenance", id, Some(payload))
    }

    async fn image_manifest(&self) -> Result<ImageManifest, ApiError> {
        self.record("image_manifest", None, None)?;
        Ok(self.manifest.clone())
    }
}
