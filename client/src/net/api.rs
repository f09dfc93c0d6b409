//! REST API client for the catalog backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net` with the stored bearer
//! token. Native builds (tests, tooling) get [`ApiError::Unavailable`] from
//! every call, so pages and state compile everywhere and tests go through a
//! mock [`CatalogApi`] instead.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. A 401 additionally clears the
//! stored session and sends the browser to the login page before the error
//! reaches the caller, so callers only decide between a toast and a rollback.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use catalog::envelope::{ItemResponse, ListResponse};
use catalog::{Campaign, Instrument, MaintenanceRecord, Platform, Product, Roi, Station, TaxonomyDocument};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::endpoints::{self, CampaignQuery};
use super::error::ApiError;
use crate::config::ClientConfig;
use crate::util::images::ImageManifest;

/// Every backend call the pages make.
///
/// Futures are not `Send`; they run on the single-threaded WASM executor.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// Check the stored token is still accepted.
    async fn verify_session(&self) -> Result<(), ApiError>;
    /// Server taxonomy document; `None` when the endpoint is absent.
    async fn taxonomy(&self) -> Result<Option<TaxonomyDocument>, ApiError>;
    async fn stations(&self) -> Result<Vec<Station>, ApiError>;
    async fn station(&self, acronym: &str) -> Result<Station, ApiError>;
    /// Station boundary as a GeoJSON object; `None` when none is recorded.
    async fn station_aoi(&self, acronym: &str) -> Result<Option<Value>, ApiError>;
    async fn platforms(&self, acronym: &str) -> Result<Vec<Platform>, ApiError>;
    async fn instruments(&self, acronym: &str) -> Result<Vec<Instrument>, ApiError>;
    async fn instrument_rois(&self, instrument_id: i64) -> Result<Vec<Roi>, ApiError>;
    /// POST when `id` is `None`, otherwise PUT.
    async fn save_instrument(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError>;
    /// Partial update of a few instrument fields.
    async fn patch_instrument(&self, id: i64, payload: &Value) -> Result<(), ApiError>;
    async fn products(&self, acronym: &str) -> Result<Vec<Product>, ApiError>;
    async fn save_product(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError>;
    async fn delete_product(&self, id: i64) -> Result<(), ApiError>;
    async fn campaigns(&self, query: &CampaignQuery) -> Result<ListResponse<Campaign>, ApiError>;
    async fn save_campaign(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError>;
    async fn delete_campaign(&self, id: i64) -> Result<(), ApiError>;
    async fn maintenance(&self, entity_type: &str, entity_id: i64) -> Result<Vec<MaintenanceRecord>, ApiError>;
    async fn save_maintenance(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError>;
    /// The static instrument photo manifest.
    async fn image_manifest(&self) -> Result<ImageManifest, ApiError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    fn for_save(id: Option<i64>) -> Self {
        if id.is_some() { Self::Put } else { Self::Post }
    }
}

/// [`CatalogApi`] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpApi {
    config: ClientConfig,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<String, ApiError> {
        let url = self.config.api_url(path);
        let (status, text) = self.send(method, &url, body).await?;
        if (200..300).contains(&status) {
            return Ok(text);
        }
        let err = ApiError::from_status(status, &text);
        if err.is_unauthorized() {
            crate::state::auth::expire_session(&self.config.login_url);
        } else {
            log::warn!("{method:?} {path} failed: {err}");
        }
        Err(err)
    }

    /// GET that maps 404 to `None` instead of an error.
    async fn get_optional(&self, path: &str) -> Result<Option<String>, ApiError> {
        match self.request(Method::Get, path, None).await {
            Ok(text) => Ok(Some(text)),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[cfg(feature = "csr")]
    async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<(u16, String), ApiError> {
        use gloo_net::http::Request;

        let mut builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        }
        .header("Accept", "application/json");
        if let Some(token) = crate::state::auth::stored_token() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Ok((status, text))
    }

    #[cfg(not(feature = "csr"))]
    async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<(u16, String), ApiError> {
        let _ = (method, url, body);
        Err(ApiError::Unavailable)
    }
}

impl CatalogApi for HttpApi {
    async fn verify_session(&self) -> Result<(), ApiError> {
        if crate::state::auth::stored_token().is_none() {
            crate::state::auth::expire_session(&self.config.login_url);
            return Err(ApiError::Unauthorized);
        }
        self.request(Method::Get, endpoints::AUTH_VERIFY, None).await.map(drop)
    }

    async fn taxonomy(&self) -> Result<Option<TaxonomyDocument>, ApiError> {
        self.get_optional(endpoints::TAXONOMY)
            .await?
            .map(|raw| decode_item::<TaxonomyDocument>(&raw))
            .transpose()
    }

    async fn stations(&self) -> Result<Vec<Station>, ApiError> {
        let raw = self.request(Method::Get, endpoints::STATIONS, None).await?;
        decode_list(&raw).map(ListResponse::into_items)
    }

    async fn station(&self, acronym: &str) -> Result<Station, ApiError> {
        let raw = self.request(Method::Get, &endpoints::station(acronym), None).await?;
        decode_item(&raw)
    }

    async fn station_aoi(&self, acronym: &str) -> Result<Option<Value>, ApiError> {
        let Some(raw) = self.get_optional(&endpoints::station_aoi(acronym)).await? else {
            return Ok(None);
        };
        let value: Value = decode_item(&raw)?;
        Ok((!value.is_null()).then_some(value))
    }

    async fn platforms(&self, acronym: &str) -> Result<Vec<Platform>, ApiError> {
        let raw = self.request(Method::Get, &endpoints::platforms(acronym), None).await?;
        decode_list(&raw).map(ListResponse::into_items)
    }

    async fn instruments(&self, acronym: &str) -> Result<Vec<Instrument>, ApiError> {
        let raw = self.request(Method::Get, &endpoints::instruments(acronym), None).await?;
        decode_list(&raw).map(ListResponse::into_items)
    }

    async fn instrument_rois(&self, instrument_id: i64) -> Result<Vec<Roi>, ApiError> {
        let raw = self
            .request(Method::Get, &endpoints::instrument_rois(instrument_id), None)
            .await?;
        decode_list(&raw).map(ListResponse::into_items)
    }

    async fn save_instrument(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError> {
        let path = endpoints::save_target(endpoints::INSTRUMENTS, id);
        self.request(Method::for_save(id), &path, Some(payload)).await.map(drop)
    }

    async fn patch_instrument(&self, id: i64, payload: &Value) -> Result<(), ApiError> {
        self.request(Method::Patch, &endpoints::instrument(id), Some(payload))
            .await
            .map(drop)
    }

    async fn products(&self, acronym: &str) -> Result<Vec<Product>, ApiError> {
        let raw = self.request(Method::Get, &endpoints::products(acronym), None).await?;
        decode_list(&raw).map(ListResponse::into_items)
    }

    async fn save_product(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError> {
        let path = endpoints::save_target(endpoints::PRODUCTS, id);
        self.request(Method::for_save(id), &path, Some(payload)).await.map(drop)
    }

    async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.request(Method::Delete, &endpoints::product(id), None).await.map(drop)
    }

    async fn campaigns(&self, query: &CampaignQuery) -> Result<ListResponse<Campaign>, ApiError> {
        let raw = self.request(Method::Get, &endpoints::campaigns(query), None).await?;
        decode_list(&raw)
    }

    async fn save_campaign(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError> {
        let path = endpoints::save_target(endpoints::CAMPAIGNS, id);
        self.request(Method::for_save(id), &path, Some(payload)).await.map(drop)
    }

    async fn delete_campaign(&self, id: i64) -> Result<(), ApiError> {
        self.request(Method::Delete, &endpoints::campaign(id), None).await.map(drop)
    }

    async fn maintenance(&self, entity_type: &str, entity_id: i64) -> Result<Vec<MaintenanceRecord>, ApiError> {
        let raw = self
            .request(Method::Get, &endpoints::maintenance_for(entity_type, entity_id), None)
            .await?;
        decode_list(&raw).map(ListResponse::into_items)
    }

    async fn save_maintenance(&self, id: Option<i64>, payload: &Value) -> Result<(), ApiError> {
        let path = endpoints::save_target(endpoints::MAINTENANCE, id);
        self.request(Method::for_save(id), &path, Some(payload)).await.map(drop)
    }

    async fn image_manifest(&self) -> Result<ImageManifest, ApiError> {
        // Static asset, so no API prefix and no auth handling.
        let (status, text) = self
            .send(Method::Get, &self.config.image_manifest_url, None)
            .await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::from_status(status, &text));
        }
        ImageManifest::from_json(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Decode a list body in either envelope or bare-array form.
pub(crate) fn decode_list<T: DeserializeOwned>(raw: &str) -> Result<ListResponse<T>, ApiError> {
    ListResponse::<T>::from_json(raw).map_err(ApiError::from)
}

/// Decode an item body in either `{ data }` or bare form.
pub(crate) fn decode_item<T: DeserializeOwned>(raw: &str) -> Result<T, ApiError> {
    serde_json::from_str::<ItemResponse<T>>(raw)
        .map(ItemResponse::into_inner)
        .map_err(|e| ApiError::Decode(e.to_string()))
}
