//! Request paths for every catalog endpoint.
//!
//! Three API generations coexist: legacy `/api/...`, `/api/latest/...` for
//! products and `/api/v3/...` for campaigns and maintenance.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

pub const AUTH_VERIFY: &str = "/api/auth/verify";
pub const TAXONOMY: &str = "/api/config/taxonomy";
pub const STATIONS: &str = "/api/stations";
pub const INSTRUMENTS: &str = "/api/instruments";
pub const PRODUCTS: &str = "/api/latest/products";
pub const CAMPAIGNS: &str = "/api/v3/campaigns";
pub const MAINTENANCE: &str = "/api/v3/maintenance";

/// Query for one page of campaigns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignQuery {
    pub page: u32,
    pub per_page: u32,
    pub station: Option<String>,
    pub status: Option<String>,
    pub campaign_type: Option<String>,
}

pub fn station(acronym: &str) -> String {
    format!("{STATIONS}/{}", encode_component(acronym))
}

pub fn station_aoi(acronym: &str) -> String {
    format!("{STATIONS}/{}/aoi", encode_component(acronym))
}

pub fn platforms(acronym: &str) -> String {
    format!("/api/platforms?station={}", encode_component(acronym))
}

pub fn instruments(acronym: &str) -> String {
    format!("{INSTRUMENTS}?station={}", encode_component(acronym))
}

pub fn instrument(id: i64) -> String {
    format!("{INSTRUMENTS}/{id}")
}

pub fn instrument_rois(id: i64) -> String {
    format!("{INSTRUMENTS}/{id}/rois")
}

pub fn products(acronym: &str) -> String {
    format!("{PRODUCTS}?station={}", encode_component(acronym))
}

pub fn product(id: i64) -> String {
    format!("{PRODUCTS}/{id}")
}

pub fn campaigns(query: &CampaignQuery) -> String {
    let mut params = vec![
        format!("page={}", query.page.max(1)),
        format!("per_page={}", query.per_page.max(1)),
    ];
    if let Some(station) = query.station.as_deref().filter(|s| !s.is_empty()) {
        params.push(format!("station={}", encode_component(station)));
    }
    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        params.push(format!("status={}", encode_component(status)));
    }
    if let Some(kind) = query.campaign_type.as_deref().filter(|s| !s.is_empty()) {
        params.push(format!("campaign_type={}", encode_component(kind)));
    }
    format!("{CAMPAIGNS}?{}", params.join("&"))
}

pub fn campaign(id: i64) -> String {
    format!("{CAMPAIGNS}/{id}")
}

pub fn maintenance_for(entity_type: &str, entity_id: i64) -> String {
    format!(
        "{MAINTENANCE}?entity_type={}&entity_id={entity_id}",
        encode_component(entity_type)
    )
}

pub fn maintenance_record(id: i64) -> String {
    format!("{MAINTENANCE}/{id}")
}

/// Create (`None`) goes to the collection; update goes to the item.
pub fn save_target(collection: &str, id: Option<i64>) -> String {
    match id {
        Some(id) => format!("{collection}/{id}"),
        None => collection.to_owned(),
    }
}

/// Percent-encode everything outside RFC 3986 unreserved characters.
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
