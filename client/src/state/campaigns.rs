//! Campaign manager state: one server page plus local search/filter/sort.
//!
//! Pagination is server-side (driven by `meta`/`links` on the response);
//! search, filters and sort apply to the rows of the current page.

#[cfg(test)]
#[path = "campaigns_test.rs"]
mod campaigns_test;

use catalog::envelope::{ListLinks, ListMeta, ListResponse};
use catalog::query::{self, CampaignSort, SortDirection};
use catalog::taxonomy::normalize_key;
use catalog::Campaign;

use crate::net::endpoints::CampaignQuery;
use crate::net::{ApiError, CatalogApi};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignManagerState {
    pub items: Vec<Campaign>,
    pub meta: Option<ListMeta>,
    pub links: Option<ListLinks>,
    pub page: u32,
    pub per_page: u32,
    /// Restrict the listing to one station.
    pub station: Option<String>,
    pub query: String,
    pub type_filter: Option<String>,
    pub status_filter: Option<String>,
    pub sort: CampaignSort,
    pub direction: SortDirection,
    pub loading: bool,
    pub error: Option<String>,
}

impl CampaignManagerState {
    #[must_use]
    pub fn new(per_page: u32, station: Option<String>) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            station,
            ..Self::default()
        }
    }

    /// Request for the current page. Type and status filters go to the
    /// server too so pages stay meaningful.
    #[must_use]
    pub fn request(&self) -> CampaignQuery {
        CampaignQuery {
            page: self.page.max(1),
            per_page: self.per_page.max(1),
            station: self.station.clone(),
            status: self.status_filter.clone(),
            campaign_type: self.type_filter.clone(),
        }
    }

    pub fn apply_response(&mut self, response: ListResponse<Campaign>) {
        self.meta = response.meta().cloned();
        self.links = response.links().cloned();
        if let Some(page) = self.meta.as_ref().and_then(|m| m.page) {
            self.page = page.max(1);
        }
        self.items = response.into_items();
        self.loading = false;
        self.error = None;
    }

    /// Apply `response` only if it answers the query the state would send
    /// now. Returns whether it was applied.
    pub fn apply_if_current(&mut self, sent: &CampaignQuery, response: ListResponse<Campaign>) -> bool {
        if self.request() != *sent {
            return false;
        }
        self.apply_response(response);
        true
    }

    /// Record a failure for `sent` unless a newer query has replaced it.
    pub fn set_error_if_current(&mut self, sent: &CampaignQuery, err: &ApiError) {
        if self.request() == *sent {
            self.set_error(err);
        }
    }

    pub fn set_error(&mut self, err: &ApiError) {
        self.loading = false;
        self.error = Some(err.to_string());
    }

    #[must_use]
    pub fn total_pages(&self) -> Option<u32> {
        self.meta.as_ref().and_then(ListMeta::page_count)
    }

    /// A next page exists per `links.next`, or per the page count.
    #[must_use]
    pub fn has_next(&self) -> bool {
        if let Some(links) = &self.links {
            if links.next.is_some() {
                return true;
            }
        }
        match self.total_pages() {
            Some(total) => self.page < total,
            // Bare responses carry no paging data; a full page hints at more.
            None => self.meta.is_none() && self.links.is_none() && self.items.len() >= self.per_page as usize,
        }
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1 || self.links.as_ref().is_some_and(|l| l.prev.is_some())
    }

    /// Move to the next page. Returns whether a fetch is needed.
    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Server-side filter change: back to page one.
    pub fn set_type_filter(&mut self, value: Option<String>) {
        self.type_filter = value.filter(|v| !v.trim().is_empty());
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, value: Option<String>) {
        self.status_filter = value.filter(|v| !v.trim().is_empty());
        self.page = 1;
    }

    pub fn toggle_sort(&mut self, field: CampaignSort) {
        if self.sort == field {
            self.direction = self.direction.toggled();
        } else {
            self.sort = field;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Rows of the current page after search, filters and sort.
    ///
    /// Filters are re-applied locally because older endpoints ignore them.
    #[must_use]
    pub fn visible(&self) -> Vec<&Campaign> {
        let type_filter = self.type_filter.as_deref().map(normalize_key);
        let status_filter = self.status_filter.as_deref().map(normalize_key);
        let mut rows: Vec<&Campaign> = query::filter_items(&self.items, &self.query)
            .into_iter()
            .filter(|c| {
                type_filter
                    .as_deref()
                    .is_none_or(|t| c.campaign_type.as_deref().is_some_and(|v| normalize_key(v) == t))
            })
            .filter(|c| {
                status_filter
                    .as_deref()
                    .is_none_or(|s| c.status.as_deref().is_some_and(|v| normalize_key(v) == s))
            })
            .collect();
        query::sort_refs(&mut rows, self.sort, self.direction);
        rows
    }

    /// "Page 2 of 5" style summary.
    #[must_use]
    pub fn page_label(&self) -> String {
        match self.total_pages() {
            Some(total) => format!("Page {} of {}", self.page, total.max(1)),
            None => format!("Page {}", self.page),
        }
    }
}

/// Fetch the page described by `state`.
///
/// # Errors
///
/// Propagates the API failure.
pub async fn load_page<A: CatalogApi>(api: &A, state: &CampaignManagerState) -> Result<ListResponse<Campaign>, ApiError> {
    api.campaigns(&state.request()).await
}

/// Delete a campaign and report the outcome as a toast message.
///
/// # Errors
///
/// Propagates the API failure.
pub async fn delete<A: CatalogApi>(api: &A, campaign: &Campaign) -> Result<String, ApiError> {
    api.delete_campaign(campaign.id).await?;
    Ok(format!("Campaign \"{}\" deleted", campaign.name))
}
