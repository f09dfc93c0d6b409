//! Response envelopes used by the different API generations.
//!
//! Older endpoints return bare arrays/objects; newer ones wrap payloads as
//! `{ data, meta, links }`. Both shapes decode into the same types here so
//! callers never branch on endpoint generation.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Pagination metadata attached to enveloped list responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMeta {
    pub page: Option<u32>,
    #[serde(alias = "limit")]
    pub per_page: Option<u32>,
    #[serde(alias = "count")]
    pub total: Option<u64>,
    pub total_pages: Option<u32>,
}

impl ListMeta {
    /// Total page count, derived from `total / per_page` when not explicit.
    #[must_use]
    pub fn page_count(&self) -> Option<u32> {
        if let Some(pages) = self.total_pages {
            return Some(pages);
        }
        let total = self.total?;
        let per_page = u64::from(self.per_page.filter(|p| *p > 0)?);
        u32::try_from(total.div_ceil(per_page)).ok()
    }
}

/// Navigation links attached to enveloped list responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListLinks {
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
    #[serde(default)]
    meta: Option<ListMeta>,
    #[serde(default)]
    links: Option<ListLinks>,
}

/// A list payload in either enveloped or bare-array form.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Enveloped {
        data: Vec<T>,
        meta: Option<ListMeta>,
        links: Option<ListLinks>,
    },
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Borrow the items regardless of shape.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Enveloped { data, .. } | Self::Bare(data) => data,
        }
    }

    /// Consume the response and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Enveloped { data, .. } | Self::Bare(data) => data,
        }
    }

    /// Pagination metadata, if the endpoint sent any.
    #[must_use]
    pub fn meta(&self) -> Option<&ListMeta> {
        match self {
            Self::Enveloped { meta, .. } => meta.as_ref(),
            Self::Bare(_) => None,
        }
    }

    /// Navigation links, if the endpoint sent any.
    #[must_use]
    pub fn links(&self) -> Option<&ListLinks> {
        match self {
            Self::Enveloped { links, .. } => links.as_ref(),
            Self::Bare(_) => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> ListResponse<T> {
    /// Decode a list payload from raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Decode`] when the text is neither an envelope
    /// nor an array of `T`.
    pub fn from_json(raw: &'de str) -> Result<Self, CatalogError> {
        // Prefer the envelope reading so `{ data: [] }` never falls through to
        // a confusing "expected array" error.
        if let Ok(env) = serde_json::from_str::<Envelope<T>>(raw) {
            return Ok(Self::Enveloped {
                data: env.data,
                meta: env.meta,
                links: env.links,
            });
        }
        Ok(Self::Bare(serde_json::from_str::<Vec<T>>(raw)?))
    }
}

/// A single-item payload in either `{ data: T }` or bare `T` form.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemResponse<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ItemResponse<T> {
    /// Consume the response and return the item.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Error body sent by the API on non-2xx responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    /// The most specific human-readable message available.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}
