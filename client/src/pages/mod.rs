//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (verify the session, load in
//! parallel, re-fetch after a mutation) and delegates rendering details to
//! `components`.


pub mod campaign_manager;
pub mod sites_station;
pub mod station_dashboard;

use leptos::prelude::*;

use crate::net::{ApiError, CatalogApi};
use crate::state::auth::{self, AuthState};
use crate::state::toast::ToastQueue;

/// Outcome of checking the stored session against the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionCheck {
    Verified,
    /// No token stored; the user never logged in here.
    Missing,
    /// The API rejected the token.
    Expired,
    /// The check itself failed; pages stay read-only.
    Unreachable(String),
}

impl SessionCheck {
    /// Whether the page should go on loading.
    #[must_use]
    pub fn proceed(&self) -> bool {
        matches!(self, Self::Verified | Self::Unreachable(_))
    }
}

pub async fn check_session<A: CatalogApi>(api: &A, has_token: bool) -> SessionCheck {
    if !has_token {
        return SessionCheck::Missing;
    }
    match api.verify_session().await {
        Ok(()) => SessionCheck::Verified,
        Err(ApiError::Unauthorized) => SessionCheck::Expired,
        Err(e) => SessionCheck::Unreachable(e.to_string()),
    }
}

/// Verify the session and record the result; redirects to login when there
/// is none. Returns whether the page should load its data.
pub(crate) async fn ensure_session<A: CatalogApi>(api: &A, auth: RwSignal<AuthState>, login_url: &str) -> bool {
    let check = check_session(api, auth::stored_token().is_some()).await;
    match &check {
        SessionCheck::Verified => auth.update(|a| a.verified = true),
        SessionCheck::Missing | SessionCheck::Expired => auth::expire_session(login_url),
        SessionCheck::Unreachable(reason) => {
            log::warn!("session check failed, editing disabled: {reason}");
        }
    }
    check.proceed()
}

/// Raise an error toast for a failed request. A 401 has already redirected
/// to login, so it gets no toast.
pub(crate) fn report_failure(err: &ApiError, what: &str, toasts: RwSignal<ToastQueue>) {
    log::warn!("{what}: {err}");
    if !err.is_unauthorized() {
        toasts.update(|t| {
            t.error(format!("{what}: {err}"));
        });
    }
}
