//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Tokens are issued elsewhere; this module only reads the stored bearer token
//! and user record, decides who may edit what, and tears the session down
//! (storage cleared, browser sent to the login page) on logout or a 401.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

use crate::util::storage;

/// `localStorage` key holding the bearer token.
pub const TOKEN_KEY: &str = "sites_spectral_token";
/// `localStorage` key holding the JSON user record.
pub const USER_KEY: &str = "sites_spectral_user";

/// Access level attached to a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Station,
    #[default]
    #[serde(other)]
    Readonly,
}

/// The stored user record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionUser {
    pub username: String,
    pub role: Role,
    /// Station a `Station` user may edit.
    #[serde(alias = "station")]
    pub station_acronym: Option<String>,
}

impl SessionUser {
    /// Whether this user may modify entities belonging to `station`.
    #[must_use]
    pub fn can_edit(&self, station: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Station => self
                .station_acronym
                .as_deref()
                .is_some_and(|own| own.eq_ignore_ascii_case(station)),
            Role::Readonly => false,
        }
    }
}

/// Authentication state tracking the current user and verification status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    /// Set once `/api/auth/verify` has answered successfully.
    pub verified: bool,
}

impl AuthState {
    /// State restored from storage; not yet verified against the API.
    #[must_use]
    pub fn restore() -> Self {
        Self {
            user: stored_user(),
            verified: false,
        }
    }

    #[must_use]
    pub fn can_edit(&self, station: &str) -> bool {
        self.verified && self.user.as_ref().is_some_and(|u| u.can_edit(station))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.verified && self.user.as_ref().is_some_and(|u| u.role == Role::Admin)
    }
}

pub fn stored_token() -> Option<String> {
    storage::get_string(TOKEN_KEY).filter(|t| !t.trim().is_empty())
}

pub fn stored_user() -> Option<SessionUser> {
    storage::load_json(USER_KEY)
}

/// Remove both session keys.
pub fn clear_session() {
    storage::remove(TOKEN_KEY);
    storage::remove(USER_KEY);
}

/// Login URL carrying the page to come back to.
#[must_use]
pub fn login_redirect_url(login_url: &str, return_to: Option<&str>) -> String {
    match return_to.filter(|p| !p.is_empty() && *p != "/") {
        Some(path) => {
            let sep = if login_url.contains('?') { '&' } else { '?' };
            format!(
                "{login_url}{sep}redirect={}",
                crate::net::endpoints::encode_component(path)
            )
        }
        None => login_url.to_owned(),
    }
}

/// Clear the session and send the browser to the login page.
pub fn expire_session(login_url: &str) {
    log::warn!("session expired; redirecting to login");
    clear_session();
    #[cfg(feature = "csr")]
    {
        if let Some(location) = web_sys::window().map(|w| w.location()) {
            let current = location.pathname().ok();
            let _ = location.set_href(&login_redirect_url(login_url, current.as_deref()));
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = login_url;
    }
}

/// User-initiated logout.
pub fn logout(login_url: &str) {
    log::info!("logging out");
    clear_session();
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(login_url);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = login_url;
    }
}
