//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use catalog::{BuiltinTaxonomy, LayeredTaxonomy, TaxonomyDocument, TaxonomyProvider};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::modals::ActiveModal;
use crate::components::toast_host::ToastHost;
use crate::config::ClientConfig;
use crate::net::{CatalogApi, HttpApi};
use crate::pages::{
    campaign_manager::CampaignManagerPage, sites_station::SitesStationPage,
    station_dashboard::StationDashboardPage,
};
use crate::state::auth::AuthState;
use crate::state::modal::ModalSlot;
use crate::state::toast::ToastQueue;

/// The taxonomy provider every label, icon and color is drawn from.
///
/// Starts as the built-in tables and is swapped for a layered provider once
/// the server document arrives.
#[derive(Clone)]
pub struct Taxonomy(Arc<dyn TaxonomyProvider>);

impl Taxonomy {
    #[must_use]
    pub fn builtin() -> Self {
        Self(Arc::new(BuiltinTaxonomy))
    }

    /// Server terms first, built-ins for anything the document leaves out.
    #[must_use]
    pub fn from_document(doc: TaxonomyDocument) -> Self {
        Self(Arc::new(LayeredTaxonomy::new(doc, BuiltinTaxonomy)))
    }

    #[must_use]
    pub fn provider(&self) -> &dyn TaxonomyProvider {
        self.0.as_ref()
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Fetch the server taxonomy; a missing or broken document keeps built-ins.
pub async fn load_taxonomy<A: CatalogApi>(api: &A) -> Taxonomy {
    match api.taxonomy().await {
        Ok(Some(doc)) => {
            log::info!("taxonomy: loaded {} server vocabularies", doc.vocabularies.len());
            Taxonomy::from_document(doc)
        }
        Ok(None) => Taxonomy::builtin(),
        Err(e) => {
            log::warn!("taxonomy: using built-in tables ({e})");
            Taxonomy::builtin()
        }
    }
}

/// Root application component.
///
/// Provides the shared contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::load();
    let api = HttpApi::new(config.clone());
    let taxonomy = RwSignal::new(Taxonomy::builtin());
    let toasts = RwSignal::new(ToastQueue::default());
    let modal = RwSignal::new(ModalSlot::<ActiveModal>::default());
    let auth = RwSignal::new(AuthState::restore());

    provide_context(config);
    provide_context(api.clone());
    provide_context(taxonomy);
    provide_context(toasts);
    provide_context(modal);
    provide_context(auth);

    leptos::task::spawn_local(async move {
        let loaded = load_taxonomy(&api).await;
        taxonomy.set(loaded);
    });

    view! {
        <Title text="SITES Spectral"/>

        <Router>
            <Routes fallback=|| view! { <p class="page-missing">"Page not found."</p> }>
                <Route path=(StaticSegment("station"), ParamSegment("acronym")) view=StationDashboardPage/>
                <Route path=(StaticSegment("sites"), ParamSegment("acronym")) view=SitesStationPage/>
                <Route path=StaticSegment("campaigns") view=CampaignManagerPage/>
                <Route path=StaticSegment("") view=CampaignManagerPage/>
            </Routes>
        </Router>
        <ToastHost/>
    }
}
