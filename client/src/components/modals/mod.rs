//! Entity modals and the host that renders whichever one is open.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app provides one `RwSignal<ModalSlot<ActiveModal>>`. Pages call
//! [`open_modal`] to show a dialog and mount a [`ModalHost`] that renders it
//! and reports successful saves back so the page can re-fetch.

pub mod campaign_modal;
pub mod fields;
pub mod frame;
pub mod instrument_modal;
pub mod maintenance_modal;
pub mod product_modal;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use catalog::validate::ValidationErrors;
use catalog::{Campaign, Instrument, MaintenanceRecord, Product};
use leptos::prelude::*;

use crate::app::Taxonomy;
use crate::forms::{self, EntityForm, EntityKind, SubmitError};
use crate::net::HttpApi;
use crate::state::modal::ModalSlot;
use crate::state::toast::ToastQueue;
use crate::util::focus;

pub use campaign_modal::CampaignModal;
pub use frame::ModalFrame;
pub use instrument_modal::InstrumentModal;
pub use maintenance_modal::MaintenanceModal;
pub use product_modal::ProductModal;

/// What a modal is doing with its entity.
#[derive(Clone, Debug, PartialEq)]
pub enum ModalMode<E> {
    View(E),
    Create,
    Edit(E),
}

impl<E> ModalMode<E> {
    #[must_use]
    pub fn entity(&self) -> Option<&E> {
        match self {
            Self::View(e) | Self::Edit(e) => Some(e),
            Self::Create => None,
        }
    }

    #[must_use]
    pub fn is_form(&self) -> bool {
        !matches!(self, Self::View(_))
    }

    /// Dialog title: the entity name in view mode, "New X"/"Edit X" otherwise.
    pub fn title(&self, noun: &str, name: impl Fn(&E) -> String) -> String {
        match self {
            Self::View(e) => name(e),
            Self::Create => format!("New {}", noun.to_lowercase()),
            Self::Edit(e) => format!("Edit {}: {}", noun.to_lowercase(), name(e)),
        }
    }

    /// Button text for the form footer.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            _ => "Save changes",
        }
    }
}

/// The one dialog the app may show.
#[derive(Clone, Debug, PartialEq)]
pub enum ActiveModal {
    Product {
        mode: ModalMode<Product>,
        station: String,
    },
    Campaign {
        mode: ModalMode<Campaign>,
        station_id: Option<i64>,
    },
    Instrument {
        mode: ModalMode<Instrument>,
        platform_id: i64,
    },
    Maintenance {
        mode: ModalMode<MaintenanceRecord>,
        entity_type: String,
        entity_id: i64,
    },
}

impl ActiveModal {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Product { .. } => EntityKind::Product,
            Self::Campaign { .. } => EntityKind::Campaign,
            Self::Instrument { .. } => EntityKind::Instrument,
            Self::Maintenance { .. } => EntityKind::Maintenance,
        }
    }
}

/// Show `modal`, remembering the focused element so closing can return to it.
pub fn open_modal(slot: RwSignal<ModalSlot<ActiveModal>>, modal: ActiveModal) {
    let mark = focus::mark_active_element();
    slot.update(|s| s.open(modal, mark));
}

/// Close the open modal and give focus back to where it was.
pub fn close_modal(slot: RwSignal<ModalSlot<ActiveModal>>) {
    if let Some(mark) = slot.try_update(ModalSlot::close).flatten() {
        focus::restore(mark);
    }
}

/// Ask the user to confirm a destructive action.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        false
    }
}

/// Renders the open modal, if any.
#[component]
pub fn ModalHost(
    /// Runs after a successful create or edit, once the modal has closed.
    on_saved: Callback<EntityKind>,
    #[prop(into)] can_edit: Signal<bool>,
) -> impl IntoView {
    let slot = expect_context::<RwSignal<ModalSlot<ActiveModal>>>();
    let on_close = Callback::new(move |()| close_modal(slot));
    let saved = Callback::new(move |kind: EntityKind| {
        close_modal(slot);
        on_saved.run(kind);
    });

    move || {
        slot.with(|s| s.current().cloned()).map(|modal| match modal {
            ActiveModal::Product { mode, station } => {
                view! { <ProductModal mode station can_edit=can_edit.get_untracked() on_close on_saved=saved/> }
                    .into_any()
            }
            ActiveModal::Campaign { mode, station_id } => view! {
                <CampaignModal mode station_id can_edit=can_edit.get_untracked() on_close on_saved=saved/>
            }
            .into_any(),
            ActiveModal::Instrument { mode, platform_id } => view! {
                <InstrumentModal mode platform_id can_edit=can_edit.get_untracked() on_close on_saved=saved/>
            }
            .into_any(),
            ActiveModal::Maintenance {
                mode,
                entity_type,
                entity_id,
            } => view! {
                <MaintenanceModal
                    mode
                    entity_type
                    entity_id
                    can_edit=can_edit.get_untracked()
                    on_close
                    on_saved=saved
                />
            }
            .into_any(),
        })
    }
}

/// Signal/callback pair binding one text field of a form.
pub(crate) fn bind<F, G, S>(form: RwSignal<F>, get: G, set: S) -> (Signal<String>, Callback<String>)
where
    F: Send + Sync + 'static,
    G: Fn(&F) -> String + Copy + Send + Sync + 'static,
    S: Fn(&mut F, String) + Copy + Send + Sync + 'static,
{
    (
        Signal::derive(move || form.with(get)),
        Callback::new(move |value: String| form.update(|f| set(f, value))),
    )
}

/// Validate and send `form`; on success toast, close and notify.
///
/// Validation failures land in `errors`; request failures raise an error
/// toast. Either way the modal stays open with the user's input.
pub(crate) fn spawn_submit<F>(
    form: F,
    id: Option<i64>,
    errors: RwSignal<ValidationErrors>,
    saving: RwSignal<bool>,
    on_saved: Callback<EntityKind>,
) where
    F: EntityForm + 'static,
{
    let api = expect_context::<HttpApi>();
    let taxonomy = expect_context::<RwSignal<Taxonomy>>().get_untracked();
    let toasts = expect_context::<RwSignal<ToastQueue>>();

    if let Err(invalid) = form.validate(taxonomy.provider()) {
        errors.set(invalid);
        return;
    }
    errors.set(ValidationErrors::default());
    saving.set(true);
    leptos::task::spawn_local(async move {
        let result = forms::submit(&api, &form, id, taxonomy.provider()).await;
        saving.set(false);
        match result {
            Ok(message) => {
                toasts.update(|t| {
                    t.success(message);
                });
                on_saved.run(F::KIND);
            }
            Err(SubmitError::Invalid(invalid)) => errors.set(invalid),
            // The API layer has already sent the browser to login.
            Err(SubmitError::Api(e)) if e.is_unauthorized() => {}
            Err(SubmitError::Api(e)) => {
                log::warn!("save {}: {e}", F::KIND.noun());
                toasts.update(|t| {
                    t.error(failure_message(F::KIND, &e.to_string()));
                });
            }
        }
    });
}

/// Toast text for a failed save.
#[must_use]
pub fn failure_message(kind: EntityKind, detail: &str) -> String {
    format!("Could not save {}: {detail}", kind.noun().to_lowercase())
}
