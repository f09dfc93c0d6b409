//! Entity summary cards.
//!
//! Each card pairs a pure `*CardModel` (derived labels, icons, colors, badge
//! classes) with a small component that renders it. Unknown or missing
//! taxonomy values always resolve to the neutral default visual.

pub mod campaign_card;
pub mod instrument_card;
pub mod maintenance_card;
pub mod platform_card;
pub mod product_card;

pub use campaign_card::{CampaignCard, CampaignCardModel};
pub use instrument_card::{InstrumentCard, InstrumentCardModel};
pub use maintenance_card::{MaintenanceCard, MaintenanceCardModel};
pub use platform_card::{PlatformCard, PlatformCardModel};
pub use product_card::{ProductCard, ProductCardModel, QualityClass};

use catalog::taxonomy::{DEFAULT_COLOR, Term};

use crate::util::escape;

/// Presentation of one taxonomy term on a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub icon: String,
    pub color: String,
    /// e.g. `badge badge--in-progress`.
    pub class: String,
}

impl Badge {
    #[must_use]
    pub fn from_term(term: &Term) -> Self {
        Self {
            label: term.label.clone(),
            icon: term.icon.clone(),
            color: escape::css_color(&term.color, DEFAULT_COLOR).to_owned(),
            class: format!("badge badge--{}", term.css_modifier().to_lowercase()),
        }
    }

    /// Inline style for a tinted chip.
    #[must_use]
    pub fn style(&self) -> String {
        format!("--badge-color: {}", self.color)
    }
}
