//! Data product card.

#[cfg(test)]
#[path = "product_card_test.rs"]
mod product_card_test;

use catalog::taxonomy::Vocabulary;
use catalog::{Product, TaxonomyProvider};
use leptos::prelude::*;

use super::Badge;
use crate::app::Taxonomy;
use crate::util::format;

/// Bucket for the quality score chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityClass {
    High,
    Medium,
    Low,
    None,
}

impl QualityClass {
    #[must_use]
    pub fn from_score(score: Option<f64>) -> Self {
        match score.filter(|s| s.is_finite()) {
            Some(s) if s >= 80.0 => Self::High,
            Some(s) if s >= 50.0 => Self::Medium,
            Some(_) => Self::Low,
            None => Self::None,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::High => "quality quality--high",
            Self::Medium => "quality quality--medium",
            Self::Low => "quality quality--low",
            Self::None => "quality quality--none",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductCardModel {
    pub id: i64,
    pub title: String,
    pub kind: Badge,
    pub level: Option<Badge>,
    pub quality: QualityClass,
    pub quality_label: Option<String>,
    pub period: String,
    pub size: Option<String>,
}

impl ProductCardModel {
    #[must_use]
    pub fn new(product: &Product, taxonomy: &dyn TaxonomyProvider) -> Self {
        let period = match (product.start_date.as_deref(), product.end_date.as_deref()) {
            (None, None) => format::date(product.product_date.as_deref()),
            (start, end) => format::date_range(start, end),
        };
        Self {
            id: product.id,
            title: product.name.clone(),
            kind: Badge::from_term(&taxonomy.resolve(Vocabulary::ProductType, product.product_type.as_deref())),
            level: product
                .processing_level
                .as_deref()
                .map(|l| Badge::from_term(&taxonomy.resolve(Vocabulary::ProcessingLevel, Some(l)))),
            quality: QualityClass::from_score(product.quality_score),
            quality_label: format::quality(product.quality_score),
            period,
            size: product.file_size_bytes.map(format::file_size),
        }
    }
}

#[component]
pub fn ProductCard(
    product: Product,
    #[prop(optional)] can_edit: bool,
    on_view: Callback<Product>,
    #[prop(optional)] on_edit: Option<Callback<Product>>,
    #[prop(optional)] on_delete: Option<Callback<Product>>,
) -> impl IntoView {
    let taxonomy = expect_context::<RwSignal<Taxonomy>>();
    let model = Memo::new({
        let product = product.clone();
        move |_| ProductCardModel::new(&product, taxonomy.get().provider())
    });
    let actions = can_edit.then(|| {
        let edit = on_edit.map(|cb| {
            let target = product.clone();
            view! { <button class="btn btn--small" on:click=move |_| cb.run(target.clone())>"Edit"</button> }
        });
        let delete = on_delete.map(|cb| {
            let target = product.clone();
            view! {
                <button class="btn btn--small btn--danger" on:click=move |_| cb.run(target.clone())>"Delete"</button>
            }
        });
        view! { <div class="product-row__actions" on:click=|ev| ev.stop_propagation()>{edit}{delete}</div> }
    });

    view! {
        <article class="card product-row" on:click=move |_| on_view.run(product.clone())>
            <span class="product-row__icon" style=move || model.get().kind.style()>
                <i class=move || format!("fas {}", model.get().kind.icon)></i>
            </span>
            <div class="product-row__body">
                <h5 class="product-row__title">{move || model.get().title}</h5>
                <span class="product-row__type">{move || model.get().kind.label}</span>
                <span class="product-row__period">{move || model.get().period}</span>
            </div>
            {move || model.get().level.map(|l| view! { <span class=l.class.clone()>{l.label.clone()}</span> })}
            <span class=move || model.get().quality.css_class()>
                {move || model.get().quality_label.unwrap_or_else(|| "n/a".to_owned())}
            </span>
            {move || model.get().size.map(|s| view! { <span class="product-row__size">{s}</span> })}
            {actions}
        </article>
    }
}
