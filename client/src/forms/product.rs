//! Product create/edit form.

#[cfg(test)]
#[path = "product_test.rs"]
mod product_test;

use catalog::taxonomy::Vocabulary;
use catalog::validate::{KeptValues, ValidationErrors, Validator};
use catalog::{Product, TaxonomyProvider};
use serde_json::{Value, json};

use super::{EntityForm, EntityKind, canonical, date_input, input, number_input, number_value, text};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Station the product is created under; not editable.
    pub station: Option<String>,
    pub instrument_id: Option<i64>,
    pub name: String,
    pub product_type: String,
    pub processing_level: String,
    pub quality_score: String,
    pub product_date: String,
    pub start_date: String,
    pub end_date: String,
    pub data_path: String,
    pub data_url: String,
    pub checksum: String,
    pub file_size_bytes: String,
    pub citation: String,
    pub license: String,
    pub doi: String,
    pub description: String,
    /// Coded values the edited record already had.
    pub kept: KeptValues,
}

impl ProductForm {
    /// Empty form for a new product under `station`.
    #[must_use]
    pub fn for_station(station: &str) -> Self {
        Self {
            station: Some(station.to_owned()),
            ..Self::default()
        }
    }
}

impl EntityForm for ProductForm {
    type Entity = Product;
    const KIND: EntityKind = EntityKind::Product;

    fn from_entity(p: &Product) -> Self {
        Self {
            kept: KeptValues::default()
                .with("product_type", p.product_type.as_deref())
                .with("processing_level", p.processing_level.as_deref()),
            station: None,
            instrument_id: p.instrument_id,
            name: p.name.clone(),
            product_type: input(p.product_type.as_ref()),
            processing_level: input(p.processing_level.as_ref()),
            quality_score: number_input(p.quality_score),
            product_date: date_input(p.product_date.as_ref()),
            start_date: date_input(p.start_date.as_ref()),
            end_date: date_input(p.end_date.as_ref()),
            data_path: input(p.data_path.as_ref()),
            data_url: input(p.data_url.as_ref()),
            checksum: input(p.checksum.as_ref()),
            file_size_bytes: p.file_size_bytes.map(|n| n.to_string()).unwrap_or_default(),
            citation: input(p.citation.as_ref()),
            license: input(p.license.as_ref()),
            doi: input(p.doi.as_ref()),
            description: input(p.description.as_ref()),
        }
    }

    fn validate(&self, taxonomy: &dyn TaxonomyProvider) -> Result<Value, ValidationErrors> {
        let mut v = Validator::new();
        if v.required("name", "Name", &self.name) {
            v.max_len("name", "Name", &self.name, 200);
        }
        let product_type = v.one_of_or_kept(
            "product_type",
            "Product type",
            &self.product_type,
            Vocabulary::ProductType,
            taxonomy,
            self.kept.get("product_type"),
        );
        let level = v.one_of_or_kept(
            "processing_level",
            "Processing level",
            &self.processing_level,
            Vocabulary::ProcessingLevel,
            taxonomy,
            self.kept.get("processing_level"),
        );
        let quality = v.number("quality_score", "Quality score", &self.quality_score, 0.0, 100.0);
        v.date("product_date", "Product date", &self.product_date);
        let start = v.date("start_date", "Start date", &self.start_date);
        let end = v.date("end_date", "End date", &self.end_date);
        v.date_order("end_date", "start date", "End date", start, end);
        v.max_len("data_path", "Data path", &self.data_path, 500);
        v.url("data_url", "Data URL", &self.data_url);
        v.max_len("checksum", "Checksum", &self.checksum, 128);
        let size = v.whole_number("file_size_bytes", "File size", &self.file_size_bytes);
        v.max_len("citation", "Citation", &self.citation, 1000);
        v.max_len("license", "License", &self.license, 100);
        v.max_len("doi", "DOI", &self.doi, 100);
        v.max_len("description", "Description", &self.description, 2000);
        v.finish()?;

        let mut body = json!({
            "name": self.name.trim(),
            "product_type": canonical(product_type),
            "processing_level": canonical(level),
            "quality_score": number_value(quality),
            "product_date": text(&self.product_date),
            "start_date": text(&self.start_date),
            "end_date": text(&self.end_date),
            "data_path": text(&self.data_path),
            "data_url": text(&self.data_url),
            "checksum": text(&self.checksum),
            "file_size_bytes": size,
            "citation": text(&self.citation),
            "license": text(&self.license),
            "doi": text(&self.doi),
            "description": text(&self.description),
        });
        if let Some(obj) = body.as_object_mut() {
            if let Some(id) = self.instrument_id {
                obj.insert("instrument_id".to_owned(), json!(id));
            }
            if let Some(station) = &self.station {
                obj.insert("station_acronym".to_owned(), json!(station));
            }
        }
        Ok(body)
    }
}
