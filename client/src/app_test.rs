use catalog::taxonomy::{Term, Vocabulary};
use futures::executor::block_on;

use super::*;
use crate::net::ApiError;
use crate::net::mock::MockApi;

#[test]
fn missing_document_keeps_builtins() {
    let api = MockApi::new();
    let taxonomy = block_on(load_taxonomy(&api));
    let term = taxonomy.provider().resolve(Vocabulary::InstrumentType, Some("PHE"));
    assert_eq!(term.label, "Phenocam");
}

#[test]
fn failed_fetch_keeps_builtins() {
    let api = MockApi::new();
    api.fail("taxonomy", ApiError::from_status(500, ""));
    let taxonomy = block_on(load_taxonomy(&api));
    assert!(taxonomy.provider().lookup(Vocabulary::Ecosystem, "FOR").is_some());
}

#[test]
fn server_terms_layer_over_builtins() {
    let mut doc = TaxonomyDocument::default();
    let mut drone = Term::fallback(Some("drone_camera"));
    drone.label = "Drone Camera".to_owned();
    doc.vocabularies.insert(Vocabulary::InstrumentType, vec![drone]);

    let mut api = MockApi::new();
    api.taxonomy = Some(doc);
    let taxonomy = block_on(load_taxonomy(&api));
    let provider = taxonomy.provider();
    assert_eq!(provider.resolve(Vocabulary::InstrumentType, Some("drone_camera")).label, "Drone Camera");
    assert_eq!(provider.resolve(Vocabulary::InstrumentType, Some("phenocam")).label, "Phenocam");
}
