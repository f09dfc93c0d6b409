use catalog::BuiltinTaxonomy;
use catalog::TaxonomyProvider;
use catalog::taxonomy::Vocabulary;

use super::*;

#[test]
fn alias_selects_canonical_option() {
    let terms = BuiltinTaxonomy.terms(Vocabulary::ProductType);
    assert_eq!(selected_key(&terms, "timeseries"), "time_series");
    assert_eq!(select_entries(&terms, "timeseries").len(), terms.len());
}

#[test]
fn unknown_value_is_kept_as_extra_option() {
    let terms = BuiltinTaxonomy.terms(Vocabulary::MaintenancePriority);
    let entries = select_entries(&terms, "someday");
    assert_eq!(entries.len(), terms.len() + 1);
    assert_eq!(entries.last(), Some(&("someday".to_owned(), "someday".to_owned())));
    assert_eq!(selected_key(&terms, " someday "), "someday");
}

#[test]
fn blank_value_adds_nothing() {
    let terms = BuiltinTaxonomy.terms(Vocabulary::CampaignStatus);
    assert_eq!(select_entries(&terms, "  ").len(), terms.len());
    assert_eq!(selected_key(&terms, ""), "");
}
