use super::*;
use crate::util::focus::FocusMark;

fn product() -> Product {
    Product {
        id: 4,
        name: "GCC daily".to_owned(),
        product_type: Some("timeseries".to_owned()),
        ..Product::default()
    }
}

#[test]
fn mode_titles() {
    let name = |p: &Product| p.name.clone();
    assert_eq!(ModalMode::View(product()).title("Product", name), "GCC daily");
    assert_eq!(ModalMode::<Product>::Create.title("Product", name), "New product");
    assert_eq!(ModalMode::Edit(product()).title("Product", name), "Edit product: GCC daily");
    assert_eq!(ModalMode::<Product>::Create.submit_label(), "Create");
    assert_eq!(ModalMode::Edit(product()).submit_label(), "Save changes");
}

#[test]
fn mode_entity_and_form_flag() {
    assert!(!ModalMode::View(product()).is_form());
    assert!(ModalMode::<Product>::Create.is_form());
    assert_eq!(ModalMode::Edit(product()).entity().map(|p| p.id), Some(4));
    assert!(ModalMode::<Product>::Create.entity().is_none());
}

#[test]
fn product_forms_are_bound_to_station() {
    let form = product_modal::initial_form(&ModalMode::Create, "SVB");
    assert_eq!(form.station.as_deref(), Some("SVB"));
    assert!(form.name.is_empty());

    let form = product_modal::initial_form(&ModalMode::Edit(product()), "SVB");
    assert_eq!(form.station.as_deref(), Some("SVB"));
    assert_eq!(form.name, "GCC daily");
}

#[test]
fn create_forms_get_defaults() {
    let form = campaign_modal::initial_form(&ModalMode::Create, Some(2));
    assert_eq!(form.station_id, Some(2));
    assert_eq!(form.status, "planned");

    let form = instrument_modal::initial_form(&ModalMode::Create, 9);
    assert_eq!(form.platform_id, 9);

    let form = maintenance_modal::initial_form(&ModalMode::Create, "platform", 9);
    assert_eq!(form.entity_type, "platform");
    assert_eq!(form.priority, "medium");
}

#[test]
fn replacing_modal_keeps_first_focus_target() {
    let mut slot = ModalSlot::default();
    slot.open(
        ActiveModal::Product {
            mode: ModalMode::View(product()),
            station: "SVB".to_owned(),
        },
        Some(FocusMark(7)),
    );
    slot.open(
        ActiveModal::Product {
            mode: ModalMode::Edit(product()),
            station: "SVB".to_owned(),
        },
        None,
    );
    assert_eq!(slot.current().map(ActiveModal::kind), Some(EntityKind::Product));
    assert_eq!(slot.close(), Some(FocusMark(7)));
    assert!(!slot.is_open());
}

#[test]
fn spec_rows_skip_blanks() {
    let instrument = Instrument {
        camera_brand: Some("Mobotix".to_owned()),
        camera_model: Some(" ".to_owned()),
        camera_focal_length_mm: Some(4.5),
        number_of_channels: Some(4),
        ..Instrument::default()
    };
    let rows = instrument_modal::spec_rows(&instrument);
    assert_eq!(
        rows,
        vec![
            ("Camera brand", "Mobotix".to_owned()),
            ("Focal length", "4.5 mm".to_owned()),
            ("Channels", "4".to_owned()),
        ]
    );
    assert_eq!(instrument_modal::measurement_span(Some(2019), None), "2019–present");
    assert_eq!(instrument_modal::measurement_span(None, None), "Not set");
}

#[test]
fn failure_toast_text() {
    assert_eq!(
        failure_message(EntityKind::Maintenance, "request failed (500): server error"),
        "Could not save maintenance record: request failed (500): server error"
    );
}

#[test]
fn confirm_is_false_outside_browser() {
    assert!(!confirm("Delete?"));
}
