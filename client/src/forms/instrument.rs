//! Instrument create/edit form.

#[cfg(test)]
#[path = "instrument_test.rs"]
mod instrument_test;

use catalog::taxonomy::Vocabulary;
use catalog::validate::{KeptValues, ValidationErrors, Validator};
use catalog::{Instrument, TaxonomyProvider};
use serde_json::{Value, json};

use super::{EntityForm, EntityKind, canonical, date_input, input, number_input, number_value, text};

/// Earliest year a measurement series can plausibly start.
const MIN_YEAR: u64 = 1990;
const MAX_YEAR: u64 = 2100;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstrumentForm {
    pub platform_id: i64,
    pub display_name: String,
    pub instrument_type: String,
    pub status: String,
    pub measurement_status: String,
    pub latitude: String,
    pub longitude: String,
    pub height_m: String,
    pub viewing_direction: String,
    pub azimuth_degrees: String,
    pub degrees_from_nadir: String,
    pub camera_brand: String,
    pub camera_model: String,
    pub camera_resolution: String,
    pub camera_serial_number: String,
    pub camera_lens: String,
    pub camera_focal_length_mm: String,
    pub sensor_brand: String,
    pub sensor_model: String,
    pub sensor_serial_number: String,
    pub number_of_channels: String,
    pub wavelengths: String,
    pub deployment_date: String,
    pub decommission_date: String,
    pub calibration_date: String,
    pub first_measurement_year: String,
    pub last_measurement_year: String,
    pub description: String,
    /// Coded values the edited record already had.
    pub kept: KeptValues,
}

impl InstrumentForm {
    /// Empty form for a new instrument on `platform_id`.
    #[must_use]
    pub fn for_platform(platform_id: i64) -> Self {
        Self {
            platform_id,
            status: "active".to_owned(),
            ..Self::default()
        }
    }

    /// Whether camera fields apply to the chosen type.
    #[must_use]
    pub fn is_camera(&self) -> bool {
        let key = catalog::taxonomy::normalize_key(&self.instrument_type);
        key.contains("phenocam") || key == "phe" || key == "camera"
    }
}

impl EntityForm for InstrumentForm {
    type Entity = Instrument;
    const KIND: EntityKind = EntityKind::Instrument;

    fn from_entity(i: &Instrument) -> Self {
        Self {
            kept: KeptValues::default()
                .with("instrument_type", i.instrument_type.as_deref())
                .with("status", i.status.as_deref())
                .with("measurement_status", i.measurement_status.as_deref()),
            platform_id: i.platform_id,
            display_name: i.display_name.clone(),
            instrument_type: input(i.instrument_type.as_ref()),
            status: input(i.status.as_ref()),
            measurement_status: input(i.measurement_status.as_ref()),
            latitude: number_input(i.latitude),
            longitude: number_input(i.longitude),
            height_m: number_input(i.height_m),
            viewing_direction: input(i.viewing_direction.as_ref()),
            azimuth_degrees: number_input(i.azimuth_degrees),
            degrees_from_nadir: number_input(i.degrees_from_nadir),
            camera_brand: input(i.camera_brand.as_ref()),
            camera_model: input(i.camera_model.as_ref()),
            camera_resolution: input(i.camera_resolution.as_ref()),
            camera_serial_number: input(i.camera_serial_number.as_ref()),
            camera_lens: input(i.camera_lens.as_ref()),
            camera_focal_length_mm: number_input(i.camera_focal_length_mm),
            sensor_brand: input(i.sensor_brand.as_ref()),
            sensor_model: input(i.sensor_model.as_ref()),
            sensor_serial_number: input(i.sensor_serial_number.as_ref()),
            number_of_channels: i.number_of_channels.map(|n| n.to_string()).unwrap_or_default(),
            wavelengths: input(i.wavelengths.as_ref()),
            deployment_date: date_input(i.deployment_date.as_ref()),
            decommission_date: date_input(i.decommission_date.as_ref()),
            calibration_date: date_input(i.calibration_date.as_ref()),
            first_measurement_year: i.first_measurement_year.map(|y| y.to_string()).unwrap_or_default(),
            last_measurement_year: i.last_measurement_year.map(|y| y.to_string()).unwrap_or_default(),
            description: input(i.description.as_ref()),
        }
    }

    fn validate(&self, taxonomy: &dyn TaxonomyProvider) -> Result<Value, ValidationErrors> {
        let mut v = Validator::new();
        if v.required("display_name", "Display name", &self.display_name) {
            v.max_len("display_name", "Display name", &self.display_name, 100);
        }
        if self.platform_id <= 0 {
            v.fail("platform_id", "Platform is required");
        }
        let kind = v.one_of_or_kept(
            "instrument_type",
            "Instrument type",
            &self.instrument_type,
            Vocabulary::InstrumentType,
            taxonomy,
            self.kept.get("instrument_type"),
        );
        let status = v.one_of_or_kept(
            "status",
            "Status",
            &self.status,
            Vocabulary::InstrumentStatus,
            taxonomy,
            self.kept.get("status"),
        );
        let measurement = v.one_of_or_kept(
            "measurement_status",
            "Measurement status",
            &self.measurement_status,
            Vocabulary::MeasurementStatus,
            taxonomy,
            self.kept.get("measurement_status"),
        );
        let lat = v.number("latitude", "Latitude", &self.latitude, -90.0, 90.0);
        let lon = v.number("longitude", "Longitude", &self.longitude, -180.0, 180.0);
        if one_blank(&self.latitude, &self.longitude) {
            v.fail("longitude", "Latitude and longitude must be given together");
        }
        let height = v.number("height_m", "Height", &self.height_m, 0.0, 1000.0);
        let azimuth = v.number("azimuth_degrees", "Azimuth", &self.azimuth_degrees, 0.0, 360.0);
        let nadir = v.number("degrees_from_nadir", "Degrees from nadir", &self.degrees_from_nadir, 0.0, 180.0);
        for (field, label, value) in [
            ("viewing_direction", "Viewing direction", &self.viewing_direction),
            ("camera_brand", "Camera brand", &self.camera_brand),
            ("camera_model", "Camera model", &self.camera_model),
            ("camera_resolution", "Camera resolution", &self.camera_resolution),
            ("camera_serial_number", "Camera serial number", &self.camera_serial_number),
            ("camera_lens", "Camera lens", &self.camera_lens),
            ("sensor_brand", "Sensor brand", &self.sensor_brand),
            ("sensor_model", "Sensor model", &self.sensor_model),
            ("sensor_serial_number", "Sensor serial number", &self.sensor_serial_number),
        ] {
            v.max_len(field, label, value, 100);
        }
        let focal = v.number("camera_focal_length_mm", "Focal length", &self.camera_focal_length_mm, 0.0, 2000.0);
        let channels = v.whole_number("number_of_channels", "Number of channels", &self.number_of_channels);
        v.max_len("wavelengths", "Wavelengths", &self.wavelengths, 500);
        let deployed = v.date("deployment_date", "Deployment date", &self.deployment_date);
        let decommissioned = v.date("decommission_date", "Decommission date", &self.decommission_date);
        v.date_order(
            "decommission_date",
            "deployment date",
            "Decommission date",
            deployed,
            decommissioned,
        );
        v.date("calibration_date", "Calibration date", &self.calibration_date);
        let first = year(&mut v, "first_measurement_year", "First measurement year", &self.first_measurement_year);
        let last = year(&mut v, "last_measurement_year", "Last measurement year", &self.last_measurement_year);
        if let (Some(first), Some(last)) = (first, last) {
            if last < first {
                v.fail(
                    "last_measurement_year",
                    "Last measurement year must not be before first measurement year",
                );
            }
        }
        v.max_len("description", "Description", &self.description, 2000);
        v.finish()?;

        Ok(json!({
            "platform_id": self.platform_id,
            "display_name": self.display_name.trim(),
            "instrument_type": canonical(kind),
            "status": canonical(status),
            "measurement_status": canonical(measurement),
            "latitude": number_value(lat),
            "longitude": number_value(lon),
            "height_m": number_value(height),
            "viewing_direction": text(&self.viewing_direction),
            "azimuth_degrees": number_value(azimuth),
            "degrees_from_nadir": number_value(nadir),
            "camera_brand": text(&self.camera_brand),
            "camera_model": text(&self.camera_model),
            "camera_resolution": text(&self.camera_resolution),
            "camera_serial_number": text(&self.camera_serial_number),
            "camera_lens": text(&self.camera_lens),
            "camera_focal_length_mm": number_value(focal),
            "sensor_brand": text(&self.sensor_brand),
            "sensor_model": text(&self.sensor_model),
            "sensor_serial_number": text(&self.sensor_serial_number),
            "number_of_channels": channels,
            "wavelengths": text(&self.wavelengths),
            "deployment_date": text(&self.deployment_date),
            "decommission_date": text(&self.decommission_date),
            "calibration_date": text(&self.calibration_date),
            "first_measurement_year": first,
            "last_measurement_year": last,
            "description": text(&self.description),
        }))
    }
}

/// One of the pair is blank while the other is filled.
fn one_blank(a: &str, b: &str) -> bool {
    a.trim().is_empty() != b.trim().is_empty()
}

fn year(v: &mut Validator, field: &'static str, label: &str, raw: &str) -> Option<u64> {
    let year = v.whole_number(field, label, raw)?;
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Some(year)
    } else {
        v.fail(field, format!("{label} must be between {MIN_YEAR} and {MAX_YEAR}"));
        None
    }
}
