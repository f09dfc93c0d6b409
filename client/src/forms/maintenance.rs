//! Maintenance record create/edit form.

#[cfg(test)]
#[path = "maintenance_test.rs"]
mod maintenance_test;

use catalog::taxonomy::Vocabulary;
use catalog::validate::{KeptValues, ValidationErrors, Validator};
use catalog::{MaintenanceRecord, TaxonomyProvider};
use serde_json::{Value, json};

use super::{EntityForm, EntityKind, canonical, date_input, input, text};

/// Entity types a maintenance record may point at.
pub const ENTITY_TYPES: [&str; 3] = ["station", "platform", "instrument"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaintenanceForm {
    pub entity_type: String,
    pub entity_id: i64,
    pub status: String,
    pub priority: String,
    pub scheduled_date: String,
    pub completed_date: String,
    pub technician: String,
    pub description: String,
    /// Coded values the edited record already had.
    pub kept: KeptValues,
}

impl MaintenanceForm {
    /// Empty form for a new record on one entity.
    #[must_use]
    pub fn for_entity(entity_type: &str, entity_id: i64) -> Self {
        Self {
            entity_type: entity_type.to_owned(),
            entity_id,
            status: "pending".to_owned(),
            priority: "medium".to_owned(),
            ..Self::default()
        }
    }
}

impl EntityForm for MaintenanceForm {
    type Entity = MaintenanceRecord;
    const KIND: EntityKind = EntityKind::Maintenance;

    fn from_entity(m: &MaintenanceRecord) -> Self {
        Self {
            kept: KeptValues::default()
                .with("status", m.status.as_deref())
                .with("priority", m.priority.as_deref()),
            entity_type: m.entity_type.clone(),
            entity_id: m.entity_id,
            status: input(m.status.as_ref()),
            priority: input(m.priority.as_ref()),
            scheduled_date: date_input(m.scheduled_date.as_ref()),
            completed_date: date_input(m.completed_date.as_ref()),
            technician: input(m.technician.as_ref()),
            description: m.description.clone(),
        }
    }

    fn validate(&self, taxonomy: &dyn TaxonomyProvider) -> Result<Value, ValidationErrors> {
        let mut v = Validator::new();
        let entity_type = self.entity_type.trim().to_lowercase();
        if !ENTITY_TYPES.contains(&entity_type.as_str()) || self.entity_id <= 0 {
            v.fail("entity_type", "Maintenance must belong to a station, platform or instrument");
        }
        if v.required("description", "Description", &self.description) {
            v.max_len("description", "Description", &self.description, 2000);
        }
        let status = v.one_of_or_kept(
            "status",
            "Status",
            &self.status,
            Vocabulary::MaintenanceStatus,
            taxonomy,
            self.kept.get("status"),
        );
        let priority = v.one_of_or_kept(
            "priority",
            "Priority",
            &self.priority,
            Vocabulary::MaintenancePriority,
            taxonomy,
            self.kept.get("priority"),
        );
        let scheduled = v.date("scheduled_date", "Scheduled date", &self.scheduled_date);
        let completed = v.date("completed_date", "Completed date", &self.completed_date);
        v.date_order("completed_date", "scheduled date", "Completed date", scheduled, completed);
        if status.as_deref() == Some("completed") && completed.is_none() {
            v.fail("completed_date", "Completed date is required for completed maintenance");
        }
        v.max_len("technician", "Technician", &self.technician, 100);
        v.finish()?;

        Ok(json!({
            "entity_type": entity_type,
            "entity_id": self.entity_id,
            "status": canonical(status),
            "priority": canonical(priority),
            "scheduled_date": text(&self.scheduled_date),
            "completed_date": text(&self.completed_date),
            "technician": text(&self.technician),
            "description": self.description.trim(),
        }))
    }
}
