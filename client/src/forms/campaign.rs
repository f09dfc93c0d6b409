//! Campaign create/edit form.
//!
//! Objectives and expected outcomes are edited as one entry per line and sent
//! as string arrays.

#[cfg(test)]
#[path = "campaign_test.rs"]
mod campaign_test;

use catalog::model::lines_to_list;
use catalog::taxonomy::Vocabulary;
use catalog::validate::{KeptValues, ValidationErrors, Validator};
use catalog::{Campaign, TaxonomyProvider};
use serde_json::{Value, json};

use super::{EntityForm, EntityKind, canonical, datetime_input, input, number_input, number_value, text};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignForm {
    pub station_id: Option<i64>,
    pub name: String,
    pub campaign_type: String,
    pub status: String,
    pub planned_start_datetime: String,
    pub planned_end_datetime: String,
    pub description: String,
    pub objectives: String,
    pub expected_outcomes: String,
    pub funding_source: String,
    pub budget: String,
    pub coordinator: String,
    /// Coded values the edited record already had.
    pub kept: KeptValues,
}

impl CampaignForm {
    #[must_use]
    pub fn for_station(station_id: Option<i64>) -> Self {
        Self {
            station_id,
            status: "planned".to_owned(),
            ..Self::default()
        }
    }
}

impl EntityForm for CampaignForm {
    type Entity = Campaign;
    const KIND: EntityKind = EntityKind::Campaign;

    fn from_entity(c: &Campaign) -> Self {
        Self {
            kept: KeptValues::default()
                .with("campaign_type", c.campaign_type.as_deref())
                .with("status", c.status.as_deref()),
            station_id: c.station_id,
            name: c.name.clone(),
            campaign_type: input(c.campaign_type.as_ref()),
            status: input(c.status.as_ref()),
            planned_start_datetime: datetime_input(c.planned_start_datetime.as_ref()),
            planned_end_datetime: datetime_input(c.planned_end_datetime.as_ref()),
            description: input(c.description.as_ref()),
            objectives: c.objectives.join("\n"),
            expected_outcomes: c.expected_outcomes.join("\n"),
            funding_source: input(c.funding_source.as_ref()),
            budget: number_input(c.budget),
            coordinator: input(c.coordinator.as_ref()),
        }
    }

    fn validate(&self, taxonomy: &dyn TaxonomyProvider) -> Result<Value, ValidationErrors> {
        let mut v = Validator::new();
        if v.required("name", "Name", &self.name) {
            v.max_len("name", "Name", &self.name, 200);
        }
        let kind = v.one_of_or_kept(
            "campaign_type",
            "Campaign type",
            &self.campaign_type,
            Vocabulary::CampaignType,
            taxonomy,
            self.kept.get("campaign_type"),
        );
        let status = v.one_of_or_kept(
            "status",
            "Status",
            &self.status,
            Vocabulary::CampaignStatus,
            taxonomy,
            self.kept.get("status"),
        );
        let start = v.date("planned_start_datetime", "Planned start", &self.planned_start_datetime);
        let end = v.date("planned_end_datetime", "Planned end", &self.planned_end_datetime);
        v.date_order("planned_end_datetime", "planned start", "Planned end", start, end);
        v.max_len("description", "Description", &self.description, 5000);
        v.max_len("funding_source", "Funding source", &self.funding_source, 200);
        let budget = v.number("budget", "Budget", &self.budget, 0.0, 1.0e12);
        v.max_len("coordinator", "Coordinator", &self.coordinator, 200);
        v.finish()?;

        Ok(json!({
            "station_id": self.station_id,
            "name": self.name.trim(),
            "campaign_type": canonical(kind),
            "status": canonical(status),
            "planned_start_datetime": text(&self.planned_start_datetime),
            "planned_end_datetime": text(&self.planned_end_datetime),
            "description": text(&self.description),
            "objectives": lines_to_list(&self.objectives),
            "expected_outcomes": lines_to_list(&self.expected_outcomes),
            "funding_source": text(&self.funding_source),
            "budget": number_value(budget),
            "coordinator": text(&self.coordinator),
        }))
    }
}
