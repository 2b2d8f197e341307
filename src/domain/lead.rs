// src/domain/lead.rs

use crate::domain::coerce;
use crate::domain::logic::compute_mao;
use crate::domain::settings::Settings;
use crate::forms::FormData;
use crate::workflow::Stage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LEAD_STATUSES: [&str; 7] = [
    "New",
    "Contacted",
    "Offer Sent",
    "Countered",
    "Accepted",
    "Under Contract",
    "Dead",
];

/// A property lead (a.k.a. deal). Stored as-is in the document and echoed,
/// with the id renamed, to the remote deals API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    #[serde(deserialize_with = "coerce::string")]
    pub id: String,
    #[serde(deserialize_with = "coerce::string")]
    pub address: String,
    #[serde(deserialize_with = "coerce::string")]
    pub city: String,
    #[serde(deserialize_with = "coerce::string")]
    pub zip: String,
    /// List price.
    #[serde(deserialize_with = "coerce::number")]
    pub list: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub arv: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub repairs: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub offer: f64,
    #[serde(deserialize_with = "coerce::string")]
    pub agent: String,
    #[serde(deserialize_with = "coerce::string")]
    pub phone: String,
    #[serde(deserialize_with = "coerce::string")]
    pub photos: String,
    #[serde(deserialize_with = "coerce::string")]
    pub comps: String,
    #[serde(deserialize_with = "coerce::string")]
    pub status: String,
    #[serde(deserialize_with = "coerce::string")]
    pub notes: String,
    /// Milliseconds since the epoch; 0 when never stamped.
    #[serde(deserialize_with = "coerce::timestamp")]
    pub updated: i64,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "coerce::stage")]
    pub stage: Option<Stage>,
    #[serde(
        alias = "cl",
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "coerce::checklist"
    )]
    pub checklist: BTreeMap<String, bool>,
}

impl Default for Lead {
    fn default() -> Self {
        Self {
            id: String::new(),
            address: String::new(),
            city: String::new(),
            zip: String::new(),
            list: 0.0,
            arv: 0.0,
            repairs: 0.0,
            offer: 0.0,
            agent: String::new(),
            phone: String::new(),
            photos: String::new(),
            comps: String::new(),
            status: "New".to_string(),
            notes: String::new(),
            updated: 0,
            stage: None,
            checklist: BTreeMap::new(),
        }
    }
}

impl Lead {
    /// Build a record from the lead form. Workflow fields are not part of
    /// the form; the store carries them over on edit.
    pub fn from_form(form: &FormData, id: String, now: i64) -> Self {
        let status = form.text("status");
        Self {
            id,
            address: form.text("address"),
            city: form.text("city"),
            zip: form.text("zip"),
            list: form.number("list"),
            arv: form.number("arv"),
            repairs: form.number("repairs"),
            offer: form.number("offer"),
            agent: form.text("agent"),
            phone: form.text("phone"),
            photos: form.text("photos"),
            comps: form.text("comps"),
            status: if status.is_empty() { "New".to_string() } else { status },
            notes: form.text("notes"),
            updated: now,
            stage: None,
            checklist: BTreeMap::new(),
        }
    }

    pub fn mao(&self, settings: &Settings) -> f64 {
        compute_mao(self.arv, self.repairs, settings.percent, settings.fee)
    }

    /// Case-insensitive substring match over the searchable columns.
    pub fn matches(&self, filter: &str) -> bool {
        let f = filter.trim().to_lowercase();
        if f.is_empty() {
            return true;
        }
        [&self.address, &self.city, &self.zip, &self.agent, &self.status]
            .iter()
            .any(|field| field.to_lowercase().contains(&f))
    }
}
