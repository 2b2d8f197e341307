// src/sync/api_lead.rs

use crate::domain::coerce;
use crate::domain::Lead;
use crate::workflow::Stage;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A lead as the deals API stores it. Same fields as the local record; the
/// identifier is called `DealId` remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiLead {
    #[serde(rename = "DealId", default, deserialize_with = "coerce::string")]
    pub deal_id: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub address: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub city: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub zip: String,
    #[serde(default, deserialize_with = "coerce::number")]
    pub list: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    pub arv: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    pub repairs: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    pub offer: f64,
    #[serde(default, deserialize_with = "coerce::string")]
    pub agent: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub phone: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub photos: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub comps: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub status: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub notes: String,
    #[serde(default, deserialize_with = "coerce::timestamp")]
    pub updated: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "coerce::stage"
    )]
    pub stage: Option<Stage>,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "coerce::checklist"
    )]
    pub checklist: BTreeMap<String, bool>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ApiLead {
    /// Upload shape: blank status becomes "New", an unstamped lead is
    /// stamped with the upload time.
    pub fn for_upload(lead: &Lead, now: DateTime<Utc>) -> Self {
        Self {
            deal_id: lead.id.clone(),
            address: lead.address.clone(),
            city: lead.city.clone(),
            zip: lead.zip.clone(),
            list: lead.list,
            arv: lead.arv,
            repairs: lead.repairs,
            offer: lead.offer,
            agent: lead.agent.clone(),
            phone: lead.phone.clone(),
            photos: lead.photos.clone(),
            comps: lead.comps.clone(),
            status: if lead.status.is_empty() {
                "New".to_string()
            } else {
                lead.status.clone()
            },
            notes: lead.notes.clone(),
            updated: if lead.updated == 0 {
                now.timestamp_millis()
            } else {
                lead.updated
            },
            stage: lead.stage,
            checklist: lead.checklist.clone(),
            created_at: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    pub fn into_lead(self) -> Lead {
        Lead {
            id: self.deal_id,
            address: self.address,
            city: self.city,
            zip: self.zip,
            list: self.list,
            arv: self.arv,
            repairs: self.repairs,
            offer: self.offer,
            agent: self.agent,
            phone: self.phone,
            photos: self.photos,
            comps: self.comps,
            status: if self.status.is_empty() {
                "New".to_string()
            } else {
                self.status
            },
            notes: self.notes,
            updated: self.updated,
            stage: self.stage,
            checklist: self.checklist,
        }
    }
}
