// src/domain/buyer.rs

use crate::domain::coerce;
use crate::forms::FormData;
use serde::{Deserialize, Serialize};

/// A cash buyer on the dispo list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Buyer {
    #[serde(deserialize_with = "coerce::string")]
    pub id: String,
    #[serde(deserialize_with = "coerce::string")]
    pub name: String,
    #[serde(deserialize_with = "coerce::string")]
    pub email: String,
    #[serde(deserialize_with = "coerce::string")]
    pub phone: String,
    /// Free text, comma and/or whitespace separated.
    #[serde(deserialize_with = "coerce::string")]
    pub zips: String,
    #[serde(deserialize_with = "coerce::string")]
    pub criteria: String,
    #[serde(deserialize_with = "coerce::string")]
    pub notes: String,
    #[serde(deserialize_with = "coerce::timestamp")]
    pub updated: i64,
}

impl Buyer {
    pub fn from_form(form: &FormData, id: String, now: i64) -> Self {
        Self {
            id,
            name: form.text("name"),
            email: form.text("email"),
            phone: form.text("phone"),
            zips: form.text("zips"),
            criteria: form.text("criteria"),
            notes: form.text("notes"),
            updated: now,
        }
    }

    pub fn zip_tokens(&self) -> impl Iterator<Item = &str> {
        self.zips
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
    }

    pub fn wants_zip(&self, zip: &str) -> bool {
        let zip = zip.trim();
        !zip.is_empty() && self.zip_tokens().any(|t| t == zip)
    }

    pub fn matches(&self, filter: &str) -> bool {
        let f = filter.trim().to_lowercase();
        if f.is_empty() {
            return true;
        }
        [&self.name, &self.email, &self.phone, &self.zips, &self.criteria]
            .iter()
            .any(|field| field.to_lowercase().contains(&f))
    }
}
