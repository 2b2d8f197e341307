// src/market/mod.rs
//
// Optional market-intelligence lookup. The endpoint and token are supplied
// by the user and kept in their own storage slots; results are only
// rendered, never written into the dashboard document.

use crate::db::{kv, Database};
use crate::domain::coerce;
use crate::errors::ServerError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const API_URL_KEY: &str = "HOT_MARKETS_API";
pub const TOKEN_KEY: &str = "HOT_MARKETS_TOKEN";
pub const EVIDENCE_KEY: &str = "HMF_EVIDENCE";
pub const RECENT_KEY: &str = "recentMarketSearches";
const MAX_RECENT: usize = 5;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Please configure API URL and Token in Market Intel settings first")]
    NotConfigured,
    #[error("Please enter a location to analyze")]
    MissingLocation,
    #[error("Request failed: {0}")]
    Network(String),
    #[error("API Error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketSettings {
    pub api_url: String,
    pub token: String,
    pub evidence_mode: bool,
}

impl MarketSettings {
    pub fn load(db: &Database) -> Result<Self, ServerError> {
        db.with_conn(|conn| {
            Ok(Self {
                api_url: kv::get(conn, API_URL_KEY)?.unwrap_or_default(),
                token: kv::get(conn, TOKEN_KEY)?.unwrap_or_default(),
                evidence_mode: kv::get(conn, EVIDENCE_KEY)?.as_deref() == Some("1"),
            })
        })
    }

    pub fn save(&self, db: &Database) -> Result<(), ServerError> {
        db.with_conn(|conn| {
            kv::put(conn, API_URL_KEY, self.api_url.trim())?;
            kv::put(conn, TOKEN_KEY, self.token.trim())?;
            kv::put(conn, EVIDENCE_KEY, if self.evidence_mode { "1" } else { "0" })
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_url.trim().is_empty() && !self.token.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketData {
    pub avg_days_on_market: Option<f64>,
    pub months_of_supply: Option<f64>,
    pub sale_to_list_ratio: Option<f64>,
    pub price_reductions: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketScore {
    #[serde(deserialize_with = "coerce::string")]
    pub city: String,
    #[serde(deserialize_with = "coerce::string")]
    pub state: String,
    #[serde(deserialize_with = "coerce::string")]
    pub zip_code: String,
    #[serde(deserialize_with = "coerce::number")]
    pub score: f64,
    #[serde(deserialize_with = "coerce::string")]
    pub classification: String,
    #[serde(deserialize_with = "coerce::null_default")]
    pub data: MarketData,
    #[serde(deserialize_with = "coerce::null_default")]
    pub insights: Vec<String>,
    #[serde(deserialize_with = "coerce::null_default")]
    pub evidence: Vec<String>,
}

/// Headline numbers over one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary {
    pub location: String,
    pub analyzed: usize,
    pub hot: usize,
    pub average_score: i64,
    pub top: Option<(String, String, f64)>,
}

impl MarketSummary {
    pub fn of(location: &str, results: &[MarketScore]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }
        let hot = results.iter().filter(|m| m.classification == "HOT").count();
        let total: f64 = results.iter().map(|m| m.score).sum();
        let average_score = (total / results.len() as f64).round() as i64;
        let top = results
            .first()
            .map(|m| (m.city.clone(), m.state.clone(), m.score));

        Some(Self {
            location: location.to_string(),
            analyzed: results.len(),
            hot,
            average_score,
            top,
        })
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Analyzed {} markets in {}", self.analyzed, self.location),
            format!("{} hot markets found (score 80+)", self.hot),
            format!("Average market score: {}", self.average_score),
        ];
        if let Some((city, state, score)) = &self.top {
            lines.push(format!("Top market: {city}, {state} (Score: {score})"));
        }
        lines
    }
}

pub struct MarketClient {
    client: Client,
}

impl MarketClient {
    pub fn new(timeout: Duration) -> Result<Self, MarketError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    /// Score the markets around `location`. Missing configuration or an
    /// empty location is reported without making a request.
    pub fn analyze(&self, settings: &MarketSettings, location: &str) -> Result<Vec<MarketScore>, MarketError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(MarketError::MissingLocation);
        }
        if !settings.is_configured() {
            return Err(MarketError::NotConfigured);
        }

        let resp = self
            .client
            .get(settings.api_url.trim())
            .query(&[("location", location), ("token", settings.token.trim())])
            .send()
            .map_err(|e| MarketError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(MarketError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let results: Vec<MarketScore> = resp.json().map_err(|e| MarketError::Decode(e.to_string()))?;
        tracing::info!(location, count = results.len(), "market analysis complete");
        Ok(results)
    }
}

pub fn recent_searches(db: &Database) -> Result<Vec<String>, ServerError> {
    let raw = db.with_conn(|conn| kv::get(conn, RECENT_KEY))?;
    Ok(raw
        .and_then(|s| serde_json::from_str::<Vec<String>>(&s).ok())
        .unwrap_or_default())
}

/// Newest first, distinct, at most five.
pub fn remember_search(db: &Database, location: &str) -> Result<Vec<String>, ServerError> {
    let mut recent = recent_searches(db)?;
    let location = location.trim();
    if location.is_empty() || recent.iter().any(|s| s == location) {
        return Ok(recent);
    }
    recent.insert(0, location.to_string());
    recent.truncate(MAX_RECENT);

    let json = serde_json::to_string(&recent)
        .map_err(|e| ServerError::DbError(format!("serialize recent searches failed: {e}")))?;
    db.with_conn(|conn| kv::put(conn, RECENT_KEY, &json))?;
    Ok(recent)
}

pub fn clear_recent(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| kv::remove(conn, RECENT_KEY))
}
