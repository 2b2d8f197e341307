// src/sync/mod.rs
//
// Best-effort bridge to the remote deals API. Every call returns a Result;
// callers log the failure and keep working from local data.

mod api_lead;

use api_lead::ApiLead;

use crate::domain::Lead;
use crate::errors::ServerError;
use crate::store::RecordStore;
use reqwest::blocking::Client;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Request failed: {0}")]
    Network(String),
    #[error("API Error: {status} {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Local store error: {0}")]
    Store(#[from] ServerError),
}

pub struct DealsApi {
    base_url: String,
    origin: String,
    client: Client,
}

impl DealsApi {
    pub fn new(base_url: &str, origin: &str, timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            origin: origin.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /deals`, translated into local leads.
    pub fn fetch_leads(&self) -> Result<Vec<Lead>, SyncError> {
        let resp = self
            .client
            .get(format!("{}/deals", self.base_url))
            .header("Content-Type", "application/json")
            .header("Origin", &self.origin)
            .send()
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(SyncError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let records: Vec<Value> = resp.json().map_err(|e| SyncError::Decode(e.to_string()))?;
        let leads = leads_from_api(records);
        tracing::info!(count = leads.len(), "loaded leads from deals API");
        Ok(leads)
    }

    /// `POST /deal` with one lead. The confirmation is logged, not used.
    pub fn push_lead(&self, lead: &Lead) -> Result<(), SyncError> {
        let payload = ApiLead::for_upload(lead, chrono::Utc::now());

        let resp = self
            .client
            .post(format!("{}/deal", self.base_url))
            .header("Content-Type", "application/json")
            .header("Origin", &self.origin)
            .json(&payload)
            .send()
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        if !status.is_success() {
            return Err(SyncError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(id = %lead.id, response = %body, "lead saved to deals API");
        Ok(())
    }
}

/// Translate remote records, dropping any without a usable id.
pub fn leads_from_api(records: Vec<Value>) -> Vec<Lead> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<ApiLead>(record) {
            Ok(api) if !api.deal_id.is_empty() => Some(api.into_lead()),
            Ok(_) => {
                tracing::warn!("skipping remote deal without DealId");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed remote deal");
                None
            }
        })
        .collect()
}

/// What a sync pass did, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncReport {
    Disabled,
    Merged { fetched: usize, total: usize },
    Failed(String),
}

/// Pull remote leads and merge them into the store.
///
/// The store lock is held only for the merge itself. On any remote failure
/// the local collection is left exactly as it was.
pub fn sync_leads(store: &Mutex<RecordStore>, api: Option<&DealsApi>) -> SyncReport {
    let Some(api) = api else {
        return SyncReport::Disabled;
    };

    let remote = match api.fetch_leads() {
        Ok(remote) => remote,
        Err(e) => {
            tracing::warn!(error = %e, "sync skipped, keeping local leads");
            return SyncReport::Failed(e.to_string());
        }
    };

    let fetched = remote.len();
    let merged = match store.lock() {
        Ok(mut store) => store.merge_remote_leads(remote),
        Err(_) => Err(ServerError::InternalError),
    };

    match merged {
        Ok(total) => {
            tracing::info!(fetched, total, "synced leads");
            SyncReport::Merged { fetched, total }
        }
        Err(e) => {
            tracing::error!(error = %e, "merge of remote leads failed");
            SyncReport::Failed(e.to_string())
        }
    }
}

/// Push a freshly saved lead. Failure leaves the local copy authoritative
/// until the next sync.
pub fn push_lead(api: Option<&DealsApi>, lead: &Lead) -> Result<(), SyncError> {
    let Some(api) = api else {
        return Ok(());
    };
    match api.push_lead(lead) {
        Ok(()) => {
            tracing::info!(id = %lead.id, "lead saved locally and remotely");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(id = %lead.id, error = %e, "saved locally, remote save failed");
            Err(e)
        }
    }
}
