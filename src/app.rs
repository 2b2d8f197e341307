// src/app.rs
use crate::db::Database;
use crate::errors::ServerError;
use crate::market::MarketClient;
use crate::store::RecordStore;
use crate::sync::DealsApi;
use crate::workflow::WorkflowConfig;
use std::sync::{Mutex, MutexGuard};

/// Everything a request handler needs. Shared by reference across the
/// server's worker threads.
pub struct App {
    pub db: Database,
    store: Mutex<RecordStore>,
    pub workflow: WorkflowConfig,
    pub deals_api: Option<DealsApi>,
    pub market: MarketClient,
}

impl App {
    pub fn new(
        db: Database,
        workflow: WorkflowConfig,
        deals_api: Option<DealsApi>,
        market: MarketClient,
    ) -> Result<Self, ServerError> {
        let store = RecordStore::open(db.clone())?;
        Ok(Self {
            db,
            store: Mutex::new(store),
            workflow,
            deals_api,
            market,
        })
    }

    /// Exclusive access to the record store. Keep the guard short-lived and
    /// never hold it across a remote call.
    pub fn store(&self) -> Result<MutexGuard<'_, RecordStore>, ServerError> {
        self.store.lock().map_err(|_| {
            tracing::error!("record store lock poisoned");
            ServerError::InternalError
        })
    }

    pub fn store_mutex(&self) -> &Mutex<RecordStore> {
        &self.store
    }
}
