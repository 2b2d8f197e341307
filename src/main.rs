use crate::app::App;
use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::market::MarketClient;
use crate::router::handle;
use crate::sync::{DealsApi, SyncReport};
use crate::workflow::WorkflowConfig;
use astra::Server;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod compose;
mod config;
mod db;
mod domain;
mod errors;
mod export;
mod forms;
mod market;
mod responses;
mod router;
mod store;
mod sync;
mod templates;
mod workflow;

#[cfg(test)]
mod tests;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deal_sheet=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_workflow(cfg: &AppConfig) -> Result<WorkflowConfig, workflow::WorkflowError> {
    match &cfg.workflow {
        Some(path) => {
            let wf = WorkflowConfig::load(path)?;
            tracing::info!(path = %path.display(), stages = wf.stages().len(), "loaded workflow config");
            Ok(wf)
        }
        None => Ok(WorkflowConfig::default()),
    }
}

fn main() {
    init_tracing();
    let cfg = AppConfig::parse();

    let workflow = match load_workflow(&cfg) {
        Ok(wf) => wf,
        Err(e) => {
            tracing::error!(error = %e, "invalid workflow configuration");
            std::process::exit(2);
        }
    };

    let db = Database::new(&cfg.db);
    if let Err(e) = init_db(&db) {
        tracing::error!(error = %e, db = %cfg.db.display(), "database initialization failed");
        std::process::exit(1);
    }

    let deals_api = match cfg.deals_api.as_deref() {
        Some(url) => match DealsApi::new(url, &cfg.origin, cfg.http_timeout()) {
            Ok(api) => {
                tracing::info!(url = api.base_url(), "deals API sync enabled");
                Some(api)
            }
            Err(e) => {
                tracing::error!(error = %e, "could not build deals API client");
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!("no deals API configured, running local-only");
            None
        }
    };

    let market = match MarketClient::new(cfg.http_timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "could not build market client");
            std::process::exit(1);
        }
    };

    let app = match App::new(db, workflow, deals_api, market) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "could not open record store");
            std::process::exit(1);
        }
    };

    if !cfg.no_sync {
        match sync::sync_leads(app.store_mutex(), app.deals_api.as_ref()) {
            SyncReport::Merged { fetched, total } => {
                tracing::info!(fetched, total, "startup sync complete")
            }
            SyncReport::Failed(_) | SyncReport::Disabled => {}
        }
    }

    tracing::info!(addr = %cfg.addr, workers = cfg.workers, "starting server");

    let server = Server::bind(&cfg.addr).max_workers(cfg.workers);
    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => {
            tracing::debug!(error = %err, "request failed");
            templates::html_error_response(err)
        }
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
        std::process::exit(1);
    }

    tracing::info!("server shut down cleanly");
}
