use crate::app::App;
use crate::compose::{matching_buyers, ComposedMessage};
use crate::domain::{compute_mao, new_record_id, now_millis, tasks, Buyer, Lead};
use crate::errors::{ResultResp, ServerError};
use crate::export;
use crate::forms::FormData;
use crate::market::{self, MarketSettings};
use crate::responses::{csv_response, html_response, redirect, xlsx_response};
use crate::sync::{self, SyncReport};
use crate::templates::pages;
use crate::workflow::{self, pipeline_counts, propose_transition};
use astra::Request;
use urlencoding::encode;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => dashboard(&req, app),
        ("POST", "/tasks/toggle") => toggle_task(&mut req, app),
        ("POST", "/sync") => sync_now(app),

        ("GET", "/leads") => leads(&req, app),
        ("POST", "/leads") => save_lead(&mut req, app),
        ("POST", "/leads/delete") => delete_lead(&mut req, app),
        ("GET", "/leads/export.csv") => {
            let store = app.store()?;
            let csv = export::to_csv(&store.document().leads)?;
            csv_response(csv, "leads.csv")
        }
        ("GET", "/leads/export.xlsx") => {
            let store = app.store()?;
            let leads: Vec<&Lead> = store.document().leads.iter().collect();
            let buffer = export::leads_workbook(&leads, store.settings())?;
            xlsx_response(buffer, "leads.xlsx")
        }

        ("GET", "/buyers") => buyers(&req, app),
        ("POST", "/buyers") => save_buyer(&mut req, app),
        ("POST", "/buyers/delete") => delete_buyer(&mut req, app),
        ("GET", "/buyers/export.csv") => {
            let store = app.store()?;
            let csv = export::to_csv(&store.document().buyers)?;
            csv_response(csv, "buyers.csv")
        }

        ("GET", "/calculator") => calculator(&req, app),
        ("GET", "/compose") => compose(&req, app),

        ("GET", "/pipeline") => pipeline(&req, app),
        ("POST", "/pipeline/start") => start_deal(&mut req, app),
        ("POST", "/pipeline/checklist") => toggle_checklist(&mut req, app),
        ("POST", "/pipeline/advance") => advance_deal(&mut req, app),

        ("GET", "/market") => market_page(&req, app),
        ("POST", "/market/settings") => save_market_settings(&mut req, app),
        ("POST", "/market/recent/clear") => {
            market::clear_recent(&app.db)?;
            redirect("/market")
        }

        ("GET", "/settings") => settings(&req, app),
        ("POST", "/settings") => save_settings(&mut req, app),
        ("POST", "/settings/reset") => reset_all(&mut req, app),

        _ => Err(ServerError::NotFound),
    }
}

fn redirect_with_notice(path: &str, message: &str) -> ResultResp {
    redirect(&format!("{path}?notice={}", encode(message)))
}

fn notice_of(req: &Request) -> Option<String> {
    FormData::from_query(req)
        .get("notice")
        .map(str::to_string)
}

// --- dashboard ---

fn dashboard(req: &Request, app: &App) -> ResultResp {
    let store = app.store()?;
    let doc = store.document();
    let vm = pages::DashboardVm {
        tasks: &doc.tasks,
        progress: tasks::progress_percent(&doc.tasks),
        lead_count: doc.leads.len(),
        buyer_count: doc.buyers.len(),
        offers_target: doc.settings.offers,
        pipeline: pipeline_counts(&app.workflow, &doc.leads),
        sync_enabled: app.deals_api.is_some(),
        notice: notice_of(req),
    };
    html_response(pages::dashboard_page(&vm))
}

fn toggle_task(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    let day = form.number("day") as u8;
    let slot = form.number("slot") as usize;
    let checked = form.checked("checked");

    if !app.store()?.set_task(day, slot, checked)? {
        return Err(ServerError::BadRequest(format!(
            "No task {slot} on day {day}"
        )));
    }
    redirect("/")
}

fn sync_now(app: &App) -> ResultResp {
    let message = match sync::sync_leads(app.store_mutex(), app.deals_api.as_ref()) {
        SyncReport::Disabled => "Remote sync is not configured.".to_string(),
        SyncReport::Merged { fetched, total } => {
            format!("Synced {fetched} remote leads; {total} leads total.")
        }
        SyncReport::Failed(e) => format!("Sync failed, working from local data: {e}"),
    };
    redirect_with_notice("/", &message)
}

// --- leads ---

fn leads(req: &Request, app: &App) -> ResultResp {
    let query = FormData::from_query(req);
    let filter = query.text("q");
    let store = app.store()?;

    let editing = match query.get("edit") {
        Some(id) => Some(store.lead(id).ok_or(ServerError::NotFound)?),
        None => None,
    };

    let vm = pages::LeadsVm {
        leads: store.leads_view(&filter),
        settings: store.settings(),
        filter,
        editing,
        notice: query.get("notice").map(str::to_string),
    };
    html_response(pages::leads_page(&vm))
}

fn save_lead(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    let address = form.require("address")?;
    let id = match form.text("id") {
        id if id.is_empty() => new_record_id(),
        id => id,
    };

    let lead = Lead::from_form(&form, id, now_millis());
    let saved = app.store()?.save_lead_form(lead)?;
    tracing::info!(id = %saved.id, %address, "lead saved");

    let message = match sync::push_lead(app.deals_api.as_ref(), &saved) {
        Ok(()) => "Lead saved.",
        Err(_) => "Lead saved locally; remote save failed.",
    };
    redirect_with_notice("/leads", message)
}

fn delete_lead(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    let id = form.require("id")?;
    if !app.store()?.delete_lead(&id)? {
        return Err(ServerError::NotFound);
    }
    tracing::info!(%id, "lead deleted");
    redirect_with_notice("/leads", "Lead deleted.")
}

// --- buyers ---

fn buyers(req: &Request, app: &App) -> ResultResp {
    let query = FormData::from_query(req);
    let filter = query.text("q");
    let store = app.store()?;

    let editing = match query.get("edit") {
        Some(id) => Some(store.buyer(id).ok_or(ServerError::NotFound)?),
        None => None,
    };

    let vm = pages::BuyersVm {
        buyers: store.buyers_view(&filter),
        filter,
        editing,
        notice: query.get("notice").map(str::to_string),
    };
    html_response(pages::buyers_page(&vm))
}

fn save_buyer(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    form.require("name")?;
    let id = match form.text("id") {
        id if id.is_empty() => new_record_id(),
        id => id,
    };

    let buyer = Buyer::from_form(&form, id, now_millis());
    app.store()?.put_buyer(buyer)?;
    redirect_with_notice("/buyers", "Buyer saved.")
}

fn delete_buyer(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    let id = form.require("id")?;
    if !app.store()?.delete_buyer(&id)? {
        return Err(ServerError::NotFound);
    }
    redirect_with_notice("/buyers", "Buyer deleted.")
}

// --- calculator / compose ---

fn calculator(req: &Request, app: &App) -> ResultResp {
    let query = FormData::from_query(req);
    let (default_percent, default_fee) = {
        let store = app.store()?;
        (store.settings().percent, store.settings().fee)
    };

    let arv = query.number_opt("arv");
    let repairs = query.number_opt("repairs");
    let percent = query.number_opt("percent").unwrap_or(default_percent);
    let fee = query.number_opt("fee").unwrap_or(default_fee);
    let mao = (arv.is_some() || repairs.is_some())
        .then(|| compute_mao(arv.unwrap_or(0.0), repairs.unwrap_or(0.0), percent, fee));

    let vm = pages::CalculatorVm {
        arv,
        repairs,
        percent,
        fee,
        mao,
    };
    html_response(pages::calculator_page(&vm))
}

fn compose(req: &Request, app: &App) -> ResultResp {
    let query = FormData::from_query(req);
    let store = app.store()?;
    let doc = store.document();

    let selected = match query.get("id").filter(|id| !id.is_empty()) {
        Some(id) => Some(store.lead(id).ok_or(ServerError::NotFound)?),
        None => None,
    };

    let message = selected.map(|lead| ComposedMessage::for_lead(lead, &doc.settings, &doc.buyers));
    let buyers = selected
        .map(|lead| matching_buyers(lead, &doc.settings, &doc.buyers))
        .unwrap_or_default();

    let vm = pages::ComposeVm {
        leads: store.leads_view(""),
        selected,
        mailto: message
            .as_ref()
            .map(|m| m.mailto_url(&doc.settings))
            .unwrap_or_default(),
        sms: message.as_ref().map(|m| m.sms_url()).unwrap_or_default(),
        message,
        buyers,
    };
    html_response(pages::compose_page(&vm))
}

// --- pipeline ---

fn pipeline(req: &Request, app: &App) -> ResultResp {
    let store = app.store()?;
    let vm = pages::PipelineVm {
        config: &app.workflow,
        settings: store.settings(),
        leads: store.leads_view(""),
        notice: notice_of(req),
    };
    html_response(pages::pipeline_page(&vm))
}

/// Push a stored workflow change and redirect back to the board. Runs after
/// the store guard is released.
fn push_deal(app: &App, saved: &Lead) -> ResultResp {
    match sync::push_lead(app.deals_api.as_ref(), saved) {
        Ok(()) => redirect("/pipeline"),
        Err(_) => redirect_with_notice("/pipeline", "Saved locally; remote save failed."),
    }
}

fn not_in_pipeline() -> ServerError {
    ServerError::BadRequest("Deal is not in the pipeline".into())
}

fn start_deal(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    let id = form.require("id")?;
    let saved = app
        .store()?
        .update_deal_with(&id, |deal| Ok(workflow::enter_pipeline(&app.workflow, deal)))?;
    push_deal(app, &saved)
}

fn toggle_checklist(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    let id = form.require("id")?;
    let item = form.require("item")?;
    let checked = form.checked("checked");

    let saved = app.store()?.update_deal_with(&id, |deal| {
        let stage = deal.stage.ok_or_else(not_in_pipeline)?;
        if !workflow::checklist_for(&app.workflow, stage)
            .iter()
            .any(|i| i.id == item)
        {
            return Err(ServerError::BadRequest(format!(
                "'{item}' is not a checklist item for {stage}"
            )));
        }
        Ok(workflow::set_checklist_item(deal, &item, checked))
    })?;
    push_deal(app, &saved)
}

fn advance_deal(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    let id = form.require("id")?;

    // Gate check and write happen under one guard.
    let (from, saved) = {
        let mut store = app.store()?;
        let deal = store.lead(&id).ok_or(ServerError::NotFound)?;
        let stage = deal.stage.ok_or_else(not_in_pipeline)?;

        if !form.checked("force") {
            let proposal = propose_transition(&app.workflow, stage, &deal.checklist);
            if !proposal.ready {
                let gate = workflow::gate_status(&app.workflow, stage, &deal.checklist);
                let message = if gate.satisfied {
                    format!("{stage} is the last stage.")
                } else {
                    format!("Still needed: {}", gate.missing_ids.join(", "))
                };
                return redirect_with_notice("/pipeline", &message);
            }
        }

        let advanced = workflow::apply_transition(&app.workflow, deal);
        if advanced.stage == deal.stage {
            return redirect_with_notice("/pipeline", &format!("{stage} is the last stage."));
        }
        (stage, store.update_deal_with(&id, |_| Ok(advanced))?)
    };

    tracing::info!(id = %saved.id, %from, to = ?saved.stage, "deal advanced");
    push_deal(app, &saved)
}

// --- market intel ---

fn market_page(req: &Request, app: &App) -> ResultResp {
    let query = FormData::from_query(req);
    let location = query.text("location");
    let settings = MarketSettings::load(&app.db)?;

    let (results, error) = if query.get("location").is_some() {
        match app.market.analyze(&settings, &location) {
            Ok(results) => {
                market::remember_search(&app.db, &location)?;
                (Some(results), None)
            }
            Err(e) => {
                tracing::warn!(%location, error = %e, "market analysis failed");
                (None, Some(e.to_string()))
            }
        }
    } else {
        (None, None)
    };

    let vm = pages::MarketVm {
        location,
        configured: settings.is_configured(),
        recent: market::recent_searches(&app.db)?,
        results,
        error,
    };
    html_response(pages::market_page(&vm))
}

fn save_market_settings(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    let settings = MarketSettings {
        api_url: form.text("apiUrl"),
        token: form.text("token"),
        evidence_mode: form.checked("evidence"),
    };
    settings.save(&app.db)?;
    redirect_with_notice("/settings", "Market Intel settings saved!")
}

// --- settings ---

fn settings(req: &Request, app: &App) -> ResultResp {
    let market = MarketSettings::load(&app.db)?;
    let store = app.store()?;
    let notice = notice_of(req);
    html_response(pages::settings_page(store.settings(), &market, notice.as_deref()))
}

fn save_settings(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    app.store()?.apply_settings_form(&form)?;
    redirect_with_notice("/settings", "Settings saved.")
}

fn reset_all(req: &mut Request, app: &App) -> ResultResp {
    let form = FormData::from_body(req)?;
    if form.text("confirm") != "yes" {
        return Err(ServerError::BadRequest(
            "Confirm the reset to delete all local data".into(),
        ));
    }
    app.store()?.reset_all()?;
    tracing::warn!("all local data reset");
    redirect_with_notice("/", "All local data deleted.")
}
