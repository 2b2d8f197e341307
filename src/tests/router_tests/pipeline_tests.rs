use crate::errors::ServerError;
use crate::router::handle;
use crate::domain::Lead;
use crate::tests::utils::{
    body_string, get, location, post_form, test_app, test_app_with, unreachable_deals_api, TestApp,
};
use crate::workflow::{Stage, WorkflowConfig};

fn lead_in_pipeline(t: &TestApp) -> String {
    handle(post_form("/leads", "address=12+Oak+St&zip=31201"), &t.app).unwrap();
    let id = t.app.store().unwrap().document().leads[0].id.clone();
    let resp = handle(post_form("/pipeline/start", &format!("id={id}")), &t.app).unwrap();
    assert_eq!(location(&resp), "/pipeline");
    id
}

fn check(t: &TestApp, id: &str, item: &str) {
    let body = format!("id={id}&item={item}&checked=1");
    handle(post_form("/pipeline/checklist", &body), &t.app).unwrap();
}

fn stage_of(t: &TestApp, id: &str) -> Option<Stage> {
    t.app.store().unwrap().lead(id).and_then(|l| l.stage)
}

#[test]
fn unstaged_leads_are_offered_a_start() {
    let t = test_app();
    handle(post_form("/leads", "address=12+Oak+St"), &t.app).unwrap();

    let body = body_string(handle(get("/pipeline"), &t.app).unwrap());
    assert!(body.contains("Not in pipeline"));
    assert!(body.contains("/pipeline/start"));
}

#[test]
fn started_deal_shows_its_gate() {
    let t = test_app();
    let id = lead_in_pipeline(&t);
    assert_eq!(stage_of(&t, &id), Some(Stage::Prospect));

    let body = body_string(handle(get("/pipeline"), &t.app).unwrap());
    assert!(body.contains("Needs 2"));
    assert!(body.contains("Enter address + owner details"));
    assert!(body.contains("Force advance"));
}

#[test]
fn completing_required_items_allows_advance() {
    let t = test_app();
    let id = lead_in_pipeline(&t);
    check(&t, &id, "basic_info");
    check(&t, &id, "initial_comps");

    let body = body_string(handle(get("/pipeline"), &t.app).unwrap());
    assert!(body.contains("Ready"));
    assert!(body.contains("Prospect complete → Move to **Lead**"));

    handle(post_form("/pipeline/advance", &format!("id={id}")), &t.app).unwrap();
    let store = t.app.store().unwrap();
    let deal = store.lead(&id).unwrap();
    assert_eq!(deal.stage, Some(Stage::Lead));
    assert!(deal.checklist.is_empty());
}

#[test]
fn advance_is_refused_until_the_gate_is_met() {
    let t = test_app();
    let id = lead_in_pipeline(&t);
    check(&t, &id, "basic_info");

    let resp = handle(post_form("/pipeline/advance", &format!("id={id}")), &t.app).unwrap();
    assert_eq!(
        location(&resp),
        "/pipeline?notice=Still%20needed%3A%20initial_comps"
    );
    assert_eq!(stage_of(&t, &id), Some(Stage::Prospect));
}

#[test]
fn force_advance_skips_the_gate() {
    let t = test_app();
    let id = lead_in_pipeline(&t);

    handle(post_form("/pipeline/advance", &format!("id={id}&force=1")), &t.app).unwrap();
    assert_eq!(stage_of(&t, &id), Some(Stage::Lead));
}

#[test]
fn last_stage_does_not_advance() {
    let t = test_app();
    let id = lead_in_pipeline(&t);
    for _ in 0..4 {
        handle(post_form("/pipeline/advance", &format!("id={id}&force=1")), &t.app).unwrap();
    }
    assert_eq!(stage_of(&t, &id), Some(Stage::Closing));

    let resp = handle(post_form("/pipeline/advance", &format!("id={id}&force=1")), &t.app).unwrap();
    assert!(location(&resp).contains("last%20stage"));
    assert_eq!(stage_of(&t, &id), Some(Stage::Closing));
}

#[test]
fn unknown_checklist_item_is_rejected() {
    let t = test_app();
    let id = lead_in_pipeline(&t);
    let err = handle(
        post_form("/pipeline/checklist", &format!("id={id}&item=bogus&checked=1")),
        &t.app,
    )
    .unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn editing_the_lead_keeps_its_stage() {
    let t = test_app();
    let id = lead_in_pipeline(&t);
    check(&t, &id, "basic_info");

    handle(post_form("/leads", &format!("id={id}&address=12+Oak+Street")), &t.app).unwrap();
    let store = t.app.store().unwrap();
    let deal = store.lead(&id).unwrap();
    assert_eq!(deal.address, "12 Oak Street");
    assert_eq!(deal.stage, Some(Stage::Prospect));
    assert_eq!(deal.checklist.get("basic_info"), Some(&true));
}

#[test]
fn checklist_toggle_keeps_a_newer_lead_edit() {
    let t = test_app();
    let id = lead_in_pipeline(&t);

    handle(post_form("/leads", &format!("id={id}&address=99+New+Ave")), &t.app).unwrap();
    check(&t, &id, "basic_info");
    handle(post_form("/pipeline/advance", &format!("id={id}&force=1")), &t.app).unwrap();

    let store = t.app.store().unwrap();
    let deal = store.lead(&id).unwrap();
    assert_eq!(deal.address, "99 New Ave");
    assert_eq!(deal.stage, Some(Stage::Lead));
}

#[test]
fn pipeline_edits_report_a_failed_remote_save() {
    let t = test_app_with(WorkflowConfig::default(), Some(unreachable_deals_api()));
    let resp = handle(post_form("/leads", "address=12+Oak+St"), &t.app).unwrap();
    assert!(location(&resp).contains("remote%20save%20failed"));
    let id = t.app.store().unwrap().document().leads[0].id.clone();

    let resp = handle(post_form("/pipeline/start", &format!("id={id}")), &t.app).unwrap();
    assert_eq!(
        location(&resp),
        "/pipeline?notice=Saved%20locally%3B%20remote%20save%20failed."
    );
    assert_eq!(stage_of(&t, &id), Some(Stage::Prospect));

    let resp = handle(
        post_form("/pipeline/checklist", &format!("id={id}&item=basic_info&checked=1")),
        &t.app,
    )
    .unwrap();
    assert!(location(&resp).contains("remote%20save%20failed"));
}

#[test]
fn pipeline_edits_without_a_remote_have_no_notice() {
    let t = test_app();
    let id = lead_in_pipeline(&t);
    let resp = handle(
        post_form("/pipeline/checklist", &format!("id={id}&item=basic_info&checked=1")),
        &t.app,
    )
    .unwrap();
    assert_eq!(location(&resp), "/pipeline");
}

#[test]
fn deal_outside_a_custom_workflow_can_restart() {
    let cfg = WorkflowConfig::from_json(r#"{ "stages": ["Prospect", "Lead"], "flows": {} }"#).unwrap();
    let t = test_app_with(cfg, None);
    t.app
        .store()
        .unwrap()
        .put_lead(Lead {
            id: "orphan".into(),
            address: "7 Lost Ln".into(),
            stage: Some(Stage::Closing),
            ..Lead::default()
        })
        .unwrap();

    let body = body_string(handle(get("/pipeline"), &t.app).unwrap());
    assert!(body.contains("Not in pipeline"));
    assert!(body.contains("7 Lost Ln"));

    handle(post_form("/pipeline/start", "id=orphan"), &t.app).unwrap();
    assert_eq!(stage_of(&t, "orphan"), Some(Stage::Prospect));
}
