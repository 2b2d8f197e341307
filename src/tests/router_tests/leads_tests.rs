use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, location, post_form, test_app, TestApp};

fn add_lead(t: &TestApp, body: &str) -> String {
    let resp = handle(post_form("/leads", body), &t.app).unwrap();
    assert_eq!(resp.status(), 303);
    let store = t.app.store().unwrap();
    store.document().leads.last().unwrap().id.clone()
}

#[test]
fn saving_a_lead_persists_and_lists_it_with_mao() {
    let t = test_app();
    add_lead(
        &t,
        "address=12+Oak+St&city=Macon&zip=31201&arv=200000&repairs=30000&offer=95000&agent=Dana&status=New",
    );

    let body = body_string(handle(get("/leads"), &t.app).unwrap());
    assert!(body.contains("12 Oak St"));
    assert!(body.contains("$100,000"));
    assert!(body.contains("$95,000"));
}

#[test]
fn saving_requires_an_address() {
    let t = test_app();
    let err = handle(post_form("/leads", "city=Macon"), &t.app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn non_numeric_amounts_are_stored_as_zero() {
    let t = test_app();
    add_lead(&t, "address=1+Elm&arv=lots&repairs=");
    let store = t.app.store().unwrap();
    let lead = &store.document().leads[0];
    assert_eq!(lead.arv, 0.0);
    assert_eq!(lead.repairs, 0.0);
    assert_eq!(lead.status, "New");
}

#[test]
fn editing_replaces_in_place() {
    let t = test_app();
    let id = add_lead(&t, "address=1+Elm&arv=100");
    add_lead(&t, &format!("id={id}&address=1+Elm+Street&arv=150"));

    let store = t.app.store().unwrap();
    assert_eq!(store.document().leads.len(), 1);
    assert_eq!(store.document().leads[0].address, "1 Elm Street");
}

#[test]
fn filter_narrows_the_list() {
    let t = test_app();
    add_lead(&t, "address=1+Elm&zip=31201");
    add_lead(&t, "address=9+Pine&zip=30301");

    let body = body_string(handle(get("/leads?q=pine"), &t.app).unwrap());
    assert!(body.contains("9 Pine"));
    assert!(!body.contains("1 Elm"));
}

#[test]
fn delete_removes_the_lead() {
    let t = test_app();
    let id = add_lead(&t, "address=1+Elm");

    let resp = handle(post_form("/leads/delete", &format!("id={id}")), &t.app).unwrap();
    assert!(location(&resp).starts_with("/leads"));
    assert!(t.app.store().unwrap().document().leads.is_empty());

    let err = handle(post_form("/leads/delete", &format!("id={id}")), &t.app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn csv_export_quotes_values() {
    let t = test_app();
    add_lead(&t, "address=1+Elm&notes=He+said+%22ok%22");

    let resp = handle(get("/leads/export.csv"), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "text/csv; charset=utf-8"
    );
    let body = body_string(resp);
    assert!(body.starts_with("id,address,"));
    assert!(body.contains("\"He said \"\"ok\"\"\""));
}

#[test]
fn csv_export_of_nothing_is_a_bad_request() {
    let t = test_app();
    let err = handle(get("/leads/export.csv"), &t.app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(ref m) if m == "Nothing to export."));
}

#[test]
fn xlsx_export_is_an_attachment() {
    let t = test_app();
    add_lead(&t, "address=1+Elm&arv=100000");

    let resp = handle(get("/leads/export.xlsx"), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"leads.xlsx\""
    );
}

#[test]
fn compose_preview_builds_links() {
    let t = test_app();
    handle(post_form("/settings", "company=Acme&replyEmail=me%40acme.test&zipFilter=on"), &t.app).unwrap();
    handle(post_form("/buyers", "name=Cash+Co&email=cash%40buyers.test&zips=31201"), &t.app).unwrap();
    let id = add_lead(&t, "address=12+Oak+St&zip=31201&arv=200000&offer=95000");

    let body = body_string(handle(get(&format!("/compose?id={id}")), &t.app).unwrap());
    assert!(body.contains("Acme — 12 Oak St 31201 — ARV $200,000 | Ask $95,000"));
    assert!(body.contains("mailto:me%40acme.test?subject="));
    assert!(body.contains("&amp;bcc=cash%40buyers.test"));
    assert!(body.contains("sms:?&amp;body="));
    assert!(body.contains("Cash Co"));
}

#[test]
fn compose_for_missing_lead_is_not_found() {
    let t = test_app();
    let err = handle(get("/compose?id=ghost"), &t.app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
