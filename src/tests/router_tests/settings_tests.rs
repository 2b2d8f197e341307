use crate::errors::ServerError;
use crate::market::MarketSettings;
use crate::router::handle;
use crate::tests::utils::{body_string, get, location, post_form, test_app};

#[test]
fn settings_form_coerces_and_persists() {
    let t = test_app();
    let resp = handle(
        post_form("/settings", "percent=0&fee=abc&offers=&company=&sender=Riley&zipFilter=on"),
        &t.app,
    )
    .unwrap();
    assert!(location(&resp).starts_with("/settings?notice="));

    let store = t.app.store().unwrap();
    let s = store.settings();
    assert_eq!(s.percent, 0.7);
    assert_eq!(s.fee, 10_000.0);
    assert_eq!(s.offers, 10);
    assert_eq!(s.company, "MB Property Solutions");
    assert_eq!(s.sender, "Riley");
    assert!(s.zip_filter);
}

#[test]
fn unchecked_zip_filter_turns_it_off() {
    let t = test_app();
    handle(post_form("/settings", "percent=0.65"), &t.app).unwrap();
    let store = t.app.store().unwrap();
    assert!(!store.settings().zip_filter);
    assert_eq!(store.settings().percent, 0.65);
}

#[test]
fn calculator_uses_settings_defaults() {
    let t = test_app();
    let body = body_string(handle(get("/calculator?arv=200000&repairs=30000"), &t.app).unwrap());
    assert!(body.contains("MAO: $100,000"));

    let body = body_string(handle(get("/calculator"), &t.app).unwrap());
    assert!(!body.contains("MAO: $"));
}

#[test]
fn reset_requires_confirmation() {
    let t = test_app();
    handle(post_form("/leads", "address=1+Elm"), &t.app).unwrap();

    let err = handle(post_form("/settings/reset", ""), &t.app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(t.app.store().unwrap().document().leads.len(), 1);

    handle(post_form("/settings/reset", "confirm=yes"), &t.app).unwrap();
    assert!(t.app.store().unwrap().document().leads.is_empty());
}

#[test]
fn market_settings_are_saved_separately() {
    let t = test_app();
    handle(
        post_form("/market/settings", "apiUrl=https%3A%2F%2Fintel.example.com&token=t0k&evidence=on"),
        &t.app,
    )
    .unwrap();

    let saved = MarketSettings::load(&t.app.db).unwrap();
    assert_eq!(saved.api_url, "https://intel.example.com");
    assert!(saved.evidence_mode);

    let body = body_string(handle(get("/settings"), &t.app).unwrap());
    assert!(body.contains("https://intel.example.com"));
}

#[test]
fn market_analysis_without_configuration_shows_a_message() {
    let t = test_app();
    let body = body_string(handle(get("/market?location=Macon%2C+GA"), &t.app).unwrap());
    assert!(body.contains("Please configure API URL and Token in Market Intel settings first"));
    assert!(body.contains("Recently analyzed locations will appear here"));
}

#[test]
fn market_analysis_needs_a_location() {
    let t = test_app();
    let body = body_string(handle(get("/market?location=+"), &t.app).unwrap());
    assert!(body.contains("Please enter a location to analyze"));
}
