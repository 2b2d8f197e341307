use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, location, post_form, test_app};

#[test]
fn dashboard_lists_the_seven_day_plan() {
    let t = test_app();

    let resp = handle(get("/"), &t.app).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("Day 7"));
    assert!(body.contains("Comp 15–25 properties (Live CMA)"));
    assert!(body.contains("0% complete"));
    // No deals API configured.
    assert!(!body.contains("Sync now"));
}

#[test]
fn toggling_a_task_updates_progress() {
    let t = test_app();

    let resp = handle(post_form("/tasks/toggle", "day=1&slot=0&checked=1"), &t.app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/");

    // 1 of 21
    let body = body_string(handle(get("/"), &t.app).unwrap());
    assert!(body.contains("5% complete"));
    assert_eq!(t.app.store().unwrap().document().tasks.get(&1), Some(&vec![true]));
}

#[test]
fn toggling_a_task_outside_the_plan_is_rejected() {
    let t = test_app();
    let err = handle(post_form("/tasks/toggle", "day=8&slot=0&checked=1"), &t.app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn sync_without_api_reports_local_only() {
    let t = test_app();
    let resp = handle(post_form("/sync", ""), &t.app).unwrap();
    assert_eq!(resp.status(), 303);
    assert!(location(&resp).starts_with("/?notice=Remote%20sync%20is%20not%20configured"));
}

#[test]
fn unknown_route_is_not_found() {
    let t = test_app();
    let err = handle(get("/nope"), &t.app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
