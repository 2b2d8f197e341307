use crate::router::handle;
use crate::tests::utils::{body_string, get, post_form, test_app};

#[test]
fn buyer_crud_round_trip() {
    let t = test_app();

    let resp = handle(
        post_form("/buyers", "name=Cash+Co&email=cash%40buyers.test&zips=31201%2C+31204"),
        &t.app,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    let id = t.app.store().unwrap().document().buyers[0].id.clone();
    let body = body_string(handle(get("/buyers"), &t.app).unwrap());
    assert!(body.contains("Cash Co"));
    assert!(body.contains("31201, 31204"));

    handle(post_form("/buyers", &format!("id={id}&name=Cash+Co+LLC")), &t.app).unwrap();
    assert_eq!(t.app.store().unwrap().document().buyers[0].name, "Cash Co LLC");

    handle(post_form("/buyers/delete", &format!("id={id}")), &t.app).unwrap();
    assert!(t.app.store().unwrap().document().buyers.is_empty());
}

#[test]
fn buyers_csv_export() {
    let t = test_app();
    handle(post_form("/buyers", "name=Cash+Co&email=cash%40buyers.test"), &t.app).unwrap();

    let body = body_string(handle(get("/buyers/export.csv"), &t.app).unwrap());
    assert!(body.starts_with("id,name,email,phone,zips,criteria,notes,updated\n"));
    assert!(body.contains("\"cash@buyers.test\""));
}
