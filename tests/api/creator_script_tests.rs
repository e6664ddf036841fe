//! Creator script admin API tests

use axum::http::{header, Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use brand_admin::domain::ScriptParams;

use crate::common::{flash_cookie, json_body, token, TestApp};

const SCRIPTS: &str = "/admin/brands/1/creator-scripts";

fn app_with_brand() -> TestApp {
    let app = TestApp::new();
    app.store.add_brand(1, true);
    app
}

fn creator_params() -> ScriptParams {
    ScriptParams {
        status_to: Some(4),
        recipient: Some("creator".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = app_with_brand();

    let response = app.get(SCRIPTS).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get_with_token(SCRIPTS, "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_admin_token_is_forbidden() {
    let app = app_with_brand();

    let response = app.get_with_token(SCRIPTS, &token(false)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_brand_is_not_found() {
    let app = app_with_brand();

    let response = app
        .request(Method::GET, "/admin/brands/99/creator-scripts", None, true, None)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_index_lists_scripts_with_fire_counts() {
    let app = app_with_brand();
    let script_id = app.store.add_script(1, creator_params());
    app.store.add_email(script_id, "Hi", "Welcome aboard");
    app.store.add_fire(script_id, 10);
    app.store.add_fire(script_id, 11);

    let (status, body) = json_body(app.request(Method::GET, SCRIPTS, None, true, None).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "index");
    assert_eq!(body["brand"]["display_name"], "Brand 1");
    assert_eq!(body["items"][0]["id"], script_id);
    assert_eq!(body["items"][0]["fire_count"], 2);
    assert_eq!(body["items"][0]["email_info"]["subject"], "Hi");
    assert!(body.get("flash").is_none());
}

#[tokio::test]
async fn test_store_as_json_returns_redirect_target() {
    let app = app_with_brand();

    let body = json!({
        "event_type_id": 1,
        "action_type_id": 1,
        "is_enabled": "1",
        "params": {"status_to": "4", "recipient": "creator"},
        "email": {"subject": "Approved", "text": "You are in"}
    });
    let (status, body) = json_body(app.request(Method::POST, SCRIPTS, Some(body), true, None).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect_to"], SCRIPTS);
    assert_eq!(
        body["flash"]["success_notifications"][0]["text"],
        "New Creator Script Created"
    );

    let scripts = app.store.scripts.lock().clone();
    assert_eq!(scripts.len(), 1);
    let script = &scripts[0];
    assert_eq!(script.name, "Working status changed to Approved → Send email to Creator");
    assert!(script.is_enabled);
    assert_eq!(script.params.status_to, Some(4));

    let email = app.store.email_of(script.id).unwrap();
    assert_eq!(email.subject.as_deref(), Some("Approved"));
    assert_eq!(email.text.as_deref(), Some("You are in"));
}

#[tokio::test]
async fn test_store_from_browser_redirects_and_flashes_once() {
    let app = app_with_brand();

    let body = json!({
        "name": "Welcome",
        "event_type_id": 1,
        "action_type_id": 1,
        "params": {"status_to": 4, "recipient": "creator"},
        "_form": {"back_url": "/admin/brands/1/creator-scripts?tab=email"}
    });
    let response = app.request(Method::POST, SCRIPTS, Some(body), false, None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/admin/brands/1/creator-scripts?tab=email"
    );
    let cookie = flash_cookie(&response).expect("flash cookie");

    let (status, page) = json_body(app.request(Method::GET, SCRIPTS, None, false, Some(&cookie)).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["flash"]["success_notifications"][0]["text"], "New Creator Script Created");
    assert_eq!(page["items"][0]["name"], "Welcome");

    let (_, page) = json_body(app.request(Method::GET, SCRIPTS, None, false, None).await).await;
    assert!(page.get("flash").is_none());
}

#[tokio::test]
async fn test_invalid_input_goes_back_with_errors() {
    let app = app_with_brand();

    let body = json!({
        "name": "x".repeat(300),
        "event_type_id": "abc",
        "action_type_id": 1,
        "params": {"recipient": "creator"}
    });
    let (status, body) = json_body(app.request(Method::POST, SCRIPTS, Some(body), true, None).await).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["redirect_to"], "/admin/brands/1/creator-scripts/create");
    let fields: Vec<&str> = body["flash"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"event_type_id"));
    assert!(fields.contains(&"name"));
    assert_eq!(body["flash"]["old_input"]["event_type_id"], "abc");
    assert!(app.store.scripts.lock().is_empty());
}

#[tokio::test]
async fn test_manager_email_may_omit_subject() {
    let app = app_with_brand();

    let manager = json!({
        "event_type_id": 1,
        "action_type_id": 1,
        "params": {"status_to": 4, "recipient": "la_admin"},
        "email": {"subject": null, "text": "New approval"}
    });
    let (status, _) = json_body(app.request(Method::POST, SCRIPTS, Some(manager), true, None).await).await;
    assert_eq!(status, StatusCode::OK);

    let creator = json!({
        "event_type_id": 1,
        "action_type_id": 1,
        "params": {"status_to": 4, "recipient": "creator"},
        "email": {"subject": null, "text": "Hi"}
    });
    let (status, body) = json_body(app.request(Method::POST, SCRIPTS, Some(creator), true, None).await).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["flash"]["errors"][0]["field"], "email.subject");
}

#[tokio::test]
async fn test_missing_types_fail_to_save() {
    let app = app_with_brand();

    let body = json!({"name": "Orphan"});
    let (status, body) = json_body(app.request(Method::POST, SCRIPTS, Some(body), true, None).await).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["flash"]["errors"][0]["field"], "error");
    assert!(app.store.scripts.lock().is_empty());
}

#[tokio::test]
async fn test_patch_keeps_stored_recipient() {
    let app = app_with_brand();
    let script_id = app.store.add_script(1, creator_params());
    app.store.add_email(script_id, "Old subject", "Old text");

    let body = json!({
        "name": "Renamed",
        "is_enabled": false,
        "params": {"recipient": "la_admin", "status_to": 5},
        "email": {"subject": "New subject"}
    });
    let uri = format!("{}/{}", SCRIPTS, script_id);
    let (status, body) = json_body(app.request(Method::PATCH, &uri, Some(body), true, None).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flash"]["success_notifications"][0]["text"], "Changes saved");

    let script = app.store.script(script_id).unwrap();
    assert_eq!(script.name, "Renamed");
    assert!(!script.is_enabled);
    assert_eq!(script.params.recipient.as_deref(), Some("creator"));
    assert_eq!(script.params.status_to, Some(5));

    let email = app.store.email_of(script_id).unwrap();
    assert_eq!(email.subject.as_deref(), Some("New subject"));
    assert_eq!(email.text.as_deref(), Some("Old text"));
}

#[tokio::test]
async fn test_patch_of_other_brands_script_is_not_found() {
    let app = app_with_brand();
    app.store.add_brand(2, true);
    let script_id = app.store.add_script(2, creator_params());

    let uri = format!("{}/{}", SCRIPTS, script_id);
    let response = app
        .request(Method::PATCH, &uri, Some(json!({"name": "Hijack"})), true, None)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_ne!(app.store.script(script_id).unwrap().name, "Hijack");
}

#[tokio::test]
async fn test_delete_removes_contents_and_fires() {
    let app = app_with_brand();
    let script_id = app.store.add_script(1, creator_params());
    let other_id = app.store.add_script(1, creator_params());
    app.store.add_email(script_id, "Hi", "Text");
    app.store.add_fire(script_id, 10);
    app.store.add_fire(other_id, 10);

    let uri = format!("{}/{}?back_url=/admin/brands/1", SCRIPTS, script_id);
    let response = app.request(Method::DELETE, &uri, None, false, None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin/brands/1");
    assert!(app.store.script(script_id).is_none());
    assert!(app.store.email_of(script_id).is_none());
    assert_eq!(app.store.fires.lock().len(), 1);
    assert!(app.store.script(other_id).is_some());
}

#[tokio::test]
async fn test_create_form_returns_template_for_json_clients() {
    let app = app_with_brand();

    let uri = format!("{}/create", SCRIPTS);
    let (status, body) = json_body(app.request(Method::GET, &uri, None, true, None).await).await;

    assert_eq!(status, StatusCode::OK);
    let template = &body["template"];
    assert_eq!(template["event_type_options"].as_array().unwrap().len(), 2);
    assert_eq!(template["status_to_options"].as_array().unwrap().len(), 8);
    assert_eq!(template["recipient_options"][0]["value"], "la_admin");
}

#[tokio::test]
async fn test_edit_page_includes_email_and_fires() {
    let app = app_with_brand();
    let script_id = app.store.add_script(1, creator_params());
    app.store.add_email(script_id, "Subject", "Body");
    app.store.add_fire(script_id, 42);

    let uri = format!("{}/{}/edit", SCRIPTS, script_id);
    let (status, body) = json_body(app.request(Method::GET, &uri, None, false, None).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "edit");
    assert_eq!(body["script"]["email_info"], json!({"subject": "Subject", "text": "Body"}));
    assert_eq!(body["recent_fires"][0]["creator_id"], 42);
}

#[tokio::test]
async fn test_edit_of_missing_script_is_not_found() {
    let app = app_with_brand();

    let uri = format!("{}/12345/edit", SCRIPTS);
    let response = app.request(Method::GET, &uri, None, false, None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_types_from_browser_redirect_back() {
    let app = app_with_brand();

    let body = json!({"name": 5, "event_type_id": 1, "action_type_id": 1});
    let response = app.request(Method::POST, SCRIPTS, Some(body), false, None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/admin/brands/1/creator-scripts/create"
    );
    let cookie = flash_cookie(&response).expect("flash cookie");

    let uri = format!("{}/create", SCRIPTS);
    let (_, page) = json_body(app.request(Method::GET, &uri, None, false, Some(&cookie)).await).await;
    let name_error = page["flash"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["field"] == "name")
        .expect("name error");
    assert_eq!(name_error["message"], "The name must be a string.");
    assert_eq!(page["flash"]["old_input"]["name"], 5);
    assert!(app.store.scripts.lock().is_empty());
}

#[tokio::test]
async fn test_wrong_types_from_json_client_are_form_errors() {
    let app = app_with_brand();

    let body = json!({"event_type_id": 1, "action_type_id": 1, "params": "x"});
    let (status, body) = json_body(app.request(Method::POST, SCRIPTS, Some(body), true, None).await).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["redirect_to"], "/admin/brands/1/creator-scripts/create");
    assert!(body["flash"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["field"] == "params"));
    assert_eq!(body["flash"]["old_input"]["params"], "x");
}

#[tokio::test]
async fn test_failed_submission_with_long_email_keeps_errors() {
    let app = app_with_brand();

    let body = json!({
        "name": "n".repeat(300),
        "event_type_id": 1,
        "action_type_id": 1,
        "params": {"status_to": 4, "recipient": "creator"},
        "email": {"subject": "Welcome", "text": "t".repeat(6000)}
    });
    let response = app.request(Method::POST, SCRIPTS, Some(body), false, None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .find(|v| v.starts_with("brand_admin_flash="))
        .expect("flash cookie");
    assert!(set_cookie.len() <= 4096);

    let cookie = flash_cookie(&response).unwrap();
    let uri = format!("{}/create", SCRIPTS);
    let (_, page) = json_body(app.request(Method::GET, &uri, None, false, Some(&cookie)).await).await;
    assert_eq!(page["flash"]["errors"][0]["field"], "name");
    assert_eq!(page["flash"]["old_input"]["email"]["subject"], "Welcome");
}

#[tokio::test]
async fn test_delete_follows_form_back_url() {
    let app = app_with_brand();
    let script_id = app.store.add_script(1, creator_params());

    let uri = format!(
        "{}/{}?_form%5Bback_url%5D=%2Fadmin%2Fbrands%2F1%3Ftab%3Dscripts",
        SCRIPTS, script_id
    );
    let response = app.request(Method::DELETE, &uri, None, false, None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin/brands/1?tab=scripts");
    assert!(app.store.script(script_id).is_none());
}
