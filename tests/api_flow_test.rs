// End-to-end tests through the HTTP routes

mod common;

use std::sync::Arc;

use ephrathah_backend::api;
use ephrathah_backend::types::Role;
use ephrathah_backend::AppData;
use poem::http::StatusCode;
use poem::test::{TestClient, TestForm, TestFormField, TestResponse};
use poem::Route;
use serde_json::{json, Value};

fn client(app_data: Arc<AppData>) -> TestClient<Route> {
    TestClient::new(api::routes(app_data, "http://localhost:3000/api"))
}

async fn body_json(resp: TestResponse) -> Value {
    resp.0
        .into_body()
        .into_json::<Value>()
        .await
        .expect("response body should be JSON")
}

async fn login(cli: &TestClient<Route>, username: &str) -> String {
    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({ "username": username, "password": common::TEST_PASSWORD }))
        .send()
        .await;
    resp.assert_status_is_ok();

    body_json(resp).await["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string()
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

async fn count_records(cli: &TestClient<Route>, path: &str, token: &str) -> usize {
    let resp = cli.get(path).header("Authorization", bearer(token)).send().await;
    resp.assert_status_is_ok();
    body_json(resp).await.as_array().map(|records| records.len()).unwrap_or(0)
}

#[tokio::test]
async fn test_health_is_public() {
    let cli = client(common::setup_app_data().await);

    let resp = cli.get("/api/health").send().await;
    resp.assert_status_is_ok();
    assert_eq!(body_json(resp).await["status"], "healthy");
}

#[tokio::test]
async fn test_seeded_admin_logs_in_as_admin() {
    let app_data = common::setup_app_data().await;
    ephrathah_backend::cli::seed::seed_demo_users(&app_data)
        .await
        .unwrap();
    let cli = client(app_data);

    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({ "username": "admin", "password": "password123" }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = body_json(resp).await;
    assert_eq!(body["user"]["role"], "ADMIN");
    assert_eq!(body["user"]["username"], "admin");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let cli = client(common::setup_app_data().await);

    cli.get("/api/feedback")
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    cli.get("/api/users/profile")
        .header("Authorization", bearer("garbage"))
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_submission_visibility_per_role() {
    let app_data = common::setup_app_data().await;
    common::create_user(&app_data, "admin", Role::Admin, None).await;
    let boss = common::create_user(&app_data, "jane_smith", Role::Incharge, None).await;
    common::create_user(&app_data, "john_doe", Role::Member, Some(boss.id)).await;
    common::create_user(&app_data, "bob_audio", Role::Member, None).await;
    let cli = client(app_data);

    let admin = login(&cli, "admin").await;
    let incharge = login(&cli, "jane_smith").await;
    let supervised = login(&cli, "john_doe").await;
    let independent = login(&cli, "bob_audio").await;

    for (token, content) in [(&supervised, "from john"), (&independent, "from bob")] {
        cli.post("/api/accountability")
            .header("Authorization", bearer(token))
            .body_json(&json!({ "content": content }))
            .send()
            .await
            .assert_status_is_ok();
    }

    assert_eq!(count_records(&cli, "/api/accountability", &admin).await, 2);
    assert_eq!(count_records(&cli, "/api/accountability", &incharge).await, 1);
    assert_eq!(count_records(&cli, "/api/accountability", &independent).await, 1);
    assert_eq!(count_records(&cli, "/api/feedback", &admin).await, 0);

    let resp = cli
        .get("/api/accountability")
        .header("Authorization", bearer(&incharge))
        .send()
        .await;
    let team = body_json(resp).await;
    assert_eq!(team[0]["content"], "from john");
    assert_eq!(team[0]["user"]["username"], "john_doe");
}

#[tokio::test]
async fn test_incharge_cannot_delete_member_feedback() {
    let app_data = common::setup_app_data().await;
    let boss = common::create_user(&app_data, "jane_smith", Role::Incharge, None).await;
    common::create_user(&app_data, "john_doe", Role::Member, Some(boss.id)).await;
    let cli = client(app_data);

    let member = login(&cli, "john_doe").await;
    let incharge = login(&cli, "jane_smith").await;

    let resp = cli
        .post("/api/feedback")
        .header("Authorization", bearer(&member))
        .body_json(&json!({ "content": "please keep" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let id = body_json(resp).await["id"].as_i64().unwrap();

    let resp = cli
        .delete(format!("/api/feedback/{}", id))
        .header("Authorization", bearer(&incharge))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["message"], "Cannot delete this feedback");

    cli.delete(format!("/api/feedback/{}", id))
        .header("Authorization", bearer(&member))
        .send()
        .await
        .assert_status_is_ok();
}

#[tokio::test]
async fn test_incharge_creating_admin_is_forbidden() {
    let app_data = common::setup_app_data().await;
    common::create_user(&app_data, "jane_smith", Role::Incharge, None).await;
    let cli = client(app_data);
    let incharge = login(&cli, "jane_smith").await;

    let resp = cli
        .post("/api/users")
        .header("Authorization", bearer(&incharge))
        .body_json(&json!({
            "username": "sneaky",
            "password": "password123",
            "contactNumber": "+15550000",
            "liveMode": "audio",
            "role": "ADMIN"
        }))
        .send()
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["message"], "Incharge can only create members");
}

#[tokio::test]
async fn test_export_then_import_rebuilds_roster() {
    let source = common::setup_app_data().await;
    common::create_user(&source, "admin", Role::Admin, None).await;
    common::create_user(&source, "jane_smith", Role::Incharge, None).await;
    common::create_user(&source, "john_doe", Role::Member, None).await;
    let source_cli = client(source);
    let source_admin = login(&source_cli, "admin").await;

    let resp = source_cli
        .get("/api/users/export/csv")
        .header("Authorization", bearer(&source_admin))
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.assert_header("Content-Disposition", "attachment; filename=users.csv");
    let csv = resp.0.into_body().into_string().await.unwrap();

    // The importing admin already exists in the target, so that line is rejected.
    let target = common::setup_app_data().await;
    common::create_user(&target, "admin", Role::Admin, None).await;
    let target_cli = client(target.clone());
    let target_admin = login(&target_cli, "admin").await;

    let resp = target_cli
        .post("/api/users/import/csv")
        .header("Authorization", bearer(&target_admin))
        .multipart(
            TestForm::new().field(
                TestFormField::bytes(csv.into_bytes())
                    .name("file")
                    .filename("users.csv")
                    .content_type("text/csv"),
            ),
        )
        .send()
        .await;
    resp.assert_status_is_ok();

    let report = body_json(resp).await;
    assert_eq!(report["imported"], 2);
    assert_eq!(report["errors"][0], "Line 2: User admin already exists");

    let jane = target
        .user_store
        .find_by_username("jane_smith")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(jane.role, Role::Incharge);
    let john = target
        .user_store
        .find_by_username("john_doe")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(john.role, Role::Member);
}

#[tokio::test]
async fn test_import_reports_missing_contact_number() {
    let app_data = common::setup_app_data().await;
    common::create_user(&app_data, "admin", Role::Admin, None).await;
    let cli = client(app_data);
    let admin = login(&cli, "admin").await;

    let csv = "username,password,contactNumber,liveMode,role\ncarol,secret1,,audio,MEMBER\n";
    let resp = cli
        .post("/api/users/import/csv")
        .header("Authorization", bearer(&admin))
        .multipart(
            TestForm::new().field(TestFormField::text(csv).name("file").filename("users.csv")),
        )
        .send()
        .await;
    resp.assert_status_is_ok();

    let report = body_json(resp).await;
    assert_eq!(report["imported"], 0);
    let errors = report["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().starts_with("Line 2:"));
}

#[tokio::test]
async fn test_member_profile_round_trip() {
    let app_data = common::setup_app_data().await;
    common::create_user(&app_data, "john_doe", Role::Member, None).await;
    let cli = client(app_data);
    let member = login(&cli, "john_doe").await;

    let resp = cli
        .put("/api/users/profile")
        .header("Authorization", bearer(&member))
        .body_json(&json!({ "contactNumber": "+19990001", "liveMode": "audio" }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let resp = cli
        .get("/api/users/profile")
        .header("Authorization", bearer(&member))
        .send()
        .await;
    let profile = body_json(resp).await;
    assert_eq!(profile["contactNumber"], "+19990001");
    assert_eq!(profile["liveMode"], "audio");
    assert_eq!(profile["role"], "MEMBER");

    cli.put("/api/users/1")
        .header("Authorization", bearer(&member))
        .body_json(&json!({ "contactNumber": "+1" }))
        .send()
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_empty_password_keeps_current_one() {
    let app_data = common::setup_app_data().await;
    common::create_user(&app_data, "john_doe", Role::Member, None).await;
    let cli = client(app_data);
    let member = login(&cli, "john_doe").await;

    let resp = cli
        .put("/api/users/profile")
        .header("Authorization", bearer(&member))
        .body_json(&json!({ "password": "", "contactNumber": "+19990001" }))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(body_json(resp).await["contactNumber"], "+19990001");

    // Still accepted with the original password
    login(&cli, "john_doe").await;

    let resp = cli
        .put("/api/users/profile")
        .header("Authorization", bearer(&member))
        .body_json(&json!({ "password": "abc" }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await["message"],
        "Password must be at least 6 characters"
    );
}
