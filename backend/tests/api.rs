use actix_web::cookie::Cookie;
use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use backend::auth::guard::SESSION_COOKIE_NAME;
use backend::catalog::Catalog;
use backend::config::Config;
use backend::mail::{EmailMessage, MailError, Mailer};
use backend::state::AppState;
use common::model::profile::{ModelProfile, ModelStats};
use serde_json::{json, Value};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    failing: bool,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        if self.failing {
            return Err(MailError::Rejected {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

struct Harness {
    dir: TempDir,
    state: web::Data<AppState>,
    mailer: Arc<RecordingMailer>,
}

fn harness(failing_mail: bool) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("admin-credentials.json"),
        r#"{ "username": "admin", "password": "s3cret" }"#,
    )
    .unwrap();

    let data_dir = dir.path().to_string_lossy().to_string();
    let config = Config::from_lookup(|key| (key == "APP_DATA_DIR").then(|| data_dir.clone())).unwrap();
    let mailer = Arc::new(RecordingMailer {
        failing: failing_mail,
        ..Default::default()
    });
    let state = web::Data::new(AppState::new(config, mailer.clone(), catalog()));

    Harness { dir, state, mailer }
}

fn catalog() -> Catalog {
    let profile = |id: &str, name: &str, location: &str| ModelProfile {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        specialties: vec!["Runway".to_string()],
        bio: String::new(),
        stats: ModelStats {
            height: "5'9\"".to_string(),
            bust: 34.0,
            waist: 26.0,
            hips: 36.0,
            shoe: 8.0,
            eyes: "Brown".to_string(),
            hair: "Black".to_string(),
        },
        profile_image: format!("/images/{id}.jpg"),
        images: Vec::new(),
    };
    Catalog::new(vec![
        profile("1", "Aisha Khan", "Mumbai"),
        profile("2", "Rohan Mehta", "Delhi"),
    ])
}

fn registration(email: &str) -> Value {
    json!({
        "email": email,
        "fullName": "Aisha Khan",
        "role": "model",
        "gender": "female",
        "dob": "1998-04-12",
        "location": "Mumbai",
        "height": "5'9\"",
        "bust": "34",
        "tags": ["runway", "editorial"],
        "bio": "b".repeat(300),
        "contactEmail": "bookings@x.com",
        "terms": true
    })
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(backend::configure_app),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/admin/login")
            .set_json(json!({ "username": "admin", "password": "s3cret" }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        resp.response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE_NAME)
            .expect("session cookie")
            .into_owned()
    }};
}

#[actix_web::test]
async fn registration_is_stored_pending_and_welcomed() {
    let h = harness(false);
    let app = init_app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/registrations")
        .set_json(registration("A@X.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@x.com");
    assert_eq!(sent[0].subject, "Welcome to GlamHunt!");

    let req = test::TestRequest::get()
        .uri("/api/registrations/status?email=a@x.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["verified"], false);

    let csv = fs::read_to_string(h.dir.path().join("registrations.csv")).unwrap();
    assert!(csv.starts_with("email,fullName,"));
    assert!(csv.contains("runway;editorial"));
}

#[actix_web::test]
async fn registration_survives_a_failing_welcome_email() {
    let h = harness(true);
    let app = init_app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/registrations")
        .set_json(registration("a@x.com"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(h.state.registrations.list().unwrap().len(), 1);
}

#[actix_web::test]
async fn invalid_registration_reports_fields_and_writes_nothing() {
    let h = harness(false);
    let app = init_app!(h.state);

    let mut form = registration("not-an-email");
    form["bio"] = json!("short");
    let req = test::TestRequest::post()
        .uri("/api/registrations")
        .set_json(form)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "bio"]);
    assert!(!h.dir.path().join("registrations.csv").exists());
    assert!(h.mailer.sent().is_empty());
}

#[actix_web::test]
async fn duplicate_registration_is_a_conflict() {
    let h = harness(false);
    let app = init_app!(h.state);

    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(registration("a@x.com"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected);
    }
    assert_eq!(h.state.registrations.list().unwrap().len(), 1);
}

#[actix_web::test]
async fn unknown_registration_status_is_not_found() {
    let h = harness(false);
    let app = init_app!(h.state);

    let req = test::TestRequest::get()
        .uri("/api/registrations/status?email=nobody@x.com")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn admin_routes_redirect_without_a_live_session() {
    let h = harness(false);
    let app = init_app!(h.state);

    let forged = Cookie::new(SESSION_COOKIE_NAME, r#"{"loggedIn":true,"user":"admin"}"#);
    for req in [
        test::TestRequest::get().uri("/api/admin/registrations").to_request(),
        test::TestRequest::get().uri("/admin/dashboard").to_request(),
        test::TestRequest::get()
            .uri("/api/admin/inquiries")
            .cookie(forged)
            .to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/admin/login");
    }
}

#[actix_web::test]
async fn login_rejects_bad_input_and_bad_credentials() {
    let h = harness(false);
    let app = init_app!(h.state);

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_json(json!({ "username": "", "password": "" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .set_json(json!({ "username": "admin", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp
        .response()
        .cookies()
        .all(|c| c.name() != SESSION_COOKIE_NAME));
}

#[actix_web::test]
async fn login_dashboard_and_logout() {
    let h = harness(false);
    let app = init_app!(h.state);
    let cookie = login!(&app);
    assert!(cookie.http_only().unwrap_or(false));

    let req = test::TestRequest::get()
        .uri("/admin/login")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/admin/dashboard");

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"], "admin");
    assert_eq!(body["registrations"], 0);

    let req = test::TestRequest::post()
        .uri("/admin/logout")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/admin/login");

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .cookie(cookie)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn admin_approves_a_registration() {
    let h = harness(false);
    let app = init_app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/registrations")
        .set_json(registration("a@x.com"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let cookie = login!(&app);

    let req = test::TestRequest::post()
        .uri("/api/admin/registrations/update")
        .cookie(cookie.clone())
        .set_json(json!({ "email": "nobody@x.com", "status": "approved" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/admin/registrations/update")
        .cookie(cookie.clone())
        .set_json(json!({ "email": "a@x.com", "status": "approved", "verified": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Registration has been approved.");
    assert_eq!(body["registration"]["verified"], true);
    assert_eq!(body["registration"]["featured"], false);

    let req = test::TestRequest::get()
        .uri("/api/admin/registrations")
        .cookie(cookie)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let registrations = &body["registrations"];
    assert_eq!(registrations.as_array().unwrap().len(), 1);
    assert_eq!(registrations[0]["status"], "approved");
    assert_eq!(registrations[0]["fullName"], "Aisha Khan");
    assert!(body["version"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/registrations/status?email=a@x.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "approved");
    assert_eq!(body["verified"], true);
}

#[actix_web::test]
async fn stale_registration_versions_are_rejected() {
    let h = harness(false);
    let app = init_app!(h.state);

    for email in ["a@x.com", "b@x.com"] {
        let req = test::TestRequest::post()
            .uri("/api/registrations")
            .set_json(registration(email))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
    let cookie = login!(&app);

    let req = test::TestRequest::get()
        .uri("/api/admin/registrations")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let version = body["version"].as_str().unwrap().to_string();

    // First admin acts on the listing.
    let req = test::TestRequest::post()
        .uri("/api/admin/registrations/update")
        .cookie(cookie.clone())
        .set_json(json!({ "email": "a@x.com", "status": "approved", "version": version }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Second admin still holds the old listing.
    let req = test::TestRequest::post()
        .uri("/api/admin/registrations/update")
        .cookie(cookie)
        .set_json(json!({ "email": "b@x.com", "status": "rejected", "version": version }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let b = h.state.registrations.find("b@x.com").unwrap().unwrap();
    assert_eq!(b.text("status"), Some("pending"));
    let a = h.state.registrations.find("a@x.com").unwrap().unwrap();
    assert_eq!(a.text("status"), Some("approved"));
}

#[actix_web::test]
async fn admin_replies_to_an_inquiry() {
    let h = harness(false);
    let app = init_app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "subject": "Booking request",
            "message": "Is Aisha available in May?"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let cookie = login!(&app);

    let req = test::TestRequest::get()
        .uri("/api/admin/inquiries")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["status"], "new");
    let id = body[0]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/admin/inquiries/reply")
        .cookie(cookie.clone())
        .set_json(json!({ "id": "missing", "message": "Thanks for reaching out!" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/admin/inquiries/reply")
        .cookie(cookie.clone())
        .set_json(json!({ "id": id, "message": "Yes, she is available." }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "jane@x.com");
    assert_eq!(sent[0].subject, "Re: Booking request");

    let inquiry = h.state.inquiries.find(&id).unwrap().unwrap();
    assert_eq!(inquiry.text("status"), Some("replied"));
}

#[actix_web::test]
async fn failed_reply_email_is_reported_and_nothing_is_written() {
    let h = harness(true);
    let app = init_app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "subject": "Booking request",
            "message": "Is Aisha available in May?"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let id = h.state.inquiries.list().unwrap()[0]
        .text("id")
        .unwrap()
        .to_string();
    let before = fs::read(h.dir.path().join("inquiries.csv")).unwrap();
    let cookie = login!(&app);

    let req = test::TestRequest::post()
        .uri("/api/admin/inquiries/reply")
        .cookie(cookie)
        .set_json(json!({ "id": id, "message": "Yes, she is available." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    assert_eq!(fs::read(h.dir.path().join("inquiries.csv")).unwrap(), before);
}

#[actix_web::test]
async fn catalog_search_and_profile() {
    let h = harness(false);
    let app = init_app!(h.state);

    let req = test::TestRequest::get().uri("/api/models?q=mumbai").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "Aisha Khan");
    assert_eq!(body["items"][0]["profileImage"], "/images/1.jpg");

    let req = test::TestRequest::get().uri("/api/models/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["location"], "Delhi");

    let req = test::TestRequest::get().uri("/api/models/99").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
