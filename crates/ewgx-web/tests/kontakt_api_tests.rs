#![allow(clippy::unwrap_used)]
// End-to-end tests for POST /api/kontakt: real router on an ephemeral
// port, Directus mocked with wiremock.

use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ewgx_api::{ContentClient, Diagnostics, DirectusClient, ItemId};
use ewgx_web::{SubmissionResponse, build_router, messages};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    reports: Mutex<Vec<String>>,
}

impl Diagnostics for Recorder {
    fn report(&self, operation: &str, error: &(dyn StdError + 'static)) {
        self.reports
            .lock()
            .unwrap()
            .push(format!("{operation}: {error}"));
    }
}

struct Harness {
    base: String,
    cms: MockServer,
    recorder: Arc<Recorder>,
    http: reqwest::Client,
}

impl Harness {
    async fn start() -> Self {
        let cms = MockServer::start().await;
        let directus = DirectusClient::from_reqwest(&cms.uri(), reqwest::Client::new()).unwrap();
        let recorder = Arc::new(Recorder::default());
        let content = ContentClient::with_diagnostics(directus, recorder.clone());

        let app = build_router(content);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://127.0.0.1:{port}"),
            cms,
            recorder,
            http: reqwest::Client::new(),
        }
    }

    async fn post_raw(&self, body: &str) -> (u16, String) {
        let resp = self
            .http
            .post(format!("{}/api/kontakt", self.base))
            .header("content-type", "application/json")
            .body(body.to_owned())
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.text().await.unwrap())
    }

    async fn post(&self, body: &Value) -> (u16, SubmissionResponse) {
        let (status, text) = self.post_raw(&body.to_string()).await;
        (status, serde_json::from_str(&text).unwrap())
    }

    async fn expect_no_write(&self) {
        Mock::given(method("POST"))
            .and(path("/items/kontakt"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.cms)
            .await;
    }
}

fn valid_form() -> Value {
    json!({
        "name": "Anna Schmidt",
        "email": "anna@example.org",
        "phone": "02801 12345",
        "subject": "Kaffee",
        "message": "Habt ihr fairen Espresso?"
    })
}

fn stored_record(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Anna Schmidt",
        "email": "anna@example.org",
        "phone": "02801 12345",
        "subject": "Kaffee",
        "message": "Habt ihr fairen Espresso?",
        "status": "new",
        "date_created": "2026-10-19T09:30:00.000Z"
    })
}

// ── Success ─────────────────────────────────────────────────────────

#[tokio::test]
async fn valid_submission_is_stored() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/items/kontakt"))
        .and(body_partial_json(json!({ "status": "new", "name": "Anna Schmidt" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": stored_record(55) })))
        .expect(1)
        .mount(&h.cms)
        .await;

    let (status, text) = h.post_raw(&valid_form().to_string()).await;
    assert_eq!(status, 200);

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!(messages::THANK_YOU));
    assert_eq!(body["data"], stored_record(55));
}

#[tokio::test]
async fn caller_status_and_id_are_not_forwarded() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/items/kontakt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": stored_record(56) })))
        .expect(1)
        .mount(&h.cms)
        .await;

    let mut form = valid_form();
    form["status"] = json!("archived");
    form["id"] = json!(999);
    let (status, body) = h.post(&form).await;
    assert_eq!(status, 200);
    assert_eq!(body.data.unwrap().id(), Some(ItemId::Number(56)));

    let requests = h.cms.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["status"], json!("new"));
    assert!(sent.get("id").is_none());
}

#[tokio::test]
async fn missing_phone_is_omitted_from_payload() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/items/kontakt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": stored_record(57) })))
        .mount(&h.cms)
        .await;

    let mut form = valid_form();
    form["phone"] = json!("");
    let (status, _) = h.post(&form).await;
    assert_eq!(status, 200);

    let requests = h.cms.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(sent.get("phone").is_none(), "sent: {sent}");
}

#[tokio::test]
async fn identical_submissions_each_create_a_record() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/items/kontakt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": stored_record(58) })))
        .expect(2)
        .mount(&h.cms)
        .await;

    assert_eq!(h.post(&valid_form()).await.0, 200);
    assert_eq!(h.post(&valid_form()).await.0, 200);
}

#[tokio::test]
async fn stored_without_returned_record() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/items/kontakt"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.cms)
        .await;

    let (status, text) = h.post_raw(&valid_form().to_string()).await;
    assert_eq!(status, 200);

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        body,
        json!({ "success": true, "message": messages::THANK_YOU })
    );
    assert!(h.recorder.reports.lock().unwrap().is_empty());
}

#[tokio::test]
async fn record_timestamps_pass_through_verbatim() {
    let h = Harness::start().await;

    let mut record = stored_record(59);
    record["date_created"] = json!("2026-10-19T09:30:00");
    Mock::given(method("POST"))
        .and(path("/items/kontakt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": record })))
        .mount(&h.cms)
        .await;

    let (status, text) = h.post_raw(&valid_form().to_string()).await;
    assert_eq!(status, 200);

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["data"], record);
}

// ── Validation ──────────────────────────────────────────────────────

#[tokio::test]
async fn missing_required_fields_are_rejected() {
    let h = Harness::start().await;
    h.expect_no_write().await;

    for field in ["name", "email", "subject", "message"] {
        let mut absent = valid_form();
        absent.as_object_mut().unwrap().remove(field);
        let mut empty = valid_form();
        empty[field] = json!("");

        for form in [absent, empty] {
            let (status, body) = h.post(&form).await;
            assert_eq!(status, 400, "{field}");
            assert!(!body.success);
            assert_eq!(body.message, messages::MISSING_FIELDS);
            assert!(body.data.is_none());
        }
    }
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let h = Harness::start().await;
    h.expect_no_write().await;

    for email in ["not-an-email", "a@b", "a @b.com"] {
        let mut form = valid_form();
        form["email"] = json!(email);
        let (status, body) = h.post(&form).await;
        assert_eq!(status, 400, "{email}");
        assert!(!body.success);
        assert_eq!(body.message, messages::INVALID_EMAIL);
    }
}

#[tokio::test]
async fn non_string_required_fields_are_missing() {
    let h = Harness::start().await;
    h.expect_no_write().await;

    for (field, value) in [("name", json!(false)), ("subject", json!(0)), ("message", json!(null))] {
        let mut form = valid_form();
        form[field] = value;
        let (status, body) = h.post(&form).await;
        assert_eq!(status, 400, "{field}");
        assert_eq!(body.message, messages::MISSING_FIELDS);
    }
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn backend_failure_is_generic_500() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/items/kontakt"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": [{ "message": "SQLITE_CONSTRAINT: secret detail", "extensions": { "code": "INTERNAL_SERVER_ERROR" } }]
        })))
        .mount(&h.cms)
        .await;

    let (status, text) = h.post_raw(&valid_form().to_string()).await;
    assert_eq!(status, 500);
    assert!(!text.contains("SQLITE_CONSTRAINT"));

    let body: SubmissionResponse = serde_json::from_str(&text).unwrap();
    assert!(!body.success);
    assert_eq!(body.message, messages::FAILURE);
    assert!(body.data.is_none());

    let reports = h.recorder.reports.lock().unwrap().clone();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].contains("SQLITE_CONSTRAINT"));
}

#[tokio::test]
async fn unparseable_body_is_generic_500() {
    let h = Harness::start().await;
    h.expect_no_write().await;

    for raw in ["{not json", "null", "\"text\"", ""] {
        let (status, text) = h.post_raw(raw).await;
        assert_eq!(status, 500, "{raw:?}");
        let body: SubmissionResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(body.message, messages::FAILURE);
    }
}

#[tokio::test]
async fn response_is_json() {
    let h = Harness::start().await;

    let resp = h
        .http
        .post(format!("{}/api/kontakt", h.base))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));
}

#[tokio::test]
async fn get_is_not_allowed() {
    let h = Harness::start().await;
    let resp = h
        .http
        .get(format!("{}/api/kontakt", h.base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
}
