//! End-to-end coverage of the verb wrapper against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port and drives the
//! client over real HTTP, so classification, body handling, and wire
//! shape are all validated against an actual server rather than canned
//! responses. The `/echo` route reflects method/headers/body, making the
//! transmitted request observable from the client side.

use std::net::SocketAddr;
use std::time::Duration;

use harness_core::{ApiClient, ClientError, Json};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct NewSite {
    name: String,
    auto_start: bool,
}

/// Start the mock server on a random port and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn live_client() -> ApiClient {
    ApiClient::new(&format!("http://{}", start_server()))
}

#[test]
fn site_lifecycle_over_every_verb() {
    let client = live_client();

    // create
    let input = NewSite {
        name: "site1".to_string(),
        auto_start: false,
    };
    let outcome = client.post("/sites", Json(&input)).unwrap();
    assert!(outcome.succeeded);
    let created: serde_json::Value = serde_json::from_str(&outcome.body).unwrap();
    assert_eq!(created["name"], "site1");
    let id: Uuid = serde_json::from_value(created["id"].clone()).unwrap();

    // get
    let outcome = client.get(&format!("/sites/{id}")).unwrap();
    assert!(outcome.succeeded);
    let fetched: serde_json::Value = serde_json::from_str(&outcome.body).unwrap();
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["name"], "site1");

    // patch
    let patched = client
        .patch_json(&format!("/sites/{id}"), r#"{"auto_start":true}"#)
        .unwrap()
        .expect("patch should succeed");
    assert_eq!(patched["name"], "site1"); // unchanged
    assert_eq!(patched["auto_start"], true);

    // delete — 204 classifies as success
    assert!(client.delete(&format!("/sites/{id}")).unwrap());

    // get after delete — failure outcome, not an error
    let outcome = client.get(&format!("/sites/{id}")).unwrap();
    assert!(!outcome.succeeded);

    // delete again — 404 classifies as failure
    assert!(!client.delete(&format!("/sites/{id}")).unwrap());
}

#[test]
fn post_json_parses_the_created_site() {
    let client = live_client();
    let created = client
        .post_json("/sites", r#"{"name":"site1"}"#)
        .unwrap()
        .expect("creation should succeed");
    assert_eq!(created["name"], "site1");
}

#[test]
fn rejected_create_reports_failure_with_body() {
    let client = live_client();

    let outcome = client.post("/sites", r#"{"name":""}"#).unwrap();
    assert!(!outcome.succeeded);
    assert_eq!(outcome.body, r#"{"error":"invalid"}"#);

    // the parsed form never touches a failed response's body
    let parsed = client.post_json("/sites", r#"{"name":""}"#).unwrap();
    assert!(parsed.is_none());
}

#[test]
fn patch_on_missing_site_reports_failure() {
    let client = live_client();
    let uri = format!("/sites/{}", Uuid::new_v4());

    let outcome = client.patch(&uri, r#"{"name":"ghost"}"#).unwrap();
    assert!(!outcome.succeeded);

    let parsed = client.patch_json(&uri, r#"{"name":"ghost"}"#).unwrap();
    assert!(parsed.is_none());
}

#[test]
fn string_and_structured_bodies_send_identical_requests() {
    let client = live_client();
    let input = NewSite {
        name: "site1".to_string(),
        auto_start: true,
    };
    let raw = serde_json::to_string(&input).unwrap();

    let from_structured = client.post_json("/echo", Json(&input)).unwrap().unwrap();
    let from_raw = client.post_json("/echo", raw.as_str()).unwrap().unwrap();
    assert_eq!(from_structured, from_raw);

    let from_structured = client.patch_json("/echo", Json(&input)).unwrap().unwrap();
    let from_raw = client.patch_json("/echo", raw.as_str()).unwrap().unwrap();
    assert_eq!(from_structured, from_raw);
}

#[test]
fn get_sends_no_body_and_no_content_type() {
    let client = live_client();
    let outcome = client.get("/echo").unwrap();
    assert!(outcome.succeeded);

    let echoed: serde_json::Value = serde_json::from_str(&outcome.body).unwrap();
    assert_eq!(echoed["method"], "GET");
    assert!(echoed["content_type"].is_null());
    assert_eq!(echoed["body"], "");
}

#[test]
fn post_sets_json_content_type() {
    let client = live_client();
    let echoed = client.post_json("/echo", r#"{"k":1}"#).unwrap().unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["body"], r#"{"k":1}"#);
}

#[test]
fn patch_goes_out_with_its_own_method_token() {
    let client = live_client();
    let echoed = client.patch_json("/echo", r#"{"k":1}"#).unwrap().unwrap();
    assert_eq!(echoed["method"], "PATCH");
    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["body"], r#"{"k":1}"#);
}

#[test]
fn absolute_uris_bypass_the_base_url() {
    let addr = start_server();
    let client = ApiClient::new("http://base-url-goes-unused.invalid");
    let outcome = client.get(&format!("http://{addr}/ping")).unwrap();
    assert!(outcome.succeeded);
    assert_eq!(outcome.body, "pong");
}

#[test]
fn non_json_success_body_is_a_deserialization_error() {
    let client = live_client();
    let err = client.post_json("/ping", "{}").unwrap_err();
    assert!(matches!(err, ClientError::Deserialization(_)));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop, so the port has no listener.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}"));
    let err = client.get("/sites").unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[test]
fn timeout_client_completes_fast_exchanges() {
    let addr = start_server();
    let client = ApiClient::with_timeout(&format!("http://{addr}"), Duration::from_secs(5));
    assert!(client.get("/ping").unwrap().succeeded);
}
