// E2E tests for the contact form against a local HTTP server

mod common;

use common::harness::PortfolioTestHarness;
use crossterm::event::KeyCode;
use folio::app::contact_form::SubmitState;
use folio::config::Config;
use std::io::Read;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Serve exactly one request, reporting its body back to the test.
fn serve_one(status: u16, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut received = String::new();
            let _ = request.as_reader().read_to_string(&mut received);
            let _ = tx.send(received);
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    (format!("http://127.0.0.1:{port}/submit"), rx)
}

fn harness_with_endpoint(endpoint: String) -> PortfolioTestHarness {
    let mut config = Config::default();
    config.contact.endpoint = endpoint;
    config.contact.timeout_secs = 5;
    PortfolioTestHarness::with_config(80, 24, config).unwrap()
}

/// Fill the three fields and press Enter.
fn fill_and_submit(harness: &mut PortfolioTestHarness) {
    harness.key(KeyCode::End); // bring the contact section into view
    harness.key(KeyCode::Tab); // focus the name field
    harness.type_str("Ada");
    harness.key(KeyCode::Tab);
    harness.type_str("ada@example.com");
    harness.key(KeyCode::Tab);
    harness.type_str("Hello there");
    harness.key(KeyCode::Enter);
}

/// The submission worker runs on a real thread; poll until it reports.
fn wait_for_outcome(harness: &mut PortfolioTestHarness) -> SubmitState {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        harness.tick();
        if harness.app().form().state() != &SubmitState::Pending {
            return harness.app().form().state().clone();
        }
        assert!(Instant::now() < deadline, "submission never completed");
        thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn test_successful_submission() {
    let (endpoint, body_rx) = serve_one(200, r#"{"message": "Got it, thanks!"}"#);
    let mut harness = harness_with_endpoint(endpoint);

    fill_and_submit(&mut harness);

    let outcome = wait_for_outcome(&mut harness);
    assert_eq!(outcome, SubmitState::Success("Got it, thanks!".to_string()));

    // The server saw the fields as JSON.
    let received = body_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&received).unwrap();
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["message"], "Hello there");

    // An accepted submission clears the form.
    assert_eq!(harness.app().form().name, "");
    assert_eq!(harness.app().form().message, "");

    harness.render().unwrap();
    harness.assert_screen_contains("Got it, thanks!");
}

#[test]
fn test_error_status_shows_server_error() {
    let (endpoint, _body_rx) = serve_one(422, r#"{"error": "Email looks wrong"}"#);
    let mut harness = harness_with_endpoint(endpoint);

    fill_and_submit(&mut harness);
    let outcome = wait_for_outcome(&mut harness);
    assert_eq!(
        outcome,
        SubmitState::Failure("Email looks wrong".to_string())
    );

    // Failed submissions keep the typed fields.
    assert_eq!(harness.app().form().name, "Ada");

    harness.render().unwrap();
    harness.assert_screen_contains("Email looks wrong");
}

#[test]
fn test_unreachable_endpoint_shows_network_error() {
    // Port 9 (discard) is almost certainly not listening.
    let mut harness = harness_with_endpoint("http://127.0.0.1:9/submit".to_string());

    fill_and_submit(&mut harness);
    let outcome = wait_for_outcome(&mut harness);
    assert_eq!(
        outcome,
        SubmitState::Failure("Network error. Please try again later.".to_string())
    );
}

#[test]
fn test_pending_state_renders_while_in_flight() {
    // A server that never answers within the test keeps the form pending.
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let mut harness = harness_with_endpoint(format!("http://127.0.0.1:{port}/submit"));

    fill_and_submit(&mut harness);
    harness.render().unwrap();
    harness.assert_screen_contains("Sending message...");

    // Keep the server alive until after the assertion, then let it drop;
    // the worker thread outcome is discarded with the harness.
    drop(server);
}
