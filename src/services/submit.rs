//! One-shot contact form submission.
//!
//! Serializes the form fields to JSON and POSTs them to the configured
//! endpoint on a background thread, reporting the outcome back over a
//! channel polled by the event loop. The UI never blocks on the network.

use serde::Serialize;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const DEFAULT_SUCCESS: &str = "Thank you! Your message has been sent successfully.";
const DEFAULT_FAILURE: &str = "Oops! There was an error sending your message.";
const NETWORK_FAILURE: &str = "Network error. Please try again later.";

/// Form fields serialized as the request body.
#[derive(Debug, Clone, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server accepted the message.
    Accepted { message: String },
    /// Server replied with an error status.
    Rejected { error: String },
    /// The request never reached the server.
    Unreachable { error: String },
}

/// POST the payload to `endpoint` on a background thread.
///
/// The returned receiver yields exactly one [`SubmitOutcome`]. If the
/// payload cannot be serialized the outcome is immediate and no thread
/// is spawned.
pub fn submit_in_background(
    endpoint: String,
    payload: &ContactPayload,
    timeout: Duration,
) -> mpsc::Receiver<SubmitOutcome> {
    let (tx, rx) = mpsc::channel();

    // Serialize to JSON string to own the data for the thread
    let Ok(body) = serde_json::to_string(payload) else {
        let _ = tx.send(SubmitOutcome::Unreachable {
            error: NETWORK_FAILURE.to_string(),
        });
        return rx;
    };

    thread::spawn(move || {
        let result = ureq::post(&endpoint)
            .set("Content-Type", "application/json")
            .timeout(timeout)
            .send_string(&body);

        let outcome = match result {
            Ok(response) => {
                let reply = response.into_string().unwrap_or_default();
                SubmitOutcome::Accepted {
                    message: reply_field(&reply, "message")
                        .unwrap_or_else(|| DEFAULT_SUCCESS.to_string()),
                }
            }
            Err(ureq::Error::Status(code, response)) => {
                tracing::warn!("Contact endpoint returned status {}", code);
                let reply = response.into_string().unwrap_or_default();
                SubmitOutcome::Rejected {
                    error: reply_field(&reply, "error")
                        .unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
                }
            }
            Err(e) => {
                tracing::warn!("Contact submission failed: {}", e);
                SubmitOutcome::Unreachable {
                    error: NETWORK_FAILURE.to_string(),
                }
            }
        };

        // Receiver may be gone if the app quit mid-flight; that's fine.
        let _ = tx.send(outcome);
    });

    rx
}

/// Extract a string field from a JSON reply body, if present.
fn reply_field(reply: &str, field: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(reply).ok()?;
    value.get(field)?.as_str().map(str::to_string)
}
