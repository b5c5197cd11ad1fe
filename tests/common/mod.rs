use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use pizarra::config::{Columns, Config};
use pizarra::mail::{MailError, Mailer};

pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Records every delivery; optionally rejects one address so send-failure
/// paths can be exercised while admin notifications still land.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
    reject: Option<String>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(address: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject: Some(address.to_string()),
        }
    }

    pub fn mails_to(&self, address: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == address)
            .count()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        if self.reject.as_deref() == Some(to) {
            return Err(MailError::Transport("relay unreachable".to_string()));
        }

        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub struct MockAi {
    pub url: String,
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl MockAi {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Serves one canned generation response on an ephemeral local port.
pub async fn mock_ai(status: u16, body: Value) -> MockAi {
    let requests: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = requests.clone();
    let code = StatusCode::from_u16(status).unwrap();

    let app = Router::new().route(
        "/generate",
        post(move |Json(request): Json<Value>| {
            let captured = captured.clone();
            let body = body.clone();
            async move {
                captured.lock().unwrap().push(request);
                (code, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockAi {
        url: format!("http://{}/generate", addr),
        requests,
    }
}

pub fn gemini_answer(text: &str) -> Value {
    json!({ "candidates": [ { "content": { "parts": [ { "text": text } ] } } ] })
}

pub fn gemini_blocked(reason: &str) -> Value {
    json!({ "promptFeedback": { "blockReason": reason } })
}

pub const ADMIN: &str = "teacher@example.com";

pub fn test_config(endpoint: &str) -> Config {
    Config {
        gemini_api_key: Some("test-key".to_string()),
        gemini_endpoint: endpoint.to_string(),
        mail_relay_url: "http://127.0.0.1:1/send".to_string(),
        admin_email: Some(ADMIN.to_string()),
        host: "127.0.0.1".to_string(),
        port: 0,
        columns: Columns::default(),
    }
}

/// One data row in form-header order: Timestamp, Name, Ask AI, Email address,
/// Status, AI Response, Error Details, Send Email?.
pub fn submission_row(
    name: &str,
    prompt: &str,
    email: &str,
    response: &str,
    flag: &str,
) -> Vec<String> {
    vec![
        "2026-08-07T10:00:00Z".to_string(),
        name.to_string(),
        prompt.to_string(),
        email.to_string(),
        String::new(),
        response.to_string(),
        String::new(),
        flag.to_string(),
    ]
}
