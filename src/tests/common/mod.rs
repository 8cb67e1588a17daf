// tests/common/mod.rs
pub use axum::Router;
pub use tokio::task::JoinHandle;

use anyhow::{anyhow, Result};
use reqwest::Client;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::vendor::{ChatKitSession, CreateSessionRequest, SessionIssuer};

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// In-memory issuer. Hands out queued outcomes in order; the last one
/// repeats. Records every request it receives.
#[derive(Clone, Default)]
pub struct StubIssuer {
    outcomes: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<CreateSessionRequest>>>,
    delay_ms: u64,
}

impl StubIssuer {
    pub fn with_secrets(secrets: &[&str]) -> Self {
        let outcomes = secrets.iter().map(|s| Ok(s.to_string())).collect();
        Self {
            outcomes: Arc::new(Mutex::new(outcomes)),
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from([Err(message.to_string())]))),
            ..Default::default()
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn requests(&self) -> Vec<CreateSessionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SessionIssuer for StubIssuer {
    async fn create_session(&self, request: &CreateSessionRequest) -> Result<ChatKitSession> {
        let next = {
            self.requests.lock().unwrap().push(request.clone());
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.len() > 1 {
                outcomes.pop_front()
            } else {
                outcomes.front().cloned()
            }
        };

        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }

        match next {
            Some(Ok(secret)) => Ok(ChatKitSession {
                id: Some(format!("cksess_{}", secret)),
                client_secret: secret,
                expires_at: Some(1_893_456_000),
            }),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("stub issuer has no outcomes queued")),
        }
    }
}
