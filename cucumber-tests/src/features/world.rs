use std::time::Duration;

use cucumber::World as CucumberWorld;
use petclinic_core::config::ClinicConfig;
use petclinic_core::{Clinic, ClinicServer};
use reqwest::header::{HeaderMap, HeaderName, ACCEPT, CONTENT_TYPE, LOCATION};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Last HTTP exchange seen by a scenario
#[derive(Debug, Default, Clone)]
pub struct LastResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub body: String,
}

/// One clinic server per scenario, stopped when the world is dropped
#[derive(Debug, Default, CucumberWorld)]
pub struct ClinicWorld {
    pub base_url: String,
    pub client: reqwest::Client,
    pub last: LastResponse,
    shutdown: Option<oneshot::Sender<()>>,
    server_handle: Option<JoinHandle<()>>,
}

impl ClinicWorld {
    /// Start a server on a free port and wait until it accepts connections
    pub async fn start_server(&mut self, seed_demo_data: bool) -> Result<(), String> {
        let port = portpicker::pick_unused_port().ok_or("No free port available")?;
        let server = ClinicServer::with_config(ClinicConfig::default())
            .with_host("127.0.0.1")
            .with_port(port)
            .with_clinic(Clinic::in_memory(seed_demo_data))
            .build()
            .map_err(|e| format!("Server build failed: {:#}", e))?;

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async move {
                let _ = rx.await;
            };
            if let Err(e) = server.serve_with_shutdown(shutdown).await {
                eprintln!("Clinic server stopped with error: {:#}", e);
            }
        });

        self.shutdown = Some(tx);
        self.server_handle = Some(handle);
        self.base_url = format!("http://127.0.0.1:{}", port);
        self.client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| format!("HTTP client: {}", e))?;

        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        Err(format!("Server did not start on port {}", port))
    }

    pub async fn stop_server(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server_handle.take() {
            let _ = handle.await;
        }
    }

    pub async fn get(&mut self, path: &str, accept: Option<&str>) -> Result<(), String> {
        let mut request = self.client.get(format!("{}{}", self.base_url, path));
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(String, String)]) -> Result<(), String> {
        let request = self.client.post(format!("{}{}", self.base_url, path)).form(fields);
        self.send(request).await
    }

    async fn send(&mut self, request: reqwest::RequestBuilder) -> Result<(), String> {
        let response = request.send().await.map_err(|e| format!("Request failed: {}", e))?;
        let status = response.status().as_u16();
        let content_type = header_text(response.headers(), CONTENT_TYPE);
        let location = header_text(response.headers(), LOCATION);
        let body = response.text().await.map_err(|e| format!("Body read failed: {}", e))?;

        self.last = LastResponse { status, content_type, location, body };
        Ok(())
    }

    /// Follow the redirect of the last response
    pub async fn follow_redirect(&mut self) -> Result<(), String> {
        let location = self.last.location.clone().ok_or("Last response was not a redirect")?;
        self.get(&location, None).await
    }

    pub fn body_json(&self) -> Result<serde_json::Value, String> {
        serde_json::from_str(&self.last.body).map_err(|e| format!("Body is not JSON: {}", e))
    }
}

fn header_text(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(String::from)
}
