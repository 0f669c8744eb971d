//! Shared wiremock harness for the blocking client.
//!
//! The mock server is started from a runtime owned by the harness; the
//! client under test is blocking and runs on the test thread itself.

#![allow(dead_code)]

use doapi::Client;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

pub const TOKEN: &str = "test-token";

pub struct Harness {
    // Dropped before the runtime.
    pub server: MockServer,
    rt: Runtime,
}

impl Harness {
    pub fn start() -> Self {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("failed to build runtime");
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    /// `"METHOD /path"` for every request received so far, in order.
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method.as_str(), r.url.path()))
            .collect()
    }

    pub fn client(&self) -> Client {
        Client::new(
            Some(TOKEN.to_string()),
            Some(self.server.uri()),
            Some(true),
        )
        .expect("client should build")
    }
}

/// A client aimed at a port nothing listens on.
pub fn unreachable_client() -> Client {
    Client::new(
        Some(TOKEN.to_string()),
        Some("http://127.0.0.1:1".to_string()),
        Some(true),
    )
    .expect("client should build")
}
