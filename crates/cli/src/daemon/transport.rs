// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for daemon requests.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests against the daemon's loopback listener
//! - Scripted transports for unit testing the startup state machine

use std::time::Duration;

use kiln_ipc::{Endpoint, Request};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

/// Content type of `createOrUpdate` bodies.
const DESCRIPTOR_CONTENT_TYPE: &str = "application/x-yaml; charset=utf-8";

/// Upper bound on a single readiness ping. Pings are polled once a second,
/// so a daemon that accepts but never answers must not stall the poll loop
/// for the full request timeout.
pub const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Nothing is listening on the endpoint. The only retryable failure.
    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    /// The daemon answered with a non-success status.
    #[error("daemon returned HTTP {code}: {}", body.trim())]
    Status { code: u16, body: String },

    /// Any other request failure (timeouts, resets, malformed responses).
    #[error("request failed: {0}")]
    Http(String),
}

impl TransportError {
    pub fn is_connection_refused(&self) -> bool {
        matches!(self, TransportError::ConnectionRefused(_))
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Sends one request to the daemon and returns the response body.
pub trait Transport {
    fn send(&mut self, request: &Request) -> TransportResult<String>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, request: &Request) -> TransportResult<String> {
        (**self).send(request)
    }
}

/// HTTP transport backed by a blocking reqwest client.
pub struct HttpTransport {
    endpoint: Endpoint,
    client: Client,
    ping_timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport for `endpoint` with a per-request timeout.
    pub fn new(endpoint: Endpoint, timeout: Duration) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(HttpTransport {
            endpoint,
            client,
            ping_timeout: PING_TIMEOUT.min(timeout),
        })
    }

    /// Overrides the timeout applied to `ping` requests only.
    pub fn with_ping_timeout(mut self, timeout: Duration) -> Self {
        self.ping_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send(&mut self, request: &Request) -> TransportResult<String> {
        let url = self.endpoint.url(request);
        tracing::debug!("daemon request: {}", url);

        let builder = match request.body() {
            Some(body) => self
                .client
                .post(&url)
                .header(CONTENT_TYPE, DESCRIPTOR_CONTENT_TYPE)
                .body(body.to_string()),
            None => self.client.get(&url),
        };
        let builder = match request {
            Request::Ping => builder.timeout(self.ping_timeout),
            _ => builder,
        };

        let response = builder.send().map_err(classify)?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        tracing::debug!("daemon response: {} ({} bytes)", status, body.len());
        if !status.is_success() {
            return Err(TransportError::Status {
                code: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

/// Maps a reqwest failure onto the transport taxonomy.
fn classify(err: reqwest::Error) -> TransportError {
    if is_connection_refused(&err) {
        TransportError::ConnectionRefused(err.to_string())
    } else {
        TransportError::Http(err.to_string())
    }
}

/// Walks the error chain looking for an OS-level connection refusal.
fn is_connection_refused(err: &reqwest::Error) -> bool {
    if !err.is_connect() {
        return false;
    }
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        // Some connectors flatten the io::Error into a message.
        if e.to_string().to_lowercase().contains("refused") {
            return true;
        }
        source = e.source();
    }
    false
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
