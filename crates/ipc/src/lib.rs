// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol between the kiln client and the compiler daemon.
//!
//! The daemon speaks plain HTTP on a loopback port. Each action is a URL
//! path with optional query toggles; only `createOrUpdate` carries a body,
//! a YAML project descriptor. Responses are UTF-8 text in which diagnostic
//! lines follow a tab-delimited grammar (see [`diagnostic`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod diagnostic;
pub mod project;

pub use diagnostic::{parse_diagnostics, DiagnosticEvent, SourceLocation, NEWLINE_SENTINEL};
pub use kiln_core::Severity;
pub use project::ProjectDescriptor;

/// Loopback address the daemon listens on.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Port the daemon listens on.
pub const DEFAULT_PORT: u16 = 27616;

/// Error returned for malformed protocol values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Endpoint string is not `host:port`.
    InvalidEndpoint(String),
    /// Project descriptor failed validation.
    InvalidDescriptor(String),
    /// Descriptor could not be encoded or decoded as YAML.
    Yaml(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidEndpoint(s) => {
                write!(f, "invalid endpoint: '{}' (expected host:port)", s)
            }
            ProtocolError::InvalidDescriptor(s) => write!(f, "invalid project descriptor: {}", s),
            ProtocolError::Yaml(s) => write!(f, "yaml error: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

// ============================================================================
// Endpoint
// ============================================================================

/// Address of the daemon's HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Endpoint {
            host: host.into(),
            port,
        }
    }

    /// Loopback endpoint on the given port.
    pub fn loopback(port: u16) -> Self {
        Endpoint::new(DEFAULT_HOST, port)
    }

    /// Full URL for a request against this endpoint.
    pub fn url(&self, request: &Request) -> String {
        format!("http://{}:{}{}", self.host, self.port, request.path_and_query())
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::loopback(DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, ProtocolError> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| ProtocolError::InvalidEndpoint(s.to_string()))?;
        if host.is_empty() {
            return Err(ProtocolError::InvalidEndpoint(s.to_string()));
        }
        let port = port
            .parse()
            .map_err(|_| ProtocolError::InvalidEndpoint(s.to_string()))?;
        Ok(Endpoint::new(host, port))
    }
}

impl TryFrom<String> for Endpoint {
    type Error = ProtocolError;

    fn try_from(s: String) -> Result<Self, ProtocolError> {
        s.parse()
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.to_string()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// A request to the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Upsert one or more projects. `body` is a rendered descriptor document.
    CreateOrUpdate { body: String },
    /// Forget a project.
    Remove { project: String },
    /// Compile one project, or everything the daemon knows when `project` is `None`.
    Compile {
        project: Option<String>,
        with_dependencies: bool,
        with_dependents: bool,
    },
    /// Drop all build outputs.
    Clean,
    /// Shut the daemon down.
    Stop,
    /// Health check with no payload.
    Ping,
}

impl Request {
    /// Builds an upsert request for a single project.
    pub fn create_or_update(project: &ProjectDescriptor) -> Result<Self, ProtocolError> {
        Ok(Request::CreateOrUpdate {
            body: project.render()?,
        })
    }

    /// The action name used as the URL path.
    pub fn action(&self) -> &'static str {
        match self {
            Request::CreateOrUpdate { .. } => "createOrUpdate",
            Request::Remove { .. } => "remove",
            Request::Compile { .. } => "compile",
            Request::Clean => "clean",
            Request::Stop => "stop",
            Request::Ping => "ping",
        }
    }

    /// Query toggles in wire order.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Request::Remove { project } => vec![("p", project.clone())],
            Request::Compile {
                project: Some(project),
                with_dependencies,
                with_dependents,
            } => {
                let mut query = vec![("p", project.clone())];
                if !with_dependencies {
                    query.push(("noDependencies", "true".to_string()));
                }
                if !with_dependents {
                    query.push(("noDependent", "true".to_string()));
                }
                query
            }
            _ => Vec::new(),
        }
    }

    /// `/action[?k=v[&k=v]]` with values percent-encoded.
    pub fn path_and_query(&self) -> String {
        let mut path = format!("/{}", self.action());
        for (i, (key, value)) in self.query().iter().enumerate() {
            path.push(if i == 0 { '?' } else { '&' });
            path.push_str(key);
            path.push('=');
            path.push_str(&urlencoding::encode(value));
        }
        path
    }

    /// Request payload, present only for actions that carry one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Request::CreateOrUpdate { body } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
