// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod classify;
pub mod compile;
pub mod daemon;
pub mod project;
pub mod version;

use std::io::Write;

use kiln_core::Severity;
use kiln_ipc::parse_diagnostics;

use crate::cli::OutputFormat;
use crate::config::{kiln_state_dir, ClientConfig};
use crate::daemon::{DaemonClient, DaemonSession, HttpTransport};
use crate::display::{format_event, format_events_json};
use crate::error::{Error, Result};

/// Opens a daemon client from the user's configuration.
pub fn open_client() -> Result<DaemonClient> {
    let config = ClientConfig::load_default()?;
    let session = DaemonSession::from_config(&config, &kiln_state_dir());
    let transport = HttpTransport::new(config.endpoint.clone(), config.request_timeout())?;
    Ok(DaemonClient::new(transport, session).with_policy(config.poll_policy()))
}

/// Prints a daemon response and returns the number of error diagnostics.
///
/// A body without diagnostic lines is printed as-is.
pub(crate) fn report_response(
    body: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<usize> {
    let events = parse_diagnostics(body);
    if events.is_empty() {
        let text = body.trim();
        if !text.is_empty() {
            match format {
                OutputFormat::Text => writeln!(out, "{text}")?,
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::json!({ "response": text }))?
                }
            }
        }
        return Ok(0);
    }

    match format {
        OutputFormat::Text => {
            for event in &events {
                writeln!(out, "{}", format_event(event))?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", format_events_json(&events)?)?,
    }
    Ok(events
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .count())
}

/// Turns an error count into the command's exit status.
pub(crate) fn fail_on_errors(errors: usize) -> Result<()> {
    if errors > 0 {
        Err(Error::CompileFailed { errors })
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
