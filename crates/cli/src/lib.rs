// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! kilnrs - client library for the kiln incremental compiler daemon.
//!
//! This crate provides the functionality behind the `kiln` CLI: pushing
//! project descriptors to a long-running compiler daemon over loopback HTTP,
//! starting that daemon on demand, and rendering the diagnostics it returns.
//!
//! # Main Components
//!
//! - [`DaemonClient`] - Request/response calls, with spawn-and-retry on upsert
//! - [`ClientConfig`] - Endpoint, polling budget and daemon launch settings
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use kilnrs::{ClientConfig, DaemonClient, DaemonSession, HttpTransport};
//! use kiln_ipc::ProjectDescriptor;
//!
//! let config = ClientConfig::load_default()?;
//! let session = DaemonSession::from_config(&config, &kilnrs::config::kiln_state_dir());
//! let transport = HttpTransport::new(config.endpoint.clone(), config.request_timeout())?;
//! let mut client = DaemonClient::new(transport, session).with_policy(config.poll_policy());
//!
//! let body = client.create_or_update(&ProjectDescriptor::new("app", "out/app"))?;
//! ```

mod cli;
mod commands;
mod display;
mod env;

pub mod config;
pub mod daemon;
pub mod error;

pub use cli::{Cli, Command, CompileScope, OutputFormat};
pub use config::ClientConfig;
pub use daemon::{DaemonClient, DaemonSession, HttpTransport};
pub use env::log_filter;
pub use error::{Error, Result};

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let format = cli.output;
    match cli.command {
        Command::Push { files } => commands::project::run(&files, format),
        Command::Compile { scope } => commands::compile::run(&scope, format),
        Command::Remove { name } => commands::daemon::remove(&name, format),
        Command::Clean => commands::daemon::clean(format),
        Command::Stop => commands::daemon::stop(format),
        Command::Ping => commands::daemon::ping(format),
        Command::CheckVersion {
            required,
            found,
            distro,
        } => commands::version::run(&required, &found, distro.as_deref(), format),
        Command::Classify { file } => commands::classify::run(file.as_deref(), format),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
