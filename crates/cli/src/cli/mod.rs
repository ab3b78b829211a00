// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for commands that print diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Client for the kiln incremental compiler daemon")]
#[command(
    long_about = "Client for the kiln incremental compiler daemon.\n\n\
    Projects are pushed to a long-running daemon on the loopback interface, \
    which is started on demand the first time a project is pushed."
)]
pub struct Cli {
    /// Output format for diagnostics
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Which projects a compile request covers.
#[derive(Args, Clone, Debug, Default)]
pub struct CompileScope {
    /// Project to compile (all projects when omitted)
    #[arg(long, short = 'p', value_name = "NAME")]
    pub project: Option<String>,

    /// Skip the project's dependencies
    #[arg(long, requires = "project")]
    pub no_deps: bool,

    /// Skip projects that depend on this one
    #[arg(long, requires = "project")]
    pub no_dependents: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or update projects in the daemon, starting it if needed
    #[command(after_help = "\
Examples:
  kiln push app.toml              Push one project
  kiln push projects.yaml         Push every document in a YAML file")]
    Push {
        /// Project descriptor files (.toml, .yaml or .yml)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Compile projects known to the daemon
    Compile {
        #[command(flatten)]
        scope: CompileScope,
    },

    /// Remove a project from the daemon
    Remove {
        /// Project name
        name: String,
    },

    /// Discard all compiler state held by the daemon
    Clean,

    /// Stop the daemon
    Stop,

    /// Check whether the daemon is answering
    Ping,

    /// Check resolved versions against a required version mask
    #[command(after_help = "\
Examples:
  kiln check-version 2.7 2.7.3                     Plain version check
  kiln check-version 2 --distro org.kiln \\
      org.kiln:kiln-api:2.1 com.acme:util:9.0      Check distro artifacts only")]
    CheckVersion {
        /// Required version mask (e.g. 2, 2.7, 2.7.1)
        required: String,

        /// Resolved versions, or group:artifact:version with --distro
        #[arg(required = true, value_name = "FOUND")]
        found: Vec<String>,

        /// Only check artifacts in this group; others are reported as unchecked
        #[arg(long, value_name = "GROUP")]
        distro: Option<String>,
    },

    /// Classify plain compiler log lines by severity
    Classify {
        /// Log file to read (stdin when omitted)
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
