// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration management.
//!
//! Configuration is stored in `<config dir>/kiln/config.toml` (or the file
//! named by `KILN_CONFIG`) and includes:
//! - `endpoint`: where the daemon listens (default `127.0.0.1:27616`)
//! - `[daemon]`: coordinates and launch settings used when the daemon must
//!   be started
//! - polling settings for the startup wait
//!
//! A missing file means all defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use kiln_core::ArtifactCoordinates;
use kiln_ipc::Endpoint;

use crate::daemon::PollPolicy;
use crate::env;
use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = "kiln";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Client configuration stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Daemon HTTP listener.
    pub endpoint: Endpoint,
    /// Readiness pings before giving up on a freshly started daemon.
    pub poll_attempts: u32,
    /// Delay between readiness pings in milliseconds.
    pub poll_interval_ms: u64,
    /// Timeout for a single request in seconds. Compiles can be slow.
    pub request_timeout_secs: u64,
    /// How to launch the daemon when it is not running.
    pub daemon: DaemonConfig,
}

/// Daemon coordinates and launch settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub group: String,
    pub artifact: String,
    pub version: String,
    /// Java executable (default: `$KILN_JAVA` or `java` on PATH).
    pub java: Option<PathBuf>,
    pub main_class: String,
    /// Maven-layout repository holding the daemon jar (default: `~/.m2/repository`).
    pub repository: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: Endpoint::default(),
            poll_attempts: 60,
            poll_interval_ms: 1000,
            request_timeout_secs: 600,
            daemon: DaemonConfig::default(),
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        DaemonConfig {
            group: "org.kiln".to_string(),
            artifact: "kiln-daemon".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            java: None,
            main_class: "org.kiln.daemon.Main".to_string(),
            repository: None,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from `path`, falling back to defaults if the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(ClientConfig::default());
        }
        let content = fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the default location.
    pub fn load_default() -> Result<Self> {
        Self::load(&config_path())
    }

    fn validate(&self) -> Result<()> {
        if self.poll_attempts == 0 {
            return Err(Error::Config("poll_attempts must be at least 1".to_string()));
        }
        let d = &self.daemon;
        if d.group.is_empty() || d.artifact.is_empty() || d.version.is_empty() {
            return Err(Error::Config(
                "daemon group, artifact and version cannot be empty".to_string(),
            ));
        }
        if d.main_class.is_empty() {
            return Err(Error::Config("daemon main_class cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn coordinates(&self) -> ArtifactCoordinates {
        ArtifactCoordinates::new(
            &self.daemon.group,
            &self.daemon.artifact,
            &self.daemon.version,
        )
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            attempts: self.poll_attempts,
            interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Java executable: config, then `KILN_JAVA`, then `java` on PATH.
    pub fn java(&self) -> PathBuf {
        self.daemon
            .java
            .clone()
            .or_else(env::java)
            .unwrap_or_else(|| PathBuf::from("java"))
    }

    /// Repository root holding the daemon jar.
    pub fn repository(&self) -> PathBuf {
        self.daemon.repository.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".m2/repository"))
                .unwrap_or_else(|| PathBuf::from(".m2/repository"))
        })
    }
}

/// Returns the config file path: `KILN_CONFIG`, else `<config dir>/kiln/config.toml`.
pub fn config_path() -> PathBuf {
    if let Some(path) = env::config_path() {
        return path;
    }
    dirs::config_dir()
        .map(|d| d.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".kiln"))
        .join(CONFIG_FILE_NAME)
}

/// Returns the per-user state directory for daemon bootstrap files.
///
/// Priority:
/// 1. `KILN_STATE_DIR` if set
/// 2. `$XDG_STATE_HOME/kiln` if set
/// 3. `~/.local/state/kiln`
pub fn kiln_state_dir() -> PathBuf {
    if let Some(dir) = env::state_dir() {
        return dir;
    }
    if let Some(dir) = env::xdg_state_home() {
        return dir.join("kiln");
    }
    dirs::home_dir()
        .map(|h| h.join(".local/state/kiln"))
        .unwrap_or_else(|| PathBuf::from(".local/state/kiln"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
