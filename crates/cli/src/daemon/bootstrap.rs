// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-version daemon install directory and its bootstrap config.
//!
//! Layout under the state directory:
//!
//! ```text
//! <state>/daemon/<version>/bootstrap.properties
//! <state>/daemon/<version>/bootstrap.lock
//! <state>/daemon/<version>/daemon.log
//! ```
//!
//! The bootstrap file is generated once per daemon version and reused on
//! every later launch.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use kiln_core::ArtifactCoordinates;

use crate::error::Result;

const BOOTSTRAP_NAME: &str = "bootstrap.properties";
const LOCK_NAME: &str = "bootstrap.lock";
const LOG_NAME: &str = "daemon.log";

/// Template for the bootstrap file. `${...}` placeholders are filled in
/// from the daemon coordinates and install directory.
pub const BOOTSTRAP_TEMPLATE: &str = "\
# kiln daemon bootstrap, generated once per daemon version
daemon.group=${group}
daemon.artifact=${artifact}
daemon.version=${version}
daemon.home=${home}
daemon.log=${home}/daemon.log
";

/// Paths for one daemon version's install directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonLayout {
    home: PathBuf,
}

impl DaemonLayout {
    /// Layout for `version` under the per-user state directory.
    pub fn new(state_dir: &Path, version: &str) -> Self {
        DaemonLayout {
            home: state_dir.join("daemon").join(version),
        }
    }

    /// The daemon's install (and working) directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn bootstrap_path(&self) -> PathBuf {
        self.home.join(BOOTSTRAP_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.home.join(LOG_NAME)
    }

    fn lock_path(&self) -> PathBuf {
        self.home.join(LOCK_NAME)
    }
}

/// Fills the bootstrap template. Properties files use `\` as an escape, so
/// Windows separators are written as `/`.
pub fn render_bootstrap(coordinates: &ArtifactCoordinates, home: &Path) -> String {
    let home = home.display().to_string().replace('\\', "/");
    BOOTSTRAP_TEMPLATE
        .replace("${group}", &coordinates.group)
        .replace("${artifact}", &coordinates.artifact)
        .replace("${version}", &coordinates.version)
        .replace("${home}", &home)
}

/// Writes the bootstrap file if it does not exist yet and returns its path.
///
/// An exclusive lock on a sibling lock file keeps concurrent builds from
/// interleaving writes. An existing file is never rewritten.
pub fn ensure_bootstrap(layout: &DaemonLayout, coordinates: &ArtifactCoordinates) -> Result<PathBuf> {
    let path = layout.bootstrap_path();
    if path.exists() {
        return Ok(path);
    }

    fs::create_dir_all(layout.home())?;
    let lock = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(layout.lock_path())?;
    lock.lock_exclusive()?;

    // Another process may have written it while we waited for the lock.
    if !path.exists() {
        let tmp = path.with_extension("properties.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(render_bootstrap(coordinates, layout.home()).as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &path)?;
        tracing::info!("wrote daemon bootstrap {}", path.display());
    }

    lock.unlock()?;
    Ok(path)
}

#[cfg(test)]
#[path = "bootstrap_tests.rs"]
mod tests;
