// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental reader for a growing log file.
//!
//! Used while waiting for a freshly spawned daemon so its startup output can
//! be surfaced as it appears. Only complete lines are returned; a trailing
//! partial line stays in the file until its newline arrives.

use std::fs::{self, File, Metadata};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Tracks a byte offset into a log file across polls.
#[derive(Debug)]
pub struct LogTailer {
    path: PathBuf,
    file: Option<File>,
    offset: u64,
    identity: Option<FileId>,
}

/// Device and inode of the file the offset refers to.
type FileId = (u64, u64);

#[cfg(unix)]
fn file_id(meta: &Metadata) -> Option<FileId> {
    use std::os::unix::fs::MetadataExt;
    Some((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
fn file_id(_meta: &Metadata) -> Option<FileId> {
    None
}

impl LogTailer {
    /// Tails `path` from its beginning. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LogTailer {
            path: path.into(),
            file: None,
            offset: 0,
            identity: None,
        }
    }

    /// Tails `path` from its current end, skipping existing content.
    pub fn from_end(path: impl Into<PathBuf>) -> io::Result<Self> {
        let mut tailer = LogTailer::new(path);
        match fs::metadata(&tailer.path) {
            Ok(meta) => {
                tailer.offset = meta.len();
                tailer.identity = file_id(&meta);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        Ok(tailer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of the first unread byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns every complete line appended since the last poll.
    ///
    /// A path that now names a different file (renamed away and recreated)
    /// or a file shorter than the recorded offset (truncated) is reopened and
    /// read from the start.
    pub fn poll_new_content(&mut self) -> io::Result<Vec<String>> {
        let meta = match fs::metadata(&self.path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.reset();
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        let len = meta.len();
        let identity = file_id(&meta);

        if self.identity.is_some() && self.identity != identity {
            tracing::debug!("{} was replaced, reopening", self.path.display());
            self.reset();
        } else if len < self.offset {
            tracing::debug!("{} shrank, reopening", self.path.display());
            self.reset();
        }
        self.identity = identity;
        if len == self.offset {
            return Ok(Vec::new());
        }

        let file = match self.file.take() {
            Some(file) => file,
            None => File::open(&self.path)?,
        };
        let file = self.file.insert(file);
        file.seek(SeekFrom::Start(self.offset))?;
        let mut buf = Vec::new();
        file.by_ref().take(len - self.offset).read_to_end(&mut buf)?;

        let Some(last_newline) = buf.iter().rposition(|&b| b == b'\n') else {
            return Ok(Vec::new());
        };
        let complete = &buf[..=last_newline];
        self.offset += complete.len() as u64;

        Ok(String::from_utf8_lossy(complete)
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn reset(&mut self) {
        self.file = None;
        self.offset = 0;
        self.identity = None;
    }
}

#[cfg(test)]
#[path = "tail_tests.rs"]
mod tests;
