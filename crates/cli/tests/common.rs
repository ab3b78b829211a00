// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread::JoinHandle;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// A `kiln` command isolated from the user's config and state.
pub fn kiln(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("kiln");
    cmd.env("KILN_CONFIG", home.path().join("config.toml"))
        .env("KILN_STATE_DIR", home.path().join("state"))
        .env_remove("KILN_LOG")
        .env_remove("KILN_JAVA");
    cmd
}

/// Writes a config file pointing the client at `port`.
pub fn write_config(home: &TempDir, port: u16, extra: &str) {
    let content = format!(
        "endpoint = \"127.0.0.1:{port}\"\npoll_attempts = 2\npoll_interval_ms = 10\n{extra}"
    );
    std::fs::write(home.path().join("config.toml"), content).unwrap();
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Serves one HTTP request with `body`, returning the request line.
pub fn serve_once(body: &'static str) -> (u16, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut content_length = 0usize;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header.trim().is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut payload = vec![0; content_length];
        reader.read_exact(&mut payload).unwrap();

        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
        .unwrap();
        request_line.trim_end().to_string()
    });
    (port, handle)
}
