// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io;

use crate::cli::OutputFormat;
use crate::error::Result;

use super::{open_client, report_response};

pub fn remove(name: &str, format: OutputFormat) -> Result<()> {
    let body = open_client()?.remove(name)?;
    report_response(&body, format, &mut io::stdout().lock())?;
    Ok(())
}

pub fn clean(format: OutputFormat) -> Result<()> {
    let body = open_client()?.clean()?;
    report_response(&body, format, &mut io::stdout().lock())?;
    Ok(())
}

pub fn stop(format: OutputFormat) -> Result<()> {
    let body = open_client()?.stop()?;
    report_response(&body, format, &mut io::stdout().lock())?;
    Ok(())
}

pub fn ping(format: OutputFormat) -> Result<()> {
    let mut client = open_client()?;
    let body = client.ping()?;
    if body.trim().is_empty() && format == OutputFormat::Text {
        println!("daemon is running at {}", client.session().endpoint);
        return Ok(());
    }
    report_response(&body, format, &mut io::stdout().lock())?;
    Ok(())
}
