// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io;

use crate::cli::{CompileScope, OutputFormat};
use crate::error::Result;

use super::{fail_on_errors, open_client, report_response};

/// Compiles one project, or everything the daemon knows about.
///
/// Does not start the daemon: there is nothing to compile until a project
/// has been pushed.
pub fn run(scope: &CompileScope, format: OutputFormat) -> Result<()> {
    let mut client = open_client()?;
    let body = client.compile(
        scope.project.as_deref(),
        !scope.no_deps,
        !scope.no_dependents,
    )?;
    let errors = report_response(&body, format, &mut io::stdout().lock())?;
    fail_on_errors(errors)
}
