// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

fn report(body: &str, format: OutputFormat) -> (usize, String) {
    let mut out = Vec::new();
    let errors = report_response(body, format, &mut out).unwrap();
    (errors, String::from_utf8(out).unwrap())
}

const BODY: &str = "\
compiling app
-ERROR\tCOMPILER\tsrc/A.java#3,7,40,2\tmissing semicolon
-WARN\tCOMPILER\tsrc/B.java#9,1,80,5\tunchecked call
-ERROR\tBUILD\t\tclasspath entry missing
done
";

#[test]
fn report_counts_errors() {
    let (errors, out) = report(BODY, OutputFormat::Text);
    assert_eq!(errors, 2);
    assert_eq!(
        out,
        "error: src/A.java:3:7: missing semicolon\n\
         warning: src/B.java:9:1: unchecked call\n\
         error: classpath entry missing\n"
    );
}

#[test]
fn report_json() {
    let (errors, out) = report(BODY, OutputFormat::Json);
    assert_eq!(errors, 2);
    assert_eq!(out.lines().count(), 3);
    for line in out.lines() {
        let _: serde_json::Value = serde_json::from_str(line).unwrap();
    }
}

#[test]
fn report_plain_body() {
    let (errors, out) = report("  pong\n", OutputFormat::Text);
    assert_eq!(errors, 0);
    assert_eq!(out, "pong\n");

    let (_, out) = report("pong", OutputFormat::Json);
    assert_eq!(out, "{\"response\":\"pong\"}\n");
}

#[test]
fn report_empty_body_prints_nothing() {
    let (errors, out) = report("\n", OutputFormat::Text);
    assert_eq!(errors, 0);
    assert!(out.is_empty());
}

#[test]
fn error_count_decides_exit() {
    assert!(fail_on_errors(0).is_ok());
    assert!(matches!(
        fail_on_errors(3),
        Err(Error::CompileFailed { errors: 3 })
    ));
}
