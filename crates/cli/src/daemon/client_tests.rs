// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kiln_ipc::ProjectDescriptor;
use tempfile::tempdir;

use super::super::test_helpers::*;
use super::*;
use super::super::transport::TransportError;
use crate::error::Error;

fn project() -> ProjectDescriptor {
    let mut project = ProjectDescriptor::new("app", "out/app");
    project.source_roots.push("src/main/java".into());
    project
}

fn client(
    transport: ScriptedTransport,
    state_dir: &std::path::Path,
    spawner: FakeSpawner,
    sleeper: CountingSleeper,
) -> DaemonClient<ScriptedTransport> {
    DaemonClient::new(transport, test_session(state_dir))
        .with_spawner(spawner)
        .with_sleeper(sleeper)
        .with_log_sink(|_: &str| {})
}

#[test]
fn upsert_without_spawn_when_daemon_is_up() {
    let dir = tempdir().unwrap();
    let spawner = FakeSpawner::default();
    let transport = ScriptedTransport::new([], Reply::Body("ok"));
    let mut client = client(transport, dir.path(), spawner.clone(), CountingSleeper::default());

    assert_eq!(client.create_or_update(&project()).unwrap(), "ok");
    assert_eq!(client.state(), LaunchState::NotStarted);
    assert_eq!(spawner.spawn_count(), 0);
    assert_eq!(client.transport().sent_actions(), vec!["createOrUpdate"]);
}

#[test]
fn upsert_spawns_polls_and_retries_once() {
    let dir = tempdir().unwrap();
    let spawner = FakeSpawner::default();
    let sleeper = CountingSleeper::default();
    // Refused upsert, two refused pings, a good ping, then the retry.
    let transport = ScriptedTransport::new(
        [Reply::Refused, Reply::Refused, Reply::Refused],
        Reply::Body("ok"),
    );
    let mut client = client(transport, dir.path(), spawner.clone(), sleeper.clone());

    assert_eq!(client.create_or_update(&project()).unwrap(), "ok");
    assert_eq!(client.state(), LaunchState::Ready);
    assert_eq!(spawner.spawn_count(), 1);
    assert_eq!(
        client.transport().sent_actions(),
        vec!["createOrUpdate", "ping", "ping", "ping", "createOrUpdate"]
    );
    assert_eq!(*sleeper.slept.borrow(), vec![Duration::from_secs(1); 2]);
}

#[test]
fn retry_sends_identical_request() {
    let dir = tempdir().unwrap();
    let transport = ScriptedTransport::new([Reply::Refused], Reply::Body("ok"));
    let mut client = client(
        transport,
        dir.path(),
        FakeSpawner::default(),
        CountingSleeper::default(),
    );

    client.create_or_update(&project()).unwrap();
    let sent = &client.transport().sent;
    assert_eq!(sent.first(), sent.last());
}

#[test]
fn spawn_writes_bootstrap_and_command_line() {
    let dir = tempdir().unwrap();
    let spawner = FakeSpawner::default();
    let transport = ScriptedTransport::new([Reply::Refused], Reply::Body("ok"));
    let mut client = client(transport, dir.path(), spawner.clone(), CountingSleeper::default());

    client.create_or_update(&project()).unwrap();

    let bootstrap = client.session().layout.bootstrap_path();
    assert!(bootstrap.exists());
    let spawned = spawner.spawned.borrow();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0], client.session().command_line(&bootstrap));
}

#[test]
fn process_exit_fails_after_reported_attempts() {
    let dir = tempdir().unwrap();
    let spawner = FakeSpawner::exiting_after(4);
    let mut client = client(
        ScriptedTransport::refusing(),
        dir.path(),
        spawner.clone(),
        CountingSleeper::default(),
    );

    match client.create_or_update(&project()) {
        Err(Error::DaemonUnavailable { attempts, .. }) => assert_eq!(attempts, 4),
        other => panic!("expected DaemonUnavailable, got {other:?}"),
    }
    assert_eq!(client.state(), LaunchState::Failed);
    assert_eq!(client.transport().pings(), 4);
    // No retry after a failed startup.
    assert_eq!(
        client
            .transport()
            .sent_actions()
            .iter()
            .filter(|a| **a == "createOrUpdate")
            .count(),
        1
    );
}

#[test]
fn poll_budget_is_configurable() {
    let dir = tempdir().unwrap();
    let sleeper = CountingSleeper::default();
    let mut client = client(
        ScriptedTransport::refusing(),
        dir.path(),
        FakeSpawner::default(),
        sleeper.clone(),
    )
    .with_policy(PollPolicy {
        attempts: 5,
        interval: Duration::from_millis(10),
    });

    let err = client.create_or_update(&project()).unwrap_err();
    assert!(matches!(err, Error::DaemonUnavailable { attempts: 5, .. }));
    assert_eq!(client.transport().pings(), 5);
    assert_eq!(*sleeper.slept.borrow(), vec![Duration::from_millis(10); 4]);
}

#[test]
fn failed_retry_surfaces_its_error() {
    let dir = tempdir().unwrap();
    let spawner = FakeSpawner::default();
    let transport = ScriptedTransport::new(
        [Reply::Refused, Reply::Body("pong"), Reply::Broken],
        Reply::Body("ok"),
    );
    let mut client = client(transport, dir.path(), spawner.clone(), CountingSleeper::default());

    let err = client.create_or_update(&project()).unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Http(_))));
    assert_eq!(spawner.spawn_count(), 1);
    assert_eq!(client.state(), LaunchState::Ready);
}

#[test]
fn non_refused_upsert_error_does_not_spawn() {
    let dir = tempdir().unwrap();
    let spawner = FakeSpawner::default();
    let transport = ScriptedTransport::new([Reply::Broken], Reply::Body("ok"));
    let mut client = client(transport, dir.path(), spawner.clone(), CountingSleeper::default());

    assert!(client.create_or_update(&project()).is_err());
    assert_eq!(spawner.spawn_count(), 0);
    assert_eq!(client.state(), LaunchState::NotStarted);
}

#[test]
fn other_requests_never_spawn() {
    let dir = tempdir().unwrap();
    let spawner = FakeSpawner::default();
    let mut client = client(
        ScriptedTransport::refusing(),
        dir.path(),
        spawner.clone(),
        CountingSleeper::default(),
    );

    let err = client.compile(Some("app"), true, true).unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::ConnectionRefused(_))
    ));
    assert!(client.remove("app").is_err());
    assert!(client.clean().is_err());
    assert!(client.stop().is_err());
    assert!(client.ping().is_err());
    assert_eq!(spawner.spawn_count(), 0);
    assert_eq!(
        client.transport().sent_actions(),
        vec!["compile", "remove", "clean", "stop", "ping"]
    );
}

#[test]
fn compile_builds_request() {
    let dir = tempdir().unwrap();
    let mut client = client(
        ScriptedTransport::new([], Reply::Body("")),
        dir.path(),
        FakeSpawner::default(),
        CountingSleeper::default(),
    );

    client.compile(Some("app"), false, true).unwrap();
    client.compile(None, true, true).unwrap();

    let sent = &client.transport().sent;
    assert_eq!(sent[0].path_and_query(), "/compile?p=app&noDependencies=true");
    assert_eq!(sent[1].path_and_query(), "/compile");
}

#[test]
fn startup_lines_reach_log_sink() {
    let dir = tempdir().unwrap();
    let spawner = FakeSpawner::default().with_startup_lines(&["booting", "ready on 27616"]);
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    let transport = ScriptedTransport::new([Reply::Refused, Reply::Refused], Reply::Body("ok"));

    let mut client = DaemonClient::new(transport, test_session(dir.path()))
        .with_spawner(spawner)
        .with_sleeper(CountingSleeper::default())
        .with_log_sink(move |line: &str| sink.borrow_mut().push(line.to_string()));

    client.create_or_update(&project()).unwrap();
    assert_eq!(*lines.borrow(), vec!["booting", "ready on 27616"]);
}

#[test]
fn old_log_content_is_not_replayed() {
    let dir = tempdir().unwrap();
    let session = test_session(dir.path());
    std::fs::create_dir_all(session.layout.home()).unwrap();
    std::fs::write(session.layout.log_path(), "previous run\n").unwrap();

    let spawner = FakeSpawner::default().with_startup_lines(&["fresh start"]);
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    let transport = ScriptedTransport::new([Reply::Refused], Reply::Body("ok"));

    let mut client = DaemonClient::new(transport, session)
        .with_spawner(spawner)
        .with_sleeper(CountingSleeper::default())
        .with_log_sink(move |line: &str| sink.borrow_mut().push(line.to_string()));

    client.create_or_update(&project()).unwrap();
    assert_eq!(*lines.borrow(), vec!["fresh start"]);
}
