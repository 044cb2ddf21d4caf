//! Tests for the `launch` application service.
//!
//! All remote interaction goes through `MockConnector`/`ScriptedRemote`, so
//! each test can assert exactly which calls were made and in what order.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use lxc_cli::application::ports::ClientError;
use lxc_cli::application::services::launch::launch;
use lxc_cli::domain::{ClientConfig, LaunchError, LaunchPhase, ProfileSelection};

use crate::mocks::{
    CREATE_OP, Call, MockConnector, RecordingReporter, START_OP, ScriptedRemote,
    config_with_images_remote, not_found, options,
};

// ── End-to-end scenarios ──────────────────────────────────────────────────────

#[tokio::test]
async fn named_launch_creates_then_starts() {
    let connector = MockConnector::new(ScriptedRemote::happy());
    let reporter = RecordingReporter::default();

    let outcome = launch(
        &connector,
        &ClientConfig::default(),
        &reporter,
        options(&["ubuntu", "u1"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect("launch succeeds");

    assert_eq!(outcome.name, "u1");
    assert_eq!(outcome.remote, "local");
    let calls = connector.remote.calls();
    assert_eq!(calls.len(), 5, "calls: {calls:?}");
    assert_eq!(calls[0], Call::Connect("local".to_string()));
    match &calls[1] {
        Call::Create {
            name,
            source,
            profiles,
        } => {
            assert_eq!(name.as_deref(), Some("u1"));
            assert_eq!(source.alias, "ubuntu");
            assert!(source.server.is_none());
            assert!(profiles.is_none(), "unspecified profiles must be omitted");
        }
        other => panic!("expected create, got {other:?}"),
    }
    assert_eq!(calls[2], Call::Wait(CREATE_OP.to_string()));
    assert_eq!(calls[3], Call::Start("u1".to_string()));
    assert_eq!(calls[4], Call::Wait(START_OP.to_string()));
}

#[tokio::test]
async fn unnamed_launch_starts_server_assigned_name() {
    let connector = MockConnector::new(ScriptedRemote::reporting(&["/1.0/containers/c3"]));
    let reporter = RecordingReporter::default();

    let outcome = launch(
        &connector,
        &ClientConfig::default(),
        &reporter,
        options(&["ubuntu"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect("launch succeeds");

    assert_eq!(outcome.name, "c3");
    assert_eq!(connector.remote.started(), vec!["c3".to_string()]);
    match &connector.remote.calls()[1] {
        Call::Create { name, .. } => assert!(name.is_none()),
        other => panic!("expected create, got {other:?}"),
    }
}

#[tokio::test]
async fn ephemeral_is_rejected_before_any_remote_call() {
    let connector = MockConnector::new(ScriptedRemote::happy());
    let reporter = RecordingReporter::default();

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &reporter,
        options(&["ubuntu"], ProfileSelection::Unspecified, true),
    )
    .await
    .expect_err("ephemeral is unsupported");

    assert_eq!(failure.phase, LaunchPhase::Init);
    assert_eq!(failure.error, LaunchError::EphemeralUnsupported);
    assert!(connector.remote.calls().is_empty());
    assert!(reporter.lines().is_empty());
}

#[tokio::test]
async fn missing_image_never_reaches_start() {
    let mut remote = ScriptedRemote::happy();
    remote.create = Err(not_found());
    let connector = MockConnector::new(remote);
    let reporter = RecordingReporter::default();

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &reporter,
        options(&["nosuchimage", "u1"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("image is missing");

    assert_eq!(failure.phase, LaunchPhase::Creating);
    assert_eq!(failure.error, LaunchError::ImageNotFound);
    assert!(!failure.created);
    assert!(connector.remote.started().is_empty());
    assert!(
        reporter.lines().iter().all(|l| !l.starts_with("warn:")),
        "nothing was left behind"
    );
}

// ── Create dispatcher ─────────────────────────────────────────────────────────

#[tokio::test]
async fn other_create_errors_pass_through_as_remote_error() {
    let mut remote = ScriptedRemote::happy();
    remote.create = Err(ClientError::Status {
        code: 409,
        message: "container already exists".to_string(),
    });
    let connector = MockConnector::new(remote);

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["ubuntu", "u1"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("conflict");

    assert_eq!(
        failure.error,
        LaunchError::RemoteError("container already exists".to_string())
    );
}

#[tokio::test]
async fn explicit_empty_profiles_are_sent_as_empty_list() {
    let connector = MockConnector::new(ScriptedRemote::happy());

    launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["ubuntu", "u1"], ProfileSelection::ExplicitEmpty, false),
    )
    .await
    .expect("launch succeeds");

    match &connector.remote.calls()[1] {
        Call::Create { profiles, .. } => assert_eq!(profiles.as_deref(), Some(&[][..])),
        other => panic!("expected create, got {other:?}"),
    }
}

#[tokio::test]
async fn explicit_profiles_are_sent_verbatim() {
    let connector = MockConnector::new(ScriptedRemote::happy());
    let names = vec!["gpu".to_string(), "default".to_string(), "gpu".to_string()];

    launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["ubuntu", "u1"], ProfileSelection::ExplicitList(names.clone()), false),
    )
    .await
    .expect("launch succeeds");

    match &connector.remote.calls()[1] {
        Call::Create { profiles, .. } => assert_eq!(profiles.as_ref(), Some(&names)),
        other => panic!("expected create, got {other:?}"),
    }
}

// ── Address resolution ────────────────────────────────────────────────────────

#[tokio::test]
async fn image_from_other_remote_carries_server_address() {
    let connector = MockConnector::new(ScriptedRemote::happy());

    launch(
        &connector,
        &config_with_images_remote(),
        &RecordingReporter::default(),
        options(&["images:ubuntu/22.04", "u1"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect("launch succeeds");

    let calls = connector.remote.calls();
    assert_eq!(calls[0], Call::Connect("local".to_string()));
    match &calls[1] {
        Call::Create { source, .. } => {
            assert_eq!(source.alias, "ubuntu/22.04");
            assert_eq!(source.server.as_deref(), Some("https://images.example:8443"));
        }
        other => panic!("expected create, got {other:?}"),
    }
}

#[tokio::test]
async fn destination_remote_selects_connection() {
    let connector = MockConnector::new(ScriptedRemote::happy());

    launch(
        &connector,
        &config_with_images_remote(),
        &RecordingReporter::default(),
        options(&["images:ubuntu", "images:u1"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect("launch succeeds");

    let calls = connector.remote.calls();
    assert_eq!(calls[0], Call::Connect("images".to_string()));
    match &calls[1] {
        Call::Create { source, .. } => assert!(source.server.is_none()),
        other => panic!("expected create, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_remote_fails_while_resolving() {
    let connector = MockConnector::new(ScriptedRemote::happy());

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["nowhere:ubuntu"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("unknown remote");

    assert_eq!(failure.phase, LaunchPhase::Resolving);
    assert_eq!(failure.error, LaunchError::UnknownRemote("nowhere".to_string()));
    assert!(connector.remote.calls().is_empty());
}

#[tokio::test]
async fn connect_failure_is_remote_error() {
    let mut remote = ScriptedRemote::happy();
    remote.connect_error = Some(ClientError::Transport("bad address".to_string()));
    let connector = MockConnector::new(remote);

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["ubuntu"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("cannot connect");

    assert_eq!(failure.phase, LaunchPhase::Resolving);
    assert_eq!(failure.error, LaunchError::RemoteError("bad address".to_string()));
}

// ── Operation waiter ──────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_create_operation_is_reported_verbatim() {
    let remote = ScriptedRemote::happy().fail_wait(
        CREATE_OP,
        ClientError::OperationFailed("image download failed".to_string()),
    );
    let connector = MockConnector::new(remote);

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["ubuntu", "u1"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("create operation failed");

    assert_eq!(failure.phase, LaunchPhase::AwaitingCreate);
    assert_eq!(
        failure.error,
        LaunchError::OperationFailed("image download failed".to_string())
    );
    assert!(!failure.created);
    assert!(connector.remote.started().is_empty());
}

#[tokio::test]
async fn transport_error_while_waiting_is_remote_error() {
    let remote = ScriptedRemote::happy()
        .fail_wait(CREATE_OP, ClientError::Transport("connection reset".to_string()));
    let connector = MockConnector::new(remote);

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["ubuntu", "u1"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("wait failed");

    assert_eq!(failure.error, LaunchError::RemoteError("connection reset".to_string()));
}

// ── Resource name extractor ───────────────────────────────────────────────────

#[tokio::test]
async fn version_mismatch_never_starts() {
    let connector = MockConnector::new(ScriptedRemote::reporting(&["/2.0/containers/c3"]));
    let reporter = RecordingReporter::default();

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &reporter,
        options(&["ubuntu"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("version mismatch");

    assert_eq!(failure.phase, LaunchPhase::ExtractingName);
    assert!(matches!(failure.error, LaunchError::VersionMismatch { .. }));
    assert!(failure.created, "create had already completed");
    assert!(failure.instance.is_none());
    assert!(connector.remote.started().is_empty());
    assert_eq!(
        reporter.lines().last().map(String::as_str),
        Some("warn:a container was created but its name could not be determined; remove it manually")
    );
}

#[tokio::test]
async fn missing_resources_fail_extraction() {
    let connector = MockConnector::new(ScriptedRemote::happy());

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["ubuntu"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("nothing reported");

    assert_eq!(failure.error, LaunchError::NoResourcesReported);
}

#[tokio::test]
async fn malformed_resource_path_fails_extraction() {
    let connector = MockConnector::new(ScriptedRemote::reporting(&["/1.0/containers"]));

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["ubuntu"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("malformed");

    assert!(matches!(failure.error, LaunchError::MalformedResourcePath(_)));
}

#[tokio::test]
async fn supplied_name_ignores_reported_resources() {
    let connector = MockConnector::new(ScriptedRemote::reporting(&["/2.0/containers/other"]));

    let outcome = launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["ubuntu", "u1"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect("supplied name is authoritative");

    assert_eq!(outcome.name, "u1");
    assert_eq!(connector.remote.started(), vec!["u1".to_string()]);
}

#[tokio::test]
async fn stale_api_version_key_in_config_is_ignored() {
    let config: ClientConfig =
        serde_yaml::from_str("api_version: \"2.0\"\n").expect("valid yaml");
    let path = lxd_api::container_path("c3");
    let connector = MockConnector::new(ScriptedRemote::reporting(&[path.as_str()]));

    let outcome = launch(
        &connector,
        &config,
        &RecordingReporter::default(),
        options(&["ubuntu"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect("reported path uses the version the client speaks");

    assert_eq!(outcome.name, "c3");
}

// ── Start dispatcher ──────────────────────────────────────────────────────────

#[tokio::test]
async fn start_failure_leaves_created_container() {
    let mut remote = ScriptedRemote::happy();
    remote.start = Err(ClientError::Status {
        code: 500,
        message: "no space left".to_string(),
    });
    let connector = MockConnector::new(remote);

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &RecordingReporter::default(),
        options(&["ubuntu", "u1"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("start failed");

    assert_eq!(failure.phase, LaunchPhase::Starting);
    assert_eq!(failure.error, LaunchError::RemoteError("no space left".to_string()));
    assert!(failure.created);
    assert_eq!(failure.instance.as_deref(), Some("u1"));
}

#[tokio::test]
async fn failed_start_operation_is_not_reported_done() {
    let remote = ScriptedRemote::reporting(&["/1.0/containers/c3"])
        .fail_wait(START_OP, ClientError::OperationFailed("apparmor denied".to_string()));
    let connector = MockConnector::new(remote);
    let reporter = RecordingReporter::default();

    let failure = launch(
        &connector,
        &ClientConfig::default(),
        &reporter,
        options(&["ubuntu"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect_err("start operation failed");

    assert_eq!(failure.phase, LaunchPhase::AwaitingStart);
    assert_eq!(
        failure.error,
        LaunchError::OperationFailed("apparmor denied".to_string())
    );
    assert_eq!(failure.instance.as_deref(), Some("c3"));
    assert_eq!(
        reporter.lines(),
        vec![
            "step:Creating container...",
            "success:done",
            "step:Starting container...",
            "warn:container 'c3' was created but not started; remove it manually if it is not wanted",
        ]
    );
}

// ── Progress ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn progress_lines_follow_both_phases() {
    let connector = MockConnector::new(ScriptedRemote::happy());
    let reporter = RecordingReporter::default();

    launch(
        &connector,
        &ClientConfig::default(),
        &reporter,
        options(&["ubuntu", "u1"], ProfileSelection::Unspecified, false),
    )
    .await
    .expect("launch succeeds");

    assert_eq!(
        reporter.lines(),
        vec![
            "step:Creating container...",
            "success:done",
            "step:Starting container...",
            "success:done",
        ]
    );
}
