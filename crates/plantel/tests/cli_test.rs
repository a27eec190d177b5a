//! Integration tests for the `plantel` CLI binary.
//!
//! Argument parsing, help output, shell completions and exit codes run
//! without a backend; the rest drives the binary against a `wiremock`
//! server standing in for the team-management API.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `plantel` binary with env isolation.
///
/// Clears all `PLANTEL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
/// Stdin is an empty pipe, so confirmations never wait for a human.
fn plantel_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("plantel");
    cmd.env("HOME", "/tmp/plantel-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/plantel-cli-test-nonexistent")
        .env_remove("PLANTEL_PROFILE")
        .env_remove("PLANTEL_BACKEND")
        .env_remove("PLANTEL_OUTPUT")
        .env_remove("PLANTEL_INSECURE")
        .env_remove("PLANTEL_TIMEOUT")
        .env_remove("RUST_LOG")
        .write_stdin("");
    cmd
}

/// `plantel --backend <mock> ...`
fn against(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = plantel_cmd();
    cmd.args(["--backend", &server.uri(), "--timeout", "5"]);
    cmd
}

/// Run the (blocking) binary without stalling the mock server's runtime.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn mount_players(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/jugadores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "nombre": "Ana", "apellido": "Pérez", "posicion": "DEL", "numero": 9, "activo": true },
            { "id": 2, "nombre": "Bea", "activo": true },
            { "id": 3, "nombre": "Caro", "activo": false }
        ])))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = plantel_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    plantel_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("football squad")
            .and(predicate::str::contains("players"))
            .and(predicate::str::contains("attendance"))
            .and(predicate::str::contains("assignments"))
            .and(predicate::str::contains("stats")),
    );
}

#[test]
fn test_version_flag() {
    plantel_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("plantel"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    plantel_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    plantel_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_assignments_subcommands_exist() {
    plantel_cmd()
        .args(["assignments", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("return")
                .and(predicate::str::contains("unassign"))
                .and(predicate::str::contains("rotate")),
        );
}

#[test]
fn test_matches_subcommands_exist() {
    plantel_cmd()
        .args(["matches", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stats").and(predicate::str::contains("edit-stats")));
}

#[test]
fn test_summary_sort_columns_listed() {
    plantel_cmd()
        .args(["stats", "summary", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--asc")
                .and(predicate::str::contains("minutes"))
                .and(predicate::str::contains("--min-matches")),
        );
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = plantel_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = plantel_cmd()
        .args(["--output", "invalid", "players", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_backend_url_is_usage_error() {
    plantel_cmd()
        .args(["--backend", "ftp://files.local", "players", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("backend"));
}

#[test]
fn test_unknown_profile_is_usage_error() {
    plantel_cmd()
        .args(["--profile", "ghost", "players", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_unreachable_backend_exit_code() {
    plantel_cmd()
        .args([
            "--backend",
            "http://127.0.0.1:1",
            "--timeout",
            "2",
            "players",
            "list",
        ])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("backend"));
}

#[test]
fn test_config_show_no_config() {
    plantel_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_set_then_profiles() {
    let home = tempfile::tempdir().unwrap();
    let isolated = |args: &[&str]| {
        let mut cmd = plantel_cmd();
        cmd.env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path())
            .args(args);
        cmd
    };

    isolated(&["--profile", "club", "config", "set", "backend", "http://10.0.0.5:8000"])
        .assert()
        .success();
    isolated(&["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("club *"));
    isolated(&["config", "set", "site", "x"]).assert().code(2);
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_players_list_json() {
    let server = MockServer::start().await;
    mount_players(&server).await;

    let mut cmd = against(&server);
    cmd.args(["--output", "json-compact", "players", "list", "--active"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let players: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = players
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, ["Ana", "Bea"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_players_list_plain_ids() {
    let server = MockServer::start().await;
    mount_players(&server).await;

    let mut cmd = against(&server);
    cmd.args(["-o", "plain", "players", "list"]);
    let output = run(cmd).await;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n2\n3\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_player_exit_code() {
    let server = MockServer::start().await;
    mount_players(&server).await;
    Mock::given(method("GET"))
        .and(path("/jugadores/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Jugador no encontrado" })),
        )
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["players", "get", "99"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    let text = combined_output(&output);
    assert!(text.contains("Player"), "{text}");
    assert!(text.contains("players list"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_requires_confirmation() {
    let server = MockServer::start().await;
    mount_players(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/jugadores/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["players", "delete", "2"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes() {
    let server = MockServer::start().await;
    mount_players(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/jugadores/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["--yes", "players", "delete", "2"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_backend_validation_error_is_surfaced() {
    let server = MockServer::start().await;
    mount_players(&server).await;
    Mock::given(method("POST"))
        .and(path("/jugadores"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{ "loc": ["body", "nombre"], "msg": "field required" }]
        })))
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["players", "create", "--name", " "]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("422"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_summary_sort_reaches_backend() {
    let server = MockServer::start().await;
    mount_players(&server).await;
    Mock::given(method("GET"))
        .and(path("/estadisticas/resumen/"))
        .and(query_param("ordenar_por", "minutos"))
        .and(query_param("orden", "asc"))
        .and(query_param("min_partidos", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "jugador_id": 2, "nombre_jugador": "Bea", "total_partidos": 2, "minutos_totales": 60 },
            { "jugador_id": 1, "nombre_jugador": "Ana Pérez", "total_partidos": 3, "minutos_totales": 250 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args([
        "-o",
        "plain",
        "stats",
        "summary",
        "--sort",
        "minutes",
        "--asc",
        "--min-matches",
        "2",
    ]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    // backend order is kept
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2\n1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_stats_from_file_submits_once() {
    let server = MockServer::start().await;
    mount_players(&server).await;
    Mock::given(method("GET"))
        .and(path("/estadisticas/partidos/5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "partido_id": 5, "jugadores": [] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/estadisticas/registro-multiple/"))
        .and(body_json(json!([
            {
                "jugador_id": 1, "partido_id": 5, "goles": 2, "asistencias": 0,
                "tarjetas_amarillas": 0, "tarjetas_rojas": 0, "minutos_jugados": 0,
                "titular": false
            },
            {
                "jugador_id": 2, "partido_id": 5, "goles": 0, "asistencias": 0,
                "tarjetas_amarillas": 0, "tarjetas_rojas": 0, "minutos_jugados": 90,
                "titular": true
            }
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 30, "jugador_id": 1, "partido_id": 5, "goles": 2 },
            { "id": 31, "jugador_id": 2, "partido_id": 5, "minutos_jugados": 90, "titular": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut lines = tempfile::NamedTempFile::new().unwrap();
    write!(
        lines,
        r#"[{{"player_id": 1, "goals": 2}}, {{"player_id": 2, "minutes_played": 90, "starter": true}}]"#
    )
    .unwrap();

    let mut cmd = against(&server);
    cmd.args(["-o", "plain", "matches", "edit-stats", "5", "--from-file"])
        .arg(lines.path());
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "30\n31\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_stats_surfaces_missing_match() {
    let server = MockServer::start().await;
    mount_players(&server).await;
    Mock::given(method("GET"))
        .and(path("/estadisticas/partidos/8"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Partido no encontrado" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/estadisticas/registro-multiple/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["matches", "edit-stats", "8", "--from-file", "/dev/null"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rotate_prints_new_assignments() {
    let server = MockServer::start().await;
    mount_players(&server).await;
    Mock::given(method("POST"))
        .and(path("/asignaciones/rotar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/asignaciones/pendientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 40, "jugador_id": 2, "elemento_id": 7, "fecha_asignacion": "2024-06-02", "activo": true }
        ])))
        .mount(&server)
        .await;

    let mut cmd = against(&server);
    cmd.args(["-y", "-o", "plain", "assignments", "rotate"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "40\n");
}
