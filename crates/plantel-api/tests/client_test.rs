// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plantel_api::types::{
    AssignmentCreate, AttendanceCreateUpdate, MatchCreateUpdate, PlayerCreateUpdate, ResourceId,
    StatisticCreate, SummaryParams,
};
use plantel_api::{ApiClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn stat(player: i64, match_id: i64, goals: u32, minutes: u32, starter: bool) -> StatisticCreate {
    StatisticCreate {
        player_id: ResourceId::Int(player),
        match_id: ResourceId::Int(match_id),
        goals,
        assists: 0,
        yellow_cards: 0,
        red_cards: 0,
        minutes_played: minutes,
        starter,
    }
}

// ── Players ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_players() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": 1, "nombre": "Ana", "apellido": "Pérez", "posicion": "DEL", "numero": 9, "activo": true },
        { "id": 2, "nombre": "Bea", "activo": false },
    ]);

    Mock::given(method("GET"))
        .and(path("/jugadores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let players = client.list_players().await.unwrap();

    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "Ana");
    assert_eq!(players[0].number, Some(9));
    assert_eq!(players[1].id, ResourceId::Int(2));
    assert!(!players[1].active);
}

#[tokio::test]
async fn test_create_player_sends_spanish_body() {
    let (server, client) = setup().await;

    let body = PlayerCreateUpdate {
        name: "Carla".into(),
        surname: Some("Gómez".into()),
        birth_date: Some(NaiveDate::from_ymd_opt(2001, 4, 12).unwrap()),
        position: None,
        number: Some(10),
        active: true,
    };

    Mock::given(method("POST"))
        .and(path("/jugadores"))
        .and(body_json(json!({
            "nombre": "Carla",
            "apellido": "Gómez",
            "fecha_nacimiento": "2001-04-12",
            "numero": 10,
            "activo": true
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 3, "nombre": "Carla", "activo": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_player(&body).await.unwrap();
    assert_eq!(created.id, ResourceId::Int(3));
}

#[tokio::test]
async fn test_delete_player_uses_id_path() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/jugadores/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_player(&ResourceId::Int(42)).await.unwrap();
}

// ── Attendance ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_attendance_with_filters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/asistencias"))
        .and(query_param("fecha", "2024-05-04"))
        .and(query_param("tipo", "ENTRENAMIENTO"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "jugador_id": 7, "fecha": "2024-05-04", "tipo": "ENTRENAMIENTO", "presente": true }
        ])))
        .mount(&server)
        .await;

    let rows = client
        .list_attendance(NaiveDate::from_ymd_opt(2024, 5, 4), Some("ENTRENAMIENTO"))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].player_id, ResourceId::Int(7));
    assert_eq!(rows[0].kind, "ENTRENAMIENTO");
}

#[tokio::test]
async fn test_update_attendance() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/asistencias/5"))
        .and(body_json(json!({
            "jugador_id": 7, "fecha": "2024-05-04", "tipo": "PARTIDO", "presente": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "jugador_id": 7, "fecha": "2024-05-04", "tipo": "PARTIDO", "presente": false
        })))
        .mount(&server)
        .await;

    let body = AttendanceCreateUpdate {
        player_id: ResourceId::Int(7),
        date: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
        kind: "PARTIDO".into(),
        present: false,
    };
    let updated = client
        .update_attendance(&ResourceId::Int(5), &body)
        .await
        .unwrap();
    assert!(!updated.present);
}

// ── Assignments ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_assignment_lifecycle_paths() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/asignaciones"))
        .and(body_json(json!({ "jugador_id": 1, "elemento_id": 4 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "jugador_id": 1, "elemento_id": 4,
            "fecha_asignacion": "2024-05-04T10:00:00", "activo": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/asignaciones/devolver/11"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Elemento devuelto correctamente" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/asignaciones/desasignar/1/4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Elemento desasignado correctamente" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_assignment(&AssignmentCreate {
            player_id: ResourceId::Int(1),
            equipment_id: ResourceId::Int(4),
            assigned_on: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, ResourceId::Int(11));

    let returned = client.return_assignment(&created.id).await.unwrap();
    assert_eq!(returned.message, "Elemento devuelto correctamente");

    client
        .unassign(&ResourceId::Int(1), &ResourceId::Int(4))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rotate_ignores_response_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/asignaciones/rotar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "jugador_id": 2, "elemento_id": 1, "activo": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    client.rotate_equipment().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_assignment_surfaces_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/asignaciones"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "detail": "El jugador ya tiene asignado este elemento" })),
        )
        .mount(&server)
        .await;

    let err = client
        .create_assignment(&AssignmentCreate {
            player_id: ResourceId::Int(1),
            equipment_id: ResourceId::Int(4),
            assigned_on: None,
        })
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "El jugador ya tiene asignado este elemento");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ── Matches ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_matches_use_trailing_slash_collection_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/partidos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "fecha": "2024-06-01", "rival": "Los Pumas",
              "resultado_local": null, "resultado_visitante": null,
              "lugar": "Local", "tipo": "PARTIDO" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/partidos/"))
        .and(body_json(json!({
            "fecha": "2024-06-08", "rival": "Halcones",
            "resultado_local": null, "resultado_visitante": null,
            "lugar": "Visitante", "tipo": "AMISTOSO"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "fecha": "2024-06-08", "rival": "Halcones",
            "lugar": "Visitante", "tipo": "AMISTOSO"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let matches = client.list_matches().await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].home_score, None);

    let created = client
        .create_match(&MatchCreateUpdate {
            date: NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(),
            opponent: "Halcones".into(),
            home_score: None,
            away_score: None,
            venue: "Visitante".into(),
            kind: "AMISTOSO".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.kind, "AMISTOSO");
}

#[tokio::test]
async fn test_get_missing_match_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/partidos/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Partido no encontrado" })),
        )
        .mount(&server)
        .await;

    let err = client.get_match(&ResourceId::Int(99)).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 404, .. }));
    assert!(err.to_string().contains("Partido no encontrado"));
}

// ── Statistics ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_summary_sends_sort_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/estadisticas/resumen/"))
        .and(query_param("ordenar_por", "minutos"))
        .and(query_param("orden", "asc"))
        .and(query_param("min_partidos", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "jugador_id": 2, "nombre_jugador": "Bea", "total_partidos": 3, "total_goles": 0,
              "total_asistencias": 1, "total_amarillas": 0, "total_rojas": 0,
              "minutos_totales": 120, "promedio_minutos": 40.0 },
            { "jugador_id": 1, "nombre_jugador": "Ana", "total_partidos": 4, "total_goles": 5,
              "total_asistencias": 2, "total_amarillas": 1, "total_rojas": 0,
              "minutos_totales": 300, "promedio_minutos": 75.0 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client
        .statistics_summary(&SummaryParams {
            sort_by: "minutos".into(),
            descending: false,
            min_matches: Some(3),
            ..SummaryParams::default()
        })
        .await
        .unwrap();

    // Server order is kept as-is.
    assert_eq!(rows[0].player_name, "Bea");
    assert_eq!(rows[1].player_name, "Ana");
    assert!((rows[1].average_minutes - 75.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_record_statistics_sends_one_batch() {
    let (server, client) = setup().await;

    let batch = vec![stat(1, 8, 2, 0, false), stat(2, 8, 0, 90, true)];

    Mock::given(method("POST"))
        .and(path("/estadisticas/registro-multiple/"))
        .and(body_json(json!([
            { "jugador_id": 1, "partido_id": 8, "goles": 2, "asistencias": 0,
              "tarjetas_amarillas": 0, "tarjetas_rojas": 0, "minutos_jugados": 0, "titular": false },
            { "jugador_id": 2, "partido_id": 8, "goles": 0, "asistencias": 0,
              "tarjetas_amarillas": 0, "tarjetas_rojas": 0, "minutos_jugados": 90, "titular": true }
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "jugador_id": 1, "partido_id": 8, "goles": 2, "minutos_jugados": 0, "titular": false },
            { "id": 2, "jugador_id": 2, "partido_id": 8, "minutos_jugados": 90, "titular": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let saved = client.record_statistics(&batch).await.unwrap();
    assert_eq!(saved.len(), 2);
    assert!(saved[1].starter);
}

#[tokio::test]
async fn test_match_statistics() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/estadisticas/partidos/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "partido_id": 8, "fecha": "2024-06-01", "rival": "Los Pumas",
            "resultado_local": 2, "resultado_visitante": 1, "lugar": "Local", "tipo": "PARTIDO",
            "jugadores": [
                { "id": 3, "jugador_id": 1, "partido_id": 8, "goles": 2, "asistencias": 0,
                  "tarjetas_amarillas": 0, "tarjetas_rojas": 0, "minutos_jugados": 90,
                  "titular": true, "fecha_registro": "2024-06-01T20:00:00" }
            ]
        })))
        .mount(&server)
        .await;

    let stats = client.match_statistics(&ResourceId::Int(8)).await.unwrap();
    assert_eq!(stats.home_score, Some(2));
    assert_eq!(stats.players.len(), 1);
    assert_eq!(stats.players[0].goals, 2);
}

#[tokio::test]
async fn test_validation_error_is_flattened() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/estadisticas/registro/"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["body", "partido_id"], "msg": "field required", "type": "value_error.missing" }
            ]
        })))
        .mount(&server)
        .await;

    let err = client
        .record_statistic(&stat(1, 8, 0, 0, false))
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "body.partido_id: field required");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/elementos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_equipment().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_error_body_kept_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/asignaciones/pendientes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client.list_pending_assignments().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(matches!(err, Error::Api { ref message, .. } if message == "Internal Server Error"));
}

#[tokio::test]
async fn test_slow_backend_reports_configured_timeout() {
    let server = MockServer::start().await;
    let transport = TransportConfig {
        timeout: Duration::from_secs(1),
        ..TransportConfig::default()
    };
    let client = ApiClient::new(&server.uri(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/jugadores"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let err = client.list_players().await.unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_secs: 1 }), "{err:?}");
}
