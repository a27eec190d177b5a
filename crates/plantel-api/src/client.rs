// Async HTTP client for the plantel team-management backend.
//
// One method per REST call. The client owns no state beyond the HTTP
// connection pool and the base URL.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{
    AssignmentCreate, AssignmentResponse, AttendanceCreateUpdate, AttendanceResponse,
    EquipmentCreateUpdate, EquipmentResponse, MatchCreateUpdate, MatchResponse,
    MatchStatisticsResponse, MessageResponse, PlayerCreateUpdate, PlayerResponse,
    PlayerSummaryResponse, ResourceId, StatisticCreate, StatisticResponse, SummaryParams,
};

// ── Error response shape from the backend ────────────────────────────

/// FastAPI-style error body: `{"detail": "..."}` or, for validation
/// failures, `{"detail": [{"msg": "...", "loc": [...]}, ...]}`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        match self.detail {
            Some(Value::String(s)) => Some(s),
            Some(Value::Array(items)) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| {
                        let msg = item
                            .get("msg")
                            .and_then(Value::as_str)
                            .map_or_else(|| item.to_string(), str::to_owned);
                        match item.get("loc").and_then(Value::as_array) {
                            Some(loc) if !loc.is_empty() => {
                                let path: Vec<String> = loc
                                    .iter()
                                    .map(|p| p.as_str().map_or_else(|| p.to_string(), str::to_owned))
                                    .collect();
                                format!("{}: {msg}", path.join("."))
                            }
                            _ => msg,
                        }
                    })
                    .collect();
                Some(parts.join("; "))
            }
            Some(other) => Some(other.to_string()),
            None => self.message,
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the team-management REST backend.
///
/// Paths are joined onto the base URL, so a backend mounted under a
/// prefix (`https://club.example/api/`) works the same as one at the root.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Request timeout the client was built with; `None` for a wrapped
    /// `reqwest::Client`.
    timeout_secs: Option<u64>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client with its own `reqwest::Client` from `transport`.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let mut client = Self::from_reqwest(base_url, http)?;
        client.timeout_secs = Some(transport.timeout.as_secs());
        Ok(client)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout_secs: None,
        })
    }

    /// Ensure the base path ends with `/` so relative joins keep any prefix.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"jugadores"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    async fn post_empty(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_empty(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self
            .http
            .put(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_empty(resp).await
    }

    async fn delete_with_response<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Reqwest timeouts become [`Error::Timeout`] when the limit is known.
    fn transport_error(&self, err: reqwest::Error) -> Error {
        match self.timeout_secs {
            Some(timeout_secs) if err.is_timeout() => Error::Timeout { timeout_secs },
            _ => Error::Transport(err),
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp
                .text()
                .await
                .map_err(|e| self.transport_error(e))?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        debug!(status = status.as_u16(), %message, "backend returned an error");
        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Players ──────────────────────────────────────────────────────

    pub async fn list_players(&self) -> Result<Vec<PlayerResponse>, Error> {
        self.get("jugadores").await
    }

    pub async fn get_player(&self, id: &ResourceId) -> Result<PlayerResponse, Error> {
        self.get(&format!("jugadores/{id}")).await
    }

    pub async fn create_player(&self, body: &PlayerCreateUpdate) -> Result<PlayerResponse, Error> {
        self.post("jugadores", body).await
    }

    pub async fn update_player(
        &self,
        id: &ResourceId,
        body: &PlayerCreateUpdate,
    ) -> Result<PlayerResponse, Error> {
        self.put(&format!("jugadores/{id}"), body).await
    }

    pub async fn delete_player(&self, id: &ResourceId) -> Result<(), Error> {
        self.delete(&format!("jugadores/{id}")).await
    }

    // ── Attendance ───────────────────────────────────────────────────

    /// List attendance, optionally narrowed to one date and/or event type.
    pub async fn list_attendance(
        &self,
        date: Option<chrono::NaiveDate>,
        kind: Option<&str>,
    ) -> Result<Vec<AttendanceResponse>, Error> {
        let mut params = Vec::new();
        if let Some(date) = date {
            params.push(("fecha", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(kind) = kind {
            params.push(("tipo", kind.to_owned()));
        }
        if params.is_empty() {
            self.get("asistencias").await
        } else {
            self.get_with_params("asistencias", &params).await
        }
    }

    pub async fn create_attendance(
        &self,
        body: &AttendanceCreateUpdate,
    ) -> Result<AttendanceResponse, Error> {
        self.post("asistencias", body).await
    }

    pub async fn list_player_attendance(
        &self,
        player_id: &ResourceId,
    ) -> Result<Vec<AttendanceResponse>, Error> {
        self.get(&format!("asistencias/jugador/{player_id}")).await
    }

    pub async fn update_attendance(
        &self,
        id: &ResourceId,
        body: &AttendanceCreateUpdate,
    ) -> Result<AttendanceResponse, Error> {
        self.put(&format!("asistencias/{id}"), body).await
    }

    // ── Equipment ────────────────────────────────────────────────────

    pub async fn list_equipment(&self) -> Result<Vec<EquipmentResponse>, Error> {
        self.get("elementos").await
    }

    pub async fn create_equipment(
        &self,
        body: &EquipmentCreateUpdate,
    ) -> Result<EquipmentResponse, Error> {
        self.post("elementos", body).await
    }

    pub async fn update_equipment(
        &self,
        id: &ResourceId,
        body: &EquipmentCreateUpdate,
    ) -> Result<EquipmentResponse, Error> {
        self.put(&format!("elementos/{id}"), body).await
    }

    pub async fn delete_equipment(&self, id: &ResourceId) -> Result<(), Error> {
        self.delete(&format!("elementos/{id}")).await
    }

    // ── Assignments ──────────────────────────────────────────────────

    pub async fn create_assignment(
        &self,
        body: &AssignmentCreate,
    ) -> Result<AssignmentResponse, Error> {
        self.post("asignaciones", body).await
    }

    /// Mark an assignment as returned (`activo = false` server-side).
    pub async fn return_assignment(&self, id: &ResourceId) -> Result<MessageResponse, Error> {
        self.put_empty(&format!("asignaciones/devolver/{id}")).await
    }

    /// Active (not yet returned) assignments.
    pub async fn list_pending_assignments(&self) -> Result<Vec<AssignmentResponse>, Error> {
        self.get("asignaciones/pendientes").await
    }

    /// Remove the active assignment of `equipment_id` to `player_id`.
    pub async fn unassign(
        &self,
        player_id: &ResourceId,
        equipment_id: &ResourceId,
    ) -> Result<MessageResponse, Error> {
        self.delete_with_response(&format!(
            "asignaciones/desasignar/{player_id}/{equipment_id}"
        ))
        .await
    }

    /// Equipment currently held by one player.
    pub async fn list_player_equipment(
        &self,
        player_id: &ResourceId,
    ) -> Result<Vec<EquipmentResponse>, Error> {
        self.get(&format!("asignaciones/jugador/{player_id}")).await
    }

    /// Ask the backend to redistribute equipment among active players.
    ///
    /// The response body (the new assignment set) is not parsed: callers
    /// re-read `asignaciones/pendientes` instead.
    pub async fn rotate_equipment(&self) -> Result<(), Error> {
        self.post_empty("asignaciones/rotar").await
    }

    // ── Matches ──────────────────────────────────────────────────────

    pub async fn list_matches(&self) -> Result<Vec<MatchResponse>, Error> {
        self.get("partidos/").await
    }

    pub async fn get_match(&self, id: &ResourceId) -> Result<MatchResponse, Error> {
        self.get(&format!("partidos/{id}")).await
    }

    pub async fn create_match(&self, body: &MatchCreateUpdate) -> Result<MatchResponse, Error> {
        self.post("partidos/", body).await
    }

    pub async fn update_match(
        &self,
        id: &ResourceId,
        body: &MatchCreateUpdate,
    ) -> Result<MatchResponse, Error> {
        self.put(&format!("partidos/{id}"), body).await
    }

    pub async fn delete_match(&self, id: &ResourceId) -> Result<(), Error> {
        self.delete(&format!("partidos/{id}")).await
    }

    // ── Statistics ───────────────────────────────────────────────────

    pub async fn record_statistic(
        &self,
        body: &StatisticCreate,
    ) -> Result<StatisticResponse, Error> {
        self.post("estadisticas/registro/", body).await
    }

    /// Submit a whole batch in one request.
    pub async fn record_statistics(
        &self,
        body: &[StatisticCreate],
    ) -> Result<Vec<StatisticResponse>, Error> {
        self.post("estadisticas/registro-multiple/", body).await
    }

    pub async fn player_statistics(
        &self,
        player_id: &ResourceId,
    ) -> Result<PlayerSummaryResponse, Error> {
        self.get(&format!("estadisticas/jugadores/{player_id}")).await
    }

    /// Server-sorted summary. The returned order is authoritative.
    pub async fn statistics_summary(
        &self,
        params: &SummaryParams,
    ) -> Result<Vec<PlayerSummaryResponse>, Error> {
        self.get_with_params("estadisticas/resumen/", &params.to_query())
            .await
    }

    pub async fn match_statistics(
        &self,
        match_id: &ResourceId,
    ) -> Result<MatchStatisticsResponse, Error> {
        self.get(&format!("estadisticas/partidos/{match_id}")).await
    }
}
