use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use gatepass_core::api::auth::{RefreshRequest, SessionTokens};
use gatepass_core::{ApiEnvelope, AUTH_REFRESH_PATH, NO_REFRESH_PATHS};

use crate::error::ApiError;
use crate::store::{CredentialStore, Credentials, MemoryStore};

const DEFAULT_USER_AGENT: &str = "gatepass-client/0.1.0";
const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated API client.
///
/// Attaches the stored access token as a bearer header, and on a 401 for a
/// non-auth endpoint refreshes the session and retries the request once.
/// Refreshes are serialized through a fair async mutex owned by this
/// instance: concurrent 401s produce exactly one `/auth/refresh` call, and
/// every waiter settles with that call's outcome in FIFO order.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
    refresh_timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Access token to attach, if a credential pair with a non-empty access
    /// token is stored.
    fn bearer(&self) -> Result<Option<String>, ApiError> {
        let credentials = self.store.load()?;
        Ok(credentials
            .map(|credentials| credentials.access_token)
            .filter(|token| !token.is_empty()))
    }

    /// Issue a request with automatic bearer attachment and the
    /// 401-refresh-retry protocol. Non-401 responses pass through
    /// unchanged; the second response of a retried request passes through
    /// as well, whatever its status.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let bearer = self.bearer()?;
        let response = self
            .send_once(method.clone(), path, payload.as_ref(), bearer.as_deref())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED || is_no_refresh_path(path) {
            return Ok(response);
        }

        let fresh = self.refresh_access_token(bearer.as_deref()).await?;
        self.send_once(method, path, payload.as_ref(), Some(&fresh))
            .await
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        payload: Option<&serde_json::Value>,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path);
        let mut builder = self.http.request(method.clone(), &url);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(payload) = payload {
            builder = builder.json(payload);
        }
        debug!(method = %method, url = %url, "http request");
        let start = std::time::Instant::now();
        let response = builder.send().await?;
        debug!(
            method = %method,
            url = %url,
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );
        Ok(response)
    }

    /// Single-flight session refresh.
    ///
    /// `stale_token` is the bearer the failing request carried. Callers
    /// queue on the gate; whoever enters first performs the refresh, and
    /// late arrivals find the rotated pair in the store (or find it
    /// cleared) and adopt that outcome without a second network call.
    async fn refresh_access_token(&self, stale_token: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.refresh_gate.lock().await;

        if let Some(current) = self.bearer()? {
            if stale_token != Some(current.as_str()) {
                return Ok(current);
            }
        }

        let refresh_token = self
            .store
            .load()?
            .and_then(|credentials| credentials.refresh_token)
            .filter(|token| !token.is_empty());
        // also the path late waiters take after a failed refresh cleared
        // the store, so the message stays generic
        let Some(refresh_token) = refresh_token else {
            self.store.clear()?;
            warn!("session torn down: refresh token missing or already cleared");
            return Err(ApiError::SessionExpired(
                "refresh token missing or already cleared".to_string(),
            ));
        };

        info!("access token rejected; refreshing session");
        let outcome = tokio::time::timeout(
            self.refresh_timeout,
            self.call_refresh(&refresh_token),
        )
        .await;

        match outcome {
            Ok(Ok(tokens)) => {
                let credentials = Credentials {
                    access_token: tokens.access_token.clone(),
                    // keep the old refresh token unless the server rotated it
                    refresh_token: tokens.refresh_token.clone().or(Some(refresh_token)),
                    session_token: tokens.session_token.clone(),
                };
                self.store.save(&credentials)?;
                debug!("session refreshed");
                Ok(tokens.access_token)
            }
            Ok(Err(err)) => {
                self.store.clear()?;
                warn!(error = %err, "session refresh failed; credentials cleared");
                Err(ApiError::SessionExpired(err.to_string()))
            }
            Err(_) => {
                self.store.clear()?;
                warn!(
                    timeout_ms = self.refresh_timeout.as_millis(),
                    "session refresh timed out; credentials cleared"
                );
                Err(ApiError::SessionExpired("refresh timed out".to_string()))
            }
        }
    }

    async fn call_refresh(&self, refresh_token: &str) -> Result<SessionTokens, ApiError> {
        let payload = serde_json::to_value(RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        let response = self
            .send_once(Method::POST, AUTH_REFRESH_PATH, Some(&payload), None)
            .await?;
        Self::decode(response).await
    }

    /// Send and decode the canonical envelope into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let response = self.send(method, path, payload).await?;
        Self::decode(response).await
    }

    /// Send and require a success envelope, ignoring its payload.
    pub async fn execute_ack(
        &self,
        method: Method,
        path: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<(), ApiError> {
        let response = self.send(method, path, payload).await?;
        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(ApiError::from_status(status, message));
        }
        let envelope: ApiEnvelope<serde_json::Value> = response
            .json()
            .await
            .map_err(|err| ApiError::Envelope(err.to_string()))?;
        Ok(envelope.ack()?)
    }

    pub(crate) async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(ApiError::from_status(status, message));
        }
        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|err| ApiError::Envelope(err.to_string()))?;
        Ok(envelope.into_data()?)
    }

    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ApiEnvelope<serde_json::Value>>().await {
            Ok(envelope) => envelope.message.unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        }
    }
}

fn is_no_refresh_path(path: &str) -> bool {
    let bare = path.split('?').next().unwrap_or(path);
    NO_REFRESH_PATHS.contains(&bare)
}

/// Builder for [`ApiClient`].
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    store: Option<Arc<dyn CredentialStore>>,
    timeout: Option<Duration>,
    refresh_timeout: Option<Duration>,
    user_agent: Option<String>,
    accept_invalid_certs: bool,
}

impl ApiClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bound on the refresh round trip; queued requests are rejected
    /// rather than suspended past it.
    pub fn refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::Configuration("base_url is required".to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut builder = reqwest::ClientBuilder::new()
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            )
            .danger_accept_invalid_certs(self.accept_invalid_certs);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(ApiClient {
            http,
            base_url,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryStore::new())),
            refresh_gate: Arc::new(tokio::sync::Mutex::new(())),
            refresh_timeout: self.refresh_timeout.unwrap_or(DEFAULT_REFRESH_TIMEOUT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::events::EventFilter;
    use gatepass_core::api::auth::LoginRequest;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    fn seeded_client(
        server: &ServerGuard,
        credentials: Option<Credentials>,
    ) -> (ApiClient, Arc<MemoryStore>) {
        let store = Arc::new(match credentials {
            Some(credentials) => MemoryStore::with_credentials(credentials),
            None => MemoryStore::new(),
        });
        let client = ApiClient::builder()
            .base_url(server.url())
            .store(store.clone() as Arc<dyn CredentialStore>)
            .build()
            .expect("client");
        (client, store)
    }

    fn stale_credentials() -> Credentials {
        Credentials::new("stale").with_refresh_token("refresh-1")
    }

    fn envelope(data: serde_json::Value) -> String {
        json!({"success": true, "data": data}).to_string()
    }

    fn user_body() -> serde_json::Value {
        json!({
            "id": "u-1",
            "fullName": "Asha Shrestha",
            "email": "asha@example.com",
            "role": "attendee"
        })
    }

    #[tokio::test]
    async fn concurrent_unauthorized_requests_trigger_one_refresh() {
        let mut server = Server::new_async().await;

        // a request may observe the rotated token before its first send, so
        // the stale routes are hit at most once each
        let tickets_stale = server
            .mock("GET", "/tickets/my-tickets")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .with_body(json!({"success": false, "message": "token expired"}).to_string())
            .expect_at_most(1)
            .create_async()
            .await;
        let tickets_fresh = server
            .mock("GET", "/tickets/my-tickets")
            .match_header("authorization", "Bearer new-token")
            .with_status(200)
            .with_body(envelope(json!([])))
            .create_async()
            .await;
        let events_stale = server
            .mock("GET", "/events")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .expect_at_most(1)
            .create_async()
            .await;
        let events_fresh = server
            .mock("GET", "/events")
            .match_header("authorization", "Bearer new-token")
            .with_status(200)
            .with_body(envelope(json!([])))
            .create_async()
            .await;
        let profile_stale = server
            .mock("GET", "/auth/profile")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .expect_at_most(1)
            .create_async()
            .await;
        let profile_fresh = server
            .mock("GET", "/auth/profile")
            .match_header("authorization", "Bearer new-token")
            .with_status(200)
            .with_body(envelope(user_body()))
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .match_body(Matcher::Json(json!({"refreshToken": "refresh-1"})))
            .with_status(200)
            .with_body(envelope(json!({"accessToken": "new-token"})))
            .expect(1)
            .create_async()
            .await;

        let (client, store) = seeded_client(&server, Some(stale_credentials()));

        let filter = EventFilter::default();
        let (tickets, events, profile) = tokio::join!(
            client.my_tickets(),
            client.list_events(&filter),
            client.profile(),
        );
        assert!(tickets.expect("tickets").is_empty());
        assert!(events.expect("events").is_empty());
        assert_eq!(profile.expect("profile").email, "asha@example.com");

        refresh.assert_async().await;
        tickets_stale.assert_async().await;
        tickets_fresh.assert_async().await;
        events_stale.assert_async().await;
        events_fresh.assert_async().await;
        profile_stale.assert_async().await;
        profile_fresh.assert_async().await;

        // the rotated pair is persisted, and the old refresh token is kept
        // because the server did not rotate it
        let credentials = store.load().expect("load").expect("credentials");
        assert_eq!(credentials.access_token, "new-token");
        assert_eq!(credentials.refresh_token.as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn unauthorized_login_never_triggers_refresh() {
        let mut server = Server::new_async().await;
        let login = server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(json!({"success": false, "message": "bad password"}).to_string())
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let (client, _store) = seeded_client(&server, Some(stale_credentials()));
        let request = LoginRequest {
            email: "asha@example.com".to_string(),
            password: "wrong".to_string(),
        };
        match client.login(&request).await {
            Err(ApiError::Unauthorized(message)) => assert_eq!(message, "bad password"),
            other => panic!("expected unauthorized, got {other:?}"),
        }

        login.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_refresh_does_not_recurse() {
        let mut server = Server::new_async().await;
        let events = server
            .mock("GET", "/events")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;

        let (client, store) = seeded_client(&server, Some(stale_credentials()));
        let result = client.list_events(&EventFilter::default()).await;
        assert!(matches!(result, Err(ApiError::SessionExpired(_))));
        assert_eq!(store.load().expect("load"), None);

        events.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn second_unauthorized_after_retry_surfaces_to_caller() {
        let mut server = Server::new_async().await;
        let events_stale = server
            .mock("GET", "/events")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        let events_fresh = server
            .mock("GET", "/events")
            .match_header("authorization", "Bearer new-token")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_body(envelope(json!({"accessToken": "new-token"})))
            .expect(1)
            .create_async()
            .await;

        let (client, _store) = seeded_client(&server, Some(stale_credentials()));
        let result = client.list_events(&EventFilter::default()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));

        events_stale.assert_async().await;
        events_fresh.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn missing_refresh_token_tears_down_without_network_call() {
        let mut server = Server::new_async().await;
        let events = server
            .mock("GET", "/events")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let (client, store) = seeded_client(&server, Some(Credentials::new("stale")));
        let result = client.list_events(&EventFilter::default()).await;
        match result {
            Err(ApiError::SessionExpired(reason)) => {
                assert!(reason.contains("refresh token missing"));
            }
            other => panic!("expected session expiry, got {other:?}"),
        }
        assert_eq!(store.load().expect("load"), None);

        events.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn failed_refresh_releases_the_gate_for_later_attempts() {
        let mut server = Server::new_async().await;
        let events = server
            .mock("GET", "/events")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .expect(2)
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(500)
            .with_body(json!({"success": false, "message": "refresh store down"}).to_string())
            .expect(2)
            .create_async()
            .await;

        let (client, store) = seeded_client(&server, Some(stale_credentials()));
        let first = client.list_events(&EventFilter::default()).await;
        assert!(matches!(first, Err(ApiError::SessionExpired(_))));

        // logging in again must be able to start a fresh refresh cycle
        store.save(&stale_credentials()).expect("reseed");
        let second = client.list_events(&EventFilter::default()).await;
        assert!(matches!(second, Err(ApiError::SessionExpired(_))));

        events.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn refresh_timeout_rejects_every_waiter_and_clears_the_store() {
        use std::io::Write;

        let mut server = Server::new_async().await;
        let tickets = server
            .mock("GET", "/tickets/my-tickets")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        let events = server
            .mock("GET", "/events")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        // the refresh responds long after the client's deadline
        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_chunked_body(|writer| {
                std::thread::sleep(Duration::from_millis(500));
                writer.write_all(
                    json!({"success": true, "data": {"accessToken": "late-token"}})
                        .to_string()
                        .as_bytes(),
                )
            })
            .expect(1)
            .create_async()
            .await;

        let store = Arc::new(MemoryStore::with_credentials(stale_credentials()));
        let client = ApiClient::builder()
            .base_url(server.url())
            .store(store.clone() as Arc<dyn CredentialStore>)
            .refresh_timeout(Duration::from_millis(50))
            .build()
            .expect("client");

        let filter = EventFilter::default();
        let (tickets_result, events_result) =
            tokio::join!(client.my_tickets(), client.list_events(&filter));
        match tickets_result {
            Err(ApiError::SessionExpired(_)) => {}
            other => panic!("expected session expiry, got {other:?}"),
        }
        match events_result {
            Err(ApiError::SessionExpired(_)) => {}
            other => panic!("expected session expiry, got {other:?}"),
        }
        assert_eq!(store.load().expect("load"), None);

        tickets.assert_async().await;
        events.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn non_auth_errors_pass_through_untouched() {
        let mut server = Server::new_async().await;
        let missing = server
            .mock("GET", "/events/ev-404")
            .match_header("authorization", "Bearer stale")
            .with_status(404)
            .with_body(json!({"success": false, "message": "event not found"}).to_string())
            .create_async()
            .await;
        let refresh = server
            .mock("POST", "/auth/refresh")
            .expect(0)
            .create_async()
            .await;

        let (client, _store) = seeded_client(&server, Some(stale_credentials()));
        match client.event("ev-404").await {
            Err(ApiError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "event not found");
            }
            other => panic!("expected api error, got {other:?}"),
        }

        missing.assert_async().await;
        refresh.assert_async().await;
    }

    #[tokio::test]
    async fn requests_without_credentials_carry_no_bearer() {
        let mut server = Server::new_async().await;
        let events = server
            .mock("GET", "/events")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(envelope(json!([])))
            .create_async()
            .await;

        let (client, _store) = seeded_client(&server, None);
        let listed = client
            .list_events(&EventFilter::default())
            .await
            .expect("events");
        assert!(listed.is_empty());
        events.assert_async().await;
    }

    #[tokio::test]
    async fn success_envelope_without_data_is_a_decode_error() {
        let mut server = Server::new_async().await;
        let events = server
            .mock("GET", "/events")
            .with_status(200)
            .with_body(json!({"success": true}).to_string())
            .create_async()
            .await;

        let (client, _store) = seeded_client(&server, None);
        let result = client.list_events(&EventFilter::default()).await;
        assert!(matches!(result, Err(ApiError::Envelope(_))));
        events.assert_async().await;
    }
}
