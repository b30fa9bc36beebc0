use reqwest::Method;

use gatepass_core::api::auth::{
    LoginRequest, LogoutRequest, RegisterRequest, SessionTokens,
};
use gatepass_core::api::users::UserProfile;
use gatepass_core::{
    AUTH_LOGIN_PATH, AUTH_LOGOUT_PATH, AUTH_PROFILE_PATH, AUTH_REGISTER_PATH,
};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::store::Credentials;

impl ApiClient {
    /// Log in and persist the returned credential pair in the store.
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionTokens, ApiError> {
        let tokens: SessionTokens = self
            .execute(
                Method::POST,
                AUTH_LOGIN_PATH,
                Some(serde_json::to_value(request)?),
            )
            .await?;
        self.persist_tokens(&tokens)?;
        Ok(tokens)
    }

    /// Register a new account; the backend logs the account in directly.
    pub async fn register(&self, request: &RegisterRequest) -> Result<SessionTokens, ApiError> {
        let tokens: SessionTokens = self
            .execute(
                Method::POST,
                AUTH_REGISTER_PATH,
                Some(serde_json::to_value(request)?),
            )
            .await?;
        self.persist_tokens(&tokens)?;
        Ok(tokens)
    }

    /// Revoke the refresh token server-side and clear the store. The store
    /// is cleared even when revocation fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let refresh_token = self
            .store()
            .load()?
            .and_then(|credentials| credentials.refresh_token);
        let revoked = match refresh_token {
            Some(refresh_token) => {
                let payload = serde_json::to_value(LogoutRequest { refresh_token })?;
                self.execute_ack(Method::POST, AUTH_LOGOUT_PATH, Some(payload))
                    .await
            }
            None => Ok(()),
        };
        self.store().clear()?;
        revoked
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.execute(Method::GET, AUTH_PROFILE_PATH, None).await
    }

    fn persist_tokens(&self, tokens: &SessionTokens) -> Result<(), ApiError> {
        let credentials = Credentials {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            session_token: tokens.session_token.clone(),
        };
        self.store().save(&credentials)?;
        Ok(())
    }
}
