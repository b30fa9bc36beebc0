use reqwest::Method;

use gatepass_core::api::checkin::{CheckinRequest, CheckinResult};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Staff gate scan. Idempotency lives server-side; a repeated scan
    /// comes back with `already_checked_in` set.
    pub async fn scan_ticket(&self, request: &CheckinRequest) -> Result<CheckinResult, ApiError> {
        self.execute(
            Method::POST,
            "/checkin/scan",
            Some(serde_json::to_value(request)?),
        )
        .await
    }
}
