use reqwest::Method;

use gatepass_core::api::purchases::{CreatePurchaseRequest, Purchase};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn create_purchase(
        &self,
        request: &CreatePurchaseRequest,
    ) -> Result<Purchase, ApiError> {
        self.execute(
            Method::POST,
            "/purchases",
            Some(serde_json::to_value(request)?),
        )
        .await
    }

    pub async fn purchases(&self) -> Result<Vec<Purchase>, ApiError> {
        self.execute(Method::GET, "/purchases", None).await
    }

    pub async fn purchase(&self, purchase_id: &str) -> Result<Purchase, ApiError> {
        let path = format!("/purchases/{purchase_id}");
        self.execute(Method::GET, &path, None).await
    }
}
