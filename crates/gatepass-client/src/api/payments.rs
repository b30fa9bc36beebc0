use reqwest::Method;

use gatepass_core::api::payments::{
    InitiatePaymentRequest, PaymentInitiation, PaymentVerification, VerifyPaymentRequest,
};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn initiate_esewa_payment(
        &self,
        request: &InitiatePaymentRequest,
    ) -> Result<PaymentInitiation, ApiError> {
        self.execute(
            Method::POST,
            "/payments/esewa/initiate",
            Some(serde_json::to_value(request)?),
        )
        .await
    }

    pub async fn verify_esewa_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<PaymentVerification, ApiError> {
        self.execute(
            Method::POST,
            "/payments/esewa/verify",
            Some(serde_json::to_value(request)?),
        )
        .await
    }
}
