use reqwest::Method;

use gatepass_core::api::tickets::Ticket;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn my_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        self.execute(Method::GET, "/tickets/my-tickets", None).await
    }

    pub async fn ticket(&self, ticket_id: &str) -> Result<Ticket, ApiError> {
        let path = format!("/tickets/{ticket_id}");
        self.execute(Method::GET, &path, None).await
    }
}
