use reqwest::Method;

use gatepass_core::api::events::{CreateEventRequest, Event, UpdateEventRequest};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::query::{append_params, build_params, opt_param};

#[derive(Debug, Default, Clone)]
pub struct EventFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ApiClient {
    pub async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, ApiError> {
        let mut path = "/events".to_string();
        let params = build_params([
            opt_param("category", filter.category.clone()),
            opt_param("search", filter.search.clone()),
            opt_param("page", filter.page.map(|value| value.to_string())),
            opt_param("limit", filter.limit.map(|value| value.to_string())),
        ]);
        append_params(&mut path, params);
        self.execute(Method::GET, &path, None).await
    }

    pub async fn event(&self, event_id: &str) -> Result<Event, ApiError> {
        let path = format!("/events/{event_id}");
        self.execute(Method::GET, &path, None).await
    }

    pub async fn create_event(&self, request: &CreateEventRequest) -> Result<Event, ApiError> {
        self.execute(
            Method::POST,
            "/events",
            Some(serde_json::to_value(request)?),
        )
        .await
    }

    pub async fn update_event(
        &self,
        event_id: &str,
        request: &UpdateEventRequest,
    ) -> Result<Event, ApiError> {
        let path = format!("/events/{event_id}");
        self.execute(Method::PUT, &path, Some(serde_json::to_value(request)?))
            .await
    }

    pub async fn cancel_event(&self, event_id: &str) -> Result<(), ApiError> {
        let path = format!("/events/{event_id}");
        self.execute_ack(Method::DELETE, &path, None).await
    }
}
