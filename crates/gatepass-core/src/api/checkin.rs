use serde::{Deserialize, Serialize};

use crate::api::tickets::Ticket;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRequest {
    pub qr_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResult {
    pub ticket: Ticket,
    /// True when the ticket was already consumed; the scan is then a no-op
    /// on the server and staff see who checked in and when.
    #[serde(default)]
    pub already_checked_in: bool,
}
