use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use gatepass_client::ApiClient;

#[derive(Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub current_context: Option<String>,
    #[serde(default)]
    pub contexts: HashMap<String, CliContext>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct CliContext {
    pub addr: String,
    #[serde(default)]
    pub tokens: HashMap<String, TokenEntry>,
    #[serde(default)]
    pub current_token: Option<String>,
}

/// Expiry is recorded for display only; renewal is driven by 401s inside
/// the client, not by this timestamp.
#[derive(Serialize, Deserialize, Clone)]
pub struct TokenEntry {
    pub access_expires_at: Option<String>,
}

pub struct CommandContext<'a> {
    pub api: &'a ApiClient,
    pub context_name: Option<String>,
    pub token_name: Option<String>,
    pub config: &'a mut CliConfig,
}
