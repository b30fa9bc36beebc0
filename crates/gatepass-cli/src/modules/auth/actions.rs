use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};

use gatepass_client::{ApiClient, CredentialStore};
use gatepass_core::api::auth::{LoginRequest, RegisterRequest, SessionTokens};

use super::keyring::KeyringStore;
use crate::cli_args::*;
use crate::modules::system::{ensure_secure_addr, CliConfig, CliContext, TokenEntry};
use crate::{prompt_password, DEFAULT_ADDR, TOKEN_SESSION};

pub(crate) async fn handle_login_command(
    args: LoginArgs,
    addr_arg: Option<String>,
    context_arg: Option<String>,
    allow_insecure: bool,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    let (context_name, addr) =
        resolve_target(args.context.clone(), addr_arg, context_arg, config)?;
    ensure_secure_addr(&addr, allow_insecure)?;

    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };

    let api = session_client(&addr, &context_name, allow_insecure)?;
    let tokens = api
        .login(&LoginRequest {
            email: args.email,
            password,
        })
        .await?;
    record_session(config, &context_name, &addr, &tokens);

    if let Some(expires_in) = tokens.expires_in {
        println!("Logged in (expires in {expires_in}s)");
    } else {
        println!("Logged in");
    }
    Ok(())
}

pub(crate) async fn handle_register_command(
    args: RegisterArgs,
    addr_arg: Option<String>,
    context_arg: Option<String>,
    allow_insecure: bool,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    let (context_name, addr) =
        resolve_target(args.context.clone(), addr_arg, context_arg, config)?;
    ensure_secure_addr(&addr, allow_insecure)?;

    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };

    let api = session_client(&addr, &context_name, allow_insecure)?;
    let tokens = api
        .register(&RegisterRequest {
            full_name: args.full_name,
            email: args.email,
            password,
        })
        .await?;
    record_session(config, &context_name, &addr, &tokens);

    println!("Registered and logged in");
    Ok(())
}

pub(crate) async fn handle_logout(
    args: LogoutArgs,
    addr_arg: Option<String>,
    context_arg: Option<String>,
    allow_insecure: bool,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    let context_name = args
        .context
        .or_else(|| context_arg.clone())
        .or_else(|| config.current_context.clone())
        .unwrap_or_else(|| "default".to_string());
    let Some(context) = config.contexts.get(&context_name).cloned() else {
        anyhow::bail!("context not found: {}", context_name);
    };
    let addr = addr_arg.unwrap_or(context.addr);
    ensure_secure_addr(&addr, allow_insecure)?;
    let token_name = args
        .token_name
        .or_else(|| context.current_token.clone())
        .ok_or_else(|| anyhow::anyhow!("token name not set"))?;
    if !context.tokens.contains_key(&token_name) {
        anyhow::bail!("token not found: {}", token_name);
    }

    let store = Arc::new(KeyringStore::new(context_name.clone(), token_name.clone()));
    let api = ApiClient::builder()
        .base_url(&addr)
        .accept_invalid_certs(allow_insecure)
        .store(store as Arc<dyn CredentialStore>)
        .build()?;
    // clears the keyring entries even when revocation fails
    let revoked = api.logout().await;

    let Some(context) = config.contexts.get_mut(&context_name) else {
        anyhow::bail!("context not found: {}", context_name);
    };
    context.tokens.remove(&token_name);
    if context.current_token.as_deref() == Some(&token_name) {
        context.current_token = None;
    }
    revoked?;

    println!("Logged out");
    Ok(())
}

fn resolve_target(
    command_context: Option<String>,
    addr_arg: Option<String>,
    context_arg: Option<String>,
    config: &CliConfig,
) -> anyhow::Result<(String, String)> {
    let context_name = command_context
        .or(context_arg)
        .or_else(|| config.current_context.clone())
        .unwrap_or_else(|| "default".to_string());
    let addr = addr_arg
        .or_else(|| {
            config
                .contexts
                .get(&context_name)
                .map(|ctx| ctx.addr.clone())
        })
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());
    Ok((context_name, addr))
}

fn session_client(
    addr: &str,
    context_name: &str,
    allow_insecure: bool,
) -> anyhow::Result<ApiClient> {
    let store = Arc::new(KeyringStore::new(context_name.to_string(), TOKEN_SESSION));
    Ok(ApiClient::builder()
        .base_url(addr)
        .accept_invalid_certs(allow_insecure)
        .store(store as Arc<dyn CredentialStore>)
        .build()?)
}

fn record_session(
    config: &mut CliConfig,
    context_name: &str,
    addr: &str,
    tokens: &SessionTokens,
) {
    let entry = config
        .contexts
        .entry(context_name.to_string())
        .or_insert_with(|| CliContext {
            addr: addr.to_string(),
            tokens: HashMap::new(),
            current_token: None,
        });
    entry.addr = addr.to_string();
    entry.tokens.insert(
        TOKEN_SESSION.to_string(),
        TokenEntry {
            access_expires_at: tokens
                .expires_in
                .map(|seconds| (Utc::now() + ChronoDuration::seconds(seconds)).to_rfc3339()),
        },
    );
    entry.current_token = Some(TOKEN_SESSION.to_string());
    config.current_context = Some(context_name.to_string());
}
