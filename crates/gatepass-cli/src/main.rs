use clap::Parser;
use std::io::{self, Write};
use std::sync::Arc;

use gatepass_client::{ApiClient, ApiError, CredentialStore, Credentials, MemoryStore};

mod cli_args;
mod cli_command;
mod modules;

use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::auth::{handle_login_command, handle_logout, handle_register_command, KeyringStore};
use crate::modules::system::{
    ensure_secure_addr, handle_config_command, load_config, save_config, CommandContext,
};
use tracing_subscriber::EnvFilter;

pub(crate) const DEFAULT_ADDR: &str = "https://127.0.0.1:4000/api";
pub(crate) const TOKEN_SESSION: &str = "session";
pub(crate) const TOKEN_MANUAL: &str = "manual";
const SERVER_URL_ENV: &str = "GATEPASS_SERVER_URL";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let mut config = load_config()?;

    let mut addr_arg = cli.addr.clone();
    if addr_arg.is_none() {
        addr_arg = std::env::var(SERVER_URL_ENV).ok();
    }
    let token_arg = cli.token.clone();
    let context_arg = cli.context.clone();
    let token_name_arg = cli.token_name.clone();
    let command = cli.command;

    match command {
        Command::Config(args) => {
            handle_config_command(args, &mut config)?;
            save_config(&config)?;
        }
        Command::Login(args) => {
            handle_login_command(args, addr_arg, context_arg, cli.insecure, &mut config).await?;
            save_config(&config)?;
        }
        Command::Register(args) => {
            handle_register_command(args, addr_arg, context_arg, cli.insecure, &mut config)
                .await?;
            save_config(&config)?;
        }
        Command::Logout(args) => {
            handle_logout(args, addr_arg, context_arg, cli.insecure, &mut config).await?;
            save_config(&config)?;
        }
        command => {
            let context_name = context_arg.or_else(|| config.current_context.clone());
            let context = context_name
                .as_deref()
                .and_then(|name| config.contexts.get(name))
                .cloned();
            let addr = addr_arg
                .or_else(|| context.as_ref().map(|ctx| ctx.addr.clone()))
                .unwrap_or_else(|| DEFAULT_ADDR.to_string());
            ensure_secure_addr(&addr, cli.insecure)?;

            let token_name = token_name_arg
                .or_else(|| context.as_ref().and_then(|ctx| ctx.current_token.clone()));

            let store: Arc<dyn CredentialStore> = match token_arg {
                // explicit token: no refresh possible, a 401 simply surfaces
                Some(token) => Arc::new(MemoryStore::with_credentials(Credentials::new(token))),
                None => {
                    let context_name = context_name
                        .clone()
                        .ok_or_else(|| anyhow::anyhow!("context not set; run `gatepass login`"))?;
                    let token_name = token_name
                        .clone()
                        .ok_or_else(|| anyhow::anyhow!("token name not set; run `gatepass login`"))?;
                    Arc::new(KeyringStore::new(context_name, token_name))
                }
            };
            let api = ApiClient::builder()
                .base_url(&addr)
                .accept_invalid_certs(cli.insecure)
                .store(store)
                .build()?;

            let mut ctx = CommandContext {
                api: &api,
                context_name,
                token_name,
                config: &mut config,
            };

            handle_command(command, &mut ctx)
                .await
                .map_err(login_hint)?;
            save_config(ctx.config)?;
        }
    }

    Ok(())
}

/// Session teardown is the CLI's "redirect to login".
fn login_hint(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<ApiError>() {
        Some(api_err) if api_err.is_session_expired() => {
            err.context("run `gatepass login` to start a new session")
        }
        _ => err,
    }
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .init();
    Ok(())
}

pub(crate) fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let password = rpassword::read_password()?;
    if password.trim().is_empty() {
        anyhow::bail!("password is required");
    }
    Ok(password)
}
