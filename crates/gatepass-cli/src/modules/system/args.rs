use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    SetContext(SetContextArgs),
    UseContext(UseContextArgs),
    UseToken(UseTokenArgs),
    ListTokens(ListTokensArgs),
    RemoveToken(RemoveTokenArgs),
    CurrentContext,
    GetContexts,
}

#[derive(Args)]
pub struct SetContextArgs {
    pub name: String,
    #[arg(long)]
    pub addr: Option<String>,
    #[arg(long, help = "Store an access token for this context")]
    pub token: Option<String>,
    #[arg(long)]
    pub token_name: Option<String>,
}

#[derive(Args)]
pub struct UseContextArgs {
    pub name: String,
}

#[derive(Args)]
pub struct UseTokenArgs {
    pub name: String,
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Args)]
pub struct ListTokensArgs {
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Args)]
pub struct RemoveTokenArgs {
    pub name: String,
    #[arg(long)]
    pub context: Option<String>,
}
