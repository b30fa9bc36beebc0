use clap::{Args, Subcommand};

#[derive(Args)]
pub struct PurchaseArgs {
    #[command(subcommand)]
    pub command: PurchaseCommand,
}

#[derive(Subcommand)]
pub enum PurchaseCommand {
    Create(PurchaseCreateArgs),
    List,
    Get(PurchaseGetArgs),
}

#[derive(Args)]
pub struct PurchaseCreateArgs {
    pub event_id: String,
    #[arg(long, default_value_t = 1)]
    pub quantity: i64,
}

#[derive(Args)]
pub struct PurchaseGetArgs {
    pub purchase_id: String,
}
