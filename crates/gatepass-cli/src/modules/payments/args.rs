use clap::{Args, Subcommand};

#[derive(Args)]
pub struct PaymentArgs {
    #[command(subcommand)]
    pub command: PaymentCommand,
}

#[derive(Subcommand)]
pub enum PaymentCommand {
    Initiate(PaymentInitiateArgs),
    Verify(PaymentVerifyArgs),
}

#[derive(Args)]
pub struct PaymentInitiateArgs {
    pub purchase_id: String,
}

#[derive(Args)]
pub struct PaymentVerifyArgs {
    pub purchase_id: String,
    #[arg(long)]
    pub transaction_id: String,
    #[arg(long)]
    pub ref_id: String,
}
