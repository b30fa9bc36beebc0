use clap::{Args, Subcommand};

#[derive(Args)]
pub struct CheckinArgs {
    #[command(subcommand)]
    pub command: CheckinCommand,
}

#[derive(Subcommand)]
pub enum CheckinCommand {
    Scan(CheckinScanArgs),
}

#[derive(Args)]
pub struct CheckinScanArgs {
    pub qr_code: String,
}
