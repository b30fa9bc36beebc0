use clap::{Args, Subcommand};

#[derive(Args)]
pub struct TicketArgs {
    #[command(subcommand)]
    pub command: TicketCommand,
}

#[derive(Subcommand)]
pub enum TicketCommand {
    List,
    Get(TicketGetArgs),
    Qr(TicketQrArgs),
}

#[derive(Args)]
pub struct TicketGetArgs {
    pub ticket_id: String,
}

#[derive(Args)]
pub struct TicketQrArgs {
    pub ticket_id: String,
}
