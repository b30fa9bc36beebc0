use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::auth::args::*;
pub use crate::modules::checkin::args::*;
pub use crate::modules::events::args::*;
pub use crate::modules::payments::args::*;
pub use crate::modules::purchases::args::*;
pub use crate::modules::system::args::*;
pub use crate::modules::tickets::args::*;

#[derive(Parser)]
#[command(name = "gatepass")]
#[command(about = "Gatepass ticketing CLI")]
pub struct Cli {
    #[arg(long, env = "GATEPASS_ADDR")]
    pub addr: Option<String>,
    #[arg(long, env = "GATEPASS_TOKEN")]
    pub token: Option<String>,
    #[arg(long)]
    pub token_name: Option<String>,
    #[arg(long)]
    pub context: Option<String>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[arg(long, help = "Allow http:// and invalid TLS certificates")]
    pub insecure: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Login(LoginArgs),
    Register(RegisterArgs),
    Logout(LogoutArgs),
    Whoami,
    Config(ConfigArgs),
    Event(EventArgs),
    Ticket(TicketArgs),
    Purchase(PurchaseArgs),
    Payment(PaymentArgs),
    Checkin(CheckinArgs),
}
