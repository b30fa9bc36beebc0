use crate::cli_args::*;
use crate::modules::system::output::print_json;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_ticket(
    args: TicketArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        TicketCommand::List => {
            let tickets = ctx.api.my_tickets().await?;
            print_json(&tickets)?;
        }
        TicketCommand::Get(args) => {
            let ticket = ctx.api.ticket(&args.ticket_id).await?;
            print_json(&ticket)?;
        }
        TicketCommand::Qr(args) => {
            // raw payload only, so it can be piped into a QR renderer
            let ticket = ctx.api.ticket(&args.ticket_id).await?;
            println!("{}", ticket.qr_code);
        }
    }
    Ok(())
}
