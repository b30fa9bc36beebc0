use crate::cli_args::*;
use crate::modules::checkin::handle_checkin;
use crate::modules::events::handle_event;
use crate::modules::payments::handle_payment;
use crate::modules::purchases::handle_purchase;
use crate::modules::system::output::print_json;
use crate::modules::system::CommandContext;
use crate::modules::tickets::handle_ticket;

pub(crate) async fn handle_command(
    command: Command,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    tracing::debug!(
        context = ctx.context_name.as_deref(),
        token = ctx.token_name.as_deref(),
        "dispatching command"
    );
    match command {
        Command::Whoami => {
            let profile = ctx.api.profile().await?;
            print_json(&profile)?;
        }
        Command::Event(args) => handle_event(args, ctx).await?,
        Command::Ticket(args) => handle_ticket(args, ctx).await?,
        Command::Purchase(args) => handle_purchase(args, ctx).await?,
        Command::Payment(args) => handle_payment(args, ctx).await?,
        Command::Checkin(args) => handle_checkin(args, ctx).await?,
        Command::Config(_) | Command::Login(_) | Command::Register(_) | Command::Logout(_) => {
            unreachable!()
        }
    }

    Ok(())
}
