use gatepass_core::api::checkin::CheckinRequest;

use crate::cli_args::*;
use crate::modules::system::output::print_json;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_checkin(
    args: CheckinArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        CheckinCommand::Scan(args) => {
            let result = ctx
                .api
                .scan_ticket(&CheckinRequest {
                    qr_code: args.qr_code,
                })
                .await?;
            if result.already_checked_in {
                println!("Already checked in");
            } else {
                println!("Checked in");
            }
            print_json(&result.ticket)?;
        }
    }
    Ok(())
}
