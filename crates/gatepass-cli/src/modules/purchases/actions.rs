use gatepass_core::api::purchases::CreatePurchaseRequest;

use crate::cli_args::*;
use crate::modules::system::output::print_json;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_purchase(
    args: PurchaseArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        PurchaseCommand::Create(args) => {
            let purchase = ctx
                .api
                .create_purchase(&CreatePurchaseRequest {
                    event_id: args.event_id,
                    quantity: args.quantity,
                })
                .await?;
            print_json(&purchase)?;
        }
        PurchaseCommand::List => {
            let purchases = ctx.api.purchases().await?;
            print_json(&purchases)?;
        }
        PurchaseCommand::Get(args) => {
            let purchase = ctx.api.purchase(&args.purchase_id).await?;
            print_json(&purchase)?;
        }
    }
    Ok(())
}
