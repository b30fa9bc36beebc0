use gatepass_core::api::payments::{InitiatePaymentRequest, VerifyPaymentRequest};

use crate::cli_args::*;
use crate::modules::system::output::print_json;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_payment(
    args: PaymentArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        PaymentCommand::Initiate(args) => {
            let initiation = ctx
                .api
                .initiate_esewa_payment(&InitiatePaymentRequest {
                    purchase_id: args.purchase_id,
                })
                .await?;
            println!("Open the payment page to continue:");
            println!("{}", initiation.payment_url);
            println!("transaction: {}", initiation.transaction_id);
        }
        PaymentCommand::Verify(args) => {
            let verification = ctx
                .api
                .verify_esewa_payment(&VerifyPaymentRequest {
                    purchase_id: args.purchase_id,
                    transaction_id: args.transaction_id,
                    ref_id: args.ref_id,
                })
                .await?;
            print_json(&verification)?;
        }
    }
    Ok(())
}
