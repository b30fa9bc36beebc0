use gatepass_client::EventFilter;
use gatepass_core::api::events::{CreateEventRequest, EventStatus, UpdateEventRequest};

use super::format_table::print_event_table;
use crate::cli_args::*;
use crate::modules::system::output::print_json;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_event(
    args: EventArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        EventCommand::List(args) => {
            let filter = EventFilter {
                category: args.category,
                search: args.search,
                page: args.page,
                limit: args.limit,
            };
            let events = ctx.api.list_events(&filter).await?;
            if args.json {
                print_json(&events)?;
            } else {
                print_event_table(&events);
            }
        }
        EventCommand::Get(args) => {
            let event = ctx.api.event(&args.event_id).await?;
            print_json(&event)?;
        }
        EventCommand::Create(args) => {
            let event = ctx
                .api
                .create_event(&CreateEventRequest {
                    title: args.title,
                    description: args.description,
                    venue: args.venue,
                    category: args.category,
                    starts_at: args.starts_at,
                    ends_at: args.ends_at,
                    price: args.price,
                    capacity: args.capacity,
                })
                .await?;
            print_json(&event)?;
        }
        EventCommand::Update(args) => {
            let status = args.status.as_deref().map(parse_status).transpose()?;
            let event = ctx
                .api
                .update_event(
                    &args.event_id,
                    &UpdateEventRequest {
                        title: args.title,
                        description: args.description,
                        venue: args.venue,
                        category: args.category,
                        starts_at: args.starts_at,
                        ends_at: args.ends_at,
                        price: args.price,
                        capacity: args.capacity,
                        status,
                    },
                )
                .await?;
            print_json(&event)?;
        }
        EventCommand::Cancel(args) => {
            ctx.api.cancel_event(&args.event_id).await?;
            println!("Event cancelled");
        }
    }
    Ok(())
}

fn parse_status(value: &str) -> anyhow::Result<EventStatus> {
    match value {
        "draft" => Ok(EventStatus::Draft),
        "published" => Ok(EventStatus::Published),
        "cancelled" => Ok(EventStatus::Cancelled),
        "completed" => Ok(EventStatus::Completed),
        other => anyhow::bail!("unknown event status: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatepass_client::{ApiClient, CredentialStore, Credentials, MemoryStore};
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::sync::Arc;

    fn build_api(addr: &str) -> ApiClient {
        let store = Arc::new(MemoryStore::with_credentials(Credentials::new("token")));
        ApiClient::builder()
            .base_url(addr)
            .store(store as Arc<dyn CredentialStore>)
            .build()
            .expect("client")
    }

    fn event_body(id: &str, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "description": "desc",
            "venue": "Hall A",
            "startsAt": "2026-09-01T18:00:00Z",
            "price": 500.0,
            "capacity": 100,
            "ticketsSold": 12,
            "status": "published",
            "organizerId": "org-1"
        })
    }

    #[tokio::test]
    async fn list_passes_filters_through_the_query_string() {
        let mut server = Server::new_async().await;
        let list_mock = server
            .mock("GET", "/events")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("category".into(), "music".into()),
                Matcher::UrlEncoded("limit".into(), "5".into()),
            ]))
            .match_header("authorization", "Bearer token")
            .with_status(200)
            .with_body(
                json!({
                    "success": true,
                    "data": [event_body("ev-1", "Indie Night")]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let api = build_api(&server.url());
        let mut config = crate::modules::system::CliConfig::default();
        let mut ctx = CommandContext {
            api: &api,
            context_name: None,
            token_name: None,
            config: &mut config,
        };
        let args = EventArgs {
            command: EventCommand::List(EventListArgs {
                category: Some("music".to_string()),
                search: None,
                page: None,
                limit: Some(5),
                json: true,
            }),
        };

        handle_event(args, &mut ctx).await.expect("list ok");
        list_mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_sends_only_the_changed_fields() {
        let mut server = Server::new_async().await;
        let update_mock = server
            .mock("PUT", "/events/ev-2")
            .match_header("authorization", "Bearer token")
            .match_body(Matcher::Json(json!({
                "title": "Renamed",
                "status": "cancelled"
            })))
            .with_status(200)
            .with_body(
                json!({
                    "success": true,
                    "data": event_body("ev-2", "Renamed")
                })
                .to_string(),
            )
            .create_async()
            .await;

        let api = build_api(&server.url());
        let mut config = crate::modules::system::CliConfig::default();
        let mut ctx = CommandContext {
            api: &api,
            context_name: None,
            token_name: None,
            config: &mut config,
        };
        let args = EventArgs {
            command: EventCommand::Update(EventUpdateArgs {
                event_id: "ev-2".to_string(),
                title: Some("Renamed".to_string()),
                description: None,
                venue: None,
                category: None,
                starts_at: None,
                ends_at: None,
                price: None,
                capacity: None,
                status: Some("cancelled".to_string()),
            }),
        };

        handle_event(args, &mut ctx).await.expect("update ok");
        update_mock.assert_async().await;
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(parse_status("archived").is_err());
        assert_eq!(parse_status("published").unwrap(), EventStatus::Published);
    }
}
