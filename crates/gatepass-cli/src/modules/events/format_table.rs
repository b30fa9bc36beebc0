use gatepass_core::api::events::Event;

pub(crate) fn print_event_table(events: &[Event]) {
    let mut rows = Vec::new();
    let mut id_width = "ID".len();
    let mut title_width = "TITLE".len();

    for event in events {
        let starts = event.starts_at.format("%Y-%m-%d %H:%M").to_string();
        let seats = format!("{}/{}", event.tickets_sold, event.capacity);
        let status = serde_json::to_value(event.status)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        id_width = id_width.max(event.id.len());
        title_width = title_width.max(event.title.len());
        rows.push((event.id.as_str(), event.title.as_str(), starts, seats, status));
    }

    println!(
        "{:<id_width$}  {:<title_width$}  {:<16}  {:>9}  STATUS",
        "ID",
        "TITLE",
        "STARTS",
        "SOLD/CAP",
        id_width = id_width,
        title_width = title_width
    );
    for (id, title, starts, seats, status) in rows {
        println!(
            "{:<id_width$}  {:<title_width$}  {:<16}  {:>9}  {}",
            id,
            title,
            starts,
            seats,
            status,
            id_width = id_width,
            title_width = title_width
        );
    }
}
