mod actions;
pub(crate) mod args;
mod format_table;

pub(crate) use actions::handle_event;
