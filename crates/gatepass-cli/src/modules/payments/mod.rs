mod actions;
pub(crate) mod args;

pub(crate) use actions::handle_payment;
