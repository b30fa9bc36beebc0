pub(crate) mod auth;
pub(crate) mod checkin;
pub(crate) mod events;
pub(crate) mod payments;
pub(crate) mod purchases;
pub(crate) mod system;
pub(crate) mod tickets;
