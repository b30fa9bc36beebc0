pub mod auth;
pub mod checkin;
pub mod events;
pub mod payments;
pub mod purchases;
pub mod tickets;
pub mod users;
