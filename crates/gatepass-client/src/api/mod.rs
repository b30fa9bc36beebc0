//! Typed endpoint wrappers, one module per backend resource.

pub mod auth;
pub mod checkin;
pub mod events;
pub mod payments;
pub mod purchases;
pub mod tickets;
