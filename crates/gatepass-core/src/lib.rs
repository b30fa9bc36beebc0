#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod constants;
pub mod envelope;

pub use crate::api::*;
pub use crate::constants::*;
pub use crate::envelope::*;
