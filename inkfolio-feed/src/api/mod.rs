//!
//! REST boundary of the feed engine
//!

mod error;
mod http_notifications_api;
mod notifications_api;

pub use error::*;
pub use http_notifications_api::*;
pub use notifications_api::*;
