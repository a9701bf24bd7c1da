mod fetch_outcome;
mod mark_outcome;
mod notification_store_config;
mod store_snapshot;

pub use fetch_outcome::*;
pub use mark_outcome::*;
pub use notification_store_config::*;
pub use store_snapshot::*;
