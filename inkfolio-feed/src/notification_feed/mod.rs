mod feed_config;
mod notification_feed;

pub use feed_config::*;
pub use notification_feed::*;
