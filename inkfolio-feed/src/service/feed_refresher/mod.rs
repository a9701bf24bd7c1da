mod feed_refresher;
mod feed_refresher_handle;

pub use feed_refresher::*;
pub use feed_refresher_handle::*;
