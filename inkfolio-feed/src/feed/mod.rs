//!
//! Pure stages of the feed pipeline: merge, filter, paginate.
//!
//! Every stage derives a new view from its input,
//! none of them mutates what it was given.
//!

pub mod activity_merger;
pub mod filter_engine;
pub mod paginator;

pub use filter_engine::FeedFilter;
pub use paginator::{page_buttons, Page, Paginator, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
