//!
//! Module with all dtos that are passed between the notifications API,
//! the feed engine and the host view
//!

mod item_id;
mod lenient_tag;
mod notification_kind;
mod scope_match;

pub mod input;
pub mod output;

pub use item_id::*;
pub(crate) use lenient_tag::*;
pub use notification_kind::*;
pub use scope_match::*;
