mod dto;
mod notification_store;
mod notification_store_impl;

pub use dto::*;
pub use notification_store::*;
pub use notification_store_impl::*;
