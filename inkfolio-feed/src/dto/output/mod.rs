mod feed_item;
mod feed_view;
mod page_button;

pub use feed_item::*;
pub use feed_view::*;
pub use page_button::*;
