use super::{FeedItem, PageButton};
use crate::feed::FeedFilter;
use serde::Serialize;

///
/// Everything the host view needs to render the feed
///
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    /// items of the current page only
    pub items: Vec<FeedItem>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub filter_type: FeedFilter,
    pub page_buttons: Vec<PageButton>,
    pub unread_count: usize,
    pub loading: bool,
    pub error: Option<String>,
}
