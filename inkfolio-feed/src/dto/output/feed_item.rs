use crate::{
    display,
    dto::{ItemId, NotificationKind},
};
use serde::Serialize;
use time::OffsetDateTime;

///
/// Normalized entry of the merged feed.
///
/// Either a notification or an activity log entry,
/// activity entries are always read and never carry a type.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: ItemId,
    pub is_notification: bool,
    pub title: Option<String>,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<NotificationKind>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub time: Option<OffsetDateTime>,
    pub read: bool,
    pub action_link: Option<String>,
}

impl FeedItem {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(display::DEFAULT_TITLE)
    }

    pub fn relative_time(&self, now: OffsetDateTime) -> String {
        match self.time {
            Some(time) => display::relative_time(time, now),
            None => display::UNKNOWN_TIME.to_string(),
        }
    }
}
