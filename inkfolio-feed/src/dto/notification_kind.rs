use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

///
/// Type tag of a notification, used by the feed filter
///
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    System,
    Review,
    Comment,
    Message,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::System,
        NotificationKind::Review,
        NotificationKind::Comment,
        NotificationKind::Message,
    ];
}
