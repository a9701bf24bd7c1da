use super::Timestamp;
use crate::dto::{de_lenient_tag, ItemId, MissingIdError, NotificationKind, ScopeMatch};
use serde::Deserialize;
use session_auth::UserType;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNotification")]
pub struct Notification {
    pub id: ItemId,
    pub title: Option<String>,
    pub message: String,
    pub kind: Option<NotificationKind>,
    pub read: bool,
    pub created_at: Timestamp,
    pub action_link: Option<String>,
    pub user_type: Option<UserType>,
}

impl Notification {
    ///
    /// Whether notification belongs to the feed of given audience.
    /// Feed without audience shows everything API returned,
    /// untagged notifications are decided by `scope_match`.
    ///
    pub fn is_visible_to(&self, scope: Option<UserType>, scope_match: ScopeMatch) -> bool {
        match (scope, self.user_type) {
            (None, _) => true,
            (Some(scope), Some(user_type)) => scope == user_type,
            (Some(_), None) => scope_match == ScopeMatch::IncludeUntagged,
        }
    }
}

///
/// Wire shape of a notification. `id` wins over the legacy `_id`
/// when API sends both.
///
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNotification {
    #[serde(default)]
    id: Option<ItemId>,
    #[serde(default, rename = "_id")]
    legacy_id: Option<ItemId>,
    #[serde(default)]
    title: Option<String>,
    message: String,
    #[serde(default, rename = "type", deserialize_with = "de_lenient_tag")]
    kind: Option<NotificationKind>,
    #[serde(default)]
    read: bool,
    #[serde(default)]
    created_at: Timestamp,
    #[serde(default)]
    action_link: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_tag")]
    user_type: Option<UserType>,
}

impl TryFrom<RawNotification> for Notification {
    type Error = MissingIdError;

    fn try_from(raw: RawNotification) -> Result<Self, Self::Error> {
        let id = raw.id.or(raw.legacy_id).ok_or(MissingIdError)?;

        Ok(Self {
            id,
            title: raw.title,
            message: raw.message,
            kind: raw.kind,
            read: raw.read,
            created_at: raw.created_at,
            action_link: raw.action_link,
            user_type: raw.user_type,
        })
    }
}
