use crate::dto::{input::Notification, ScopeMatch};
use session_auth::UserType;
use strum::{AsRefStr, EnumString};

///
/// What happens with an optimistic update when the server rejects it
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OptimisticPolicy {
    /// restore the previous read state
    #[default]
    Rollback,
    /// keep the optimistic state until the next fetch replaces it
    Keep,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationStoreConfig {
    pub scope: Option<UserType>,
    pub scope_match: ScopeMatch,
    /// fetch activity log of this audience next to notifications
    pub activity_log_scope: Option<UserType>,
    pub optimistic_policy: OptimisticPolicy,
}

impl NotificationStoreConfig {
    pub fn admits(&self, notification: &Notification) -> bool {
        notification.is_visible_to(self.scope, self.scope_match)
    }
}
