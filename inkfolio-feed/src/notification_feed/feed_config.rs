use crate::{
    dto::ScopeMatch,
    error::Error,
    feed::DEFAULT_PAGE_SIZE,
    service::notification_store::{NotificationStoreConfig, OptimisticPolicy},
};
use session_auth::{functions::require_user_type, AuthContext, UserType};
use std::time::Duration;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

///
/// Everything that differs between the admin overview
/// and the personal artist / client feeds
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// audience of notifications, `None` shows everything the API returned
    pub scope: Option<UserType>,
    pub scope_match: ScopeMatch,
    /// merge activity log of this audience into the feed
    pub activity_log_scope: Option<UserType>,
    pub page_size: usize,
    pub refresh_interval: Duration,
    pub optimistic_policy: OptimisticPolicy,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            scope: None,
            scope_match: ScopeMatch::default(),
            activity_log_scope: None,
            page_size: DEFAULT_PAGE_SIZE,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            optimistic_policy: OptimisticPolicy::default(),
        }
    }
}

impl FeedConfig {
    ///
    /// Notifications addressed to the user's own account kind.
    /// Untagged notifications were sent to this user directly and stay visible.
    ///
    pub fn personal(auth_context: &AuthContext) -> Self {
        Self {
            scope: Some(auth_context.user_type),
            scope_match: ScopeMatch::IncludeUntagged,
            ..Default::default()
        }
    }

    ///
    /// Admin notifications merged with the admin activity log
    ///
    /// ### Errors
    /// - [Error::Auth] when user is not an admin
    ///
    pub fn admin_overview(auth_context: &AuthContext) -> Result<Self, Error> {
        require_user_type(auth_context, &[UserType::Admin])?;

        Ok(Self {
            scope: Some(UserType::Admin),
            scope_match: ScopeMatch::Exact,
            activity_log_scope: Some(UserType::Admin),
            ..Default::default()
        })
    }

    pub fn for_auth_context(auth_context: &AuthContext) -> Self {
        match Self::admin_overview(auth_context) {
            Ok(config) => config,
            Err(_) => Self::personal(auth_context),
        }
    }

    pub fn store_config(&self) -> NotificationStoreConfig {
        NotificationStoreConfig {
            scope: self.scope,
            scope_match: self.scope_match,
            activity_log_scope: self.activity_log_scope,
            optimistic_policy: self.optimistic_policy,
        }
    }
}
