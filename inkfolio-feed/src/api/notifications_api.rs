use super::Error;
use crate::dto::{
    input::{ActivityLogEntry, Notification},
    ItemId,
};
use async_trait::async_trait;
use session_auth::UserType;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsApi: Send + Sync {
    ///
    /// Fetch all notifications of the signed in user.
    /// `scope` restricts result to notifications addressed to given audience.
    ///
    async fn fetch_notifications(
        &self,
        scope: Option<UserType>,
    ) -> Result<Vec<Notification>, Error>;

    ///
    /// Mark single notification as read
    ///
    async fn mark_read(&self, id: &ItemId) -> Result<(), Error>;

    ///
    /// Mark every notification of the signed in user as read
    ///
    async fn mark_all_read(&self) -> Result<(), Error>;

    ///
    /// Fetch platform activity log. Only available for admins.
    ///
    async fn fetch_activity_log(&self, scope: UserType) -> Result<Vec<ActivityLogEntry>, Error>;
}
