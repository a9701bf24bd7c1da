use super::{FetchOutcome, MarkAllReadReport, MarkReadOutcome, StoreSnapshot};
use crate::{dto::ItemId, error::Error};
use async_trait::async_trait;
use tokio::sync::watch;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationStore: Send + Sync {
    ///
    /// Fetch notifications (and activity log when configured)
    /// and replace store content with the response.
    ///
    /// Failure never propagates, it is exposed in [StoreSnapshot::error]
    /// and previous content is kept.
    ///
    async fn fetch(&self) -> FetchOutcome;

    ///
    /// Optimistically mark notification as read and confirm it with the server
    ///
    /// ### Errors
    /// - [Error::NotificationNotExist] when
    ///     - notification with id is not in the store
    ///     - notification is outside of the store scope
    /// - [Error::FeedClosed] when store was closed
    /// - [Error::Api] when server rejected the change
    ///
    async fn mark_read(&self, id: &ItemId) -> Result<MarkReadOutcome, Error>;

    ///
    /// Optimistically mark every notification in scope as read
    /// and confirm it with the server
    ///
    /// ### Errors
    /// - [Error::FeedClosed] when store was closed
    /// - [Error::Api] when server rejected the change
    ///
    async fn mark_all_read(&self) -> Result<MarkAllReadReport, Error>;

    async fn snapshot(&self) -> StoreSnapshot;

    ///
    /// Stop accepting updates. Responses arriving later are dropped.
    ///
    async fn close(&self);

    ///
    /// Receiver is notified after every visible change of the store
    ///
    fn subscribe(&self) -> watch::Receiver<u64>;
}
