use super::FeedRefresher;
use crate::service::notification_store::NotificationStore;
use std::{sync::Arc, time::Duration};
use tokio::{sync::Notify, task::JoinHandle};

///
/// Owns running [FeedRefresher] task.
///
/// Dropping the handle without [FeedRefresherHandle::close] aborts the task.
///
pub struct FeedRefresherHandle {
    close_notify: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl FeedRefresherHandle {
    pub fn spawn(store: Arc<dyn NotificationStore>, period: Duration) -> Self {
        let close_notify = Arc::new(Notify::new());
        let refresher = FeedRefresher::new(store, period);
        let task = tokio::spawn(refresher.run(close_notify.clone()));

        Self {
            close_notify,
            task: Some(task),
        }
    }

    ///
    /// Stops the timer and waits until the task finishes,
    /// fetch in progress is awaited
    ///
    pub async fn close(mut self) {
        self.close_notify.notify_one();

        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::warn!(%err, "refresher task failed");
            }
        }
    }
}

impl Drop for FeedRefresherHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
