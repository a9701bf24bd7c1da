use super::{ActivationOutcome, Navigator, ReadTransition};
use crate::{
    dto::output::FeedItem,
    error::Error,
    service::notification_store::{MarkAllReadReport, MarkReadOutcome, NotificationStore},
};
use std::sync::Arc;

///
/// Translates user interaction with the feed into store mutations
/// and navigation
///
pub struct ReadStateController {
    store: Arc<dyn NotificationStore>,
    navigator: Arc<dyn Navigator>,
}

impl ReadStateController {
    pub fn new(store: Arc<dyn NotificationStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    ///
    /// Marks unread notification as read and follows its action link.
    ///
    /// Link is followed even when marking failed,
    /// the failure is returned in [ActivationOutcome::read_transition].
    ///
    #[tracing::instrument(name = "Activate item", skip_all, fields(id = %item.id))]
    pub async fn activate_item(&self, item: &FeedItem) -> ActivationOutcome {
        let read_transition = if !item.is_notification {
            ReadTransition::NotApplicable
        } else if item.read {
            ReadTransition::AlreadyRead
        } else {
            match self.store.mark_read(&item.id).await {
                Ok(MarkReadOutcome::Marked) => ReadTransition::Marked,
                Ok(MarkReadOutcome::AlreadyRead) => ReadTransition::AlreadyRead,
                Err(err) => {
                    tracing::warn!(%err, "could not mark activated notification as read");
                    ReadTransition::Failed(err)
                }
            }
        };

        if let Some(link) = &item.action_link {
            self.navigator.navigate(link);
        }

        ActivationOutcome {
            read_transition,
            navigated_to: item.action_link.clone(),
        }
    }

    ///
    /// Result is meant to be shown to the user as a toast
    ///
    /// ### Errors
    /// - every error of [NotificationStore::mark_all_read]
    ///
    pub async fn mark_all_read(&self) -> Result<MarkAllReadReport, Error> {
        self.store
            .mark_all_read()
            .await
            .inspect_err(|err| tracing::warn!(%err, "could not mark all notifications as read"))
    }
}
