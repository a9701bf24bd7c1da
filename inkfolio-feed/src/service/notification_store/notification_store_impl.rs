use super::{
    FetchOutcome, MarkAllReadReport, MarkReadOutcome, NotificationStore, NotificationStoreConfig,
    OptimisticPolicy, StoreSnapshot,
};
use crate::{
    api::{self, NotificationsApi},
    dto::{
        input::{ActivityLogEntry, Notification},
        ItemId,
    },
    error::Error,
};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::{watch, Mutex};

pub struct NotificationStoreImpl {
    config: NotificationStoreConfig,
    api: Arc<dyn NotificationsApi>,
    state: Mutex<StoreState>,
    changes: watch::Sender<u64>,
    /// kept outside of `state` so a cancelled fetch can release it on drop
    fetches_in_flight: AtomicUsize,
}

#[derive(Default)]
struct StoreState {
    notifications: Vec<Notification>,
    activities: Vec<ActivityLogEntry>,
    error: Option<String>,

    /// sequence number of the most recently started fetch
    latest_fetch: u64,
    /// bumped by every optimistic update and rollback
    revision: u64,
    /// bumped every time a fetch replaces the content
    generation: u64,

    closed: bool,
}

impl NotificationStoreImpl {
    pub fn new(config: NotificationStoreConfig, api: Arc<dyn NotificationsApi>) -> Self {
        let (changes, _) = watch::channel(0);

        Self {
            config,
            api,
            state: Mutex::new(StoreState::default()),
            changes,
            fetches_in_flight: AtomicUsize::new(0),
        }
    }

    fn notify_change(&self) {
        self.changes.send_modify(|version| *version = version.wrapping_add(1));
    }

    async fn fetch_remote(
        &self,
    ) -> Result<(Vec<Notification>, Vec<ActivityLogEntry>), api::Error> {
        match self.config.activity_log_scope {
            Some(activity_log_scope) => {
                let (notifications, activities) = tokio::join!(
                    self.api.fetch_notifications(self.config.scope),
                    self.api.fetch_activity_log(activity_log_scope),
                );

                Ok((notifications?, activities?))
            }
            None => {
                let notifications = self.api.fetch_notifications(self.config.scope).await?;

                Ok((notifications, Vec::new()))
            }
        }
    }

    ///
    /// Reverts optimistic read flags of `ids`.
    ///
    /// Skipped when a fetch replaced the content in the meantime,
    /// server state is newer than what is being reverted.
    ///
    async fn rollback(&self, generation: u64, ids: &[ItemId]) {
        if self.config.optimistic_policy != OptimisticPolicy::Rollback || ids.is_empty() {
            return;
        }

        let mut state = self.state.lock().await;
        if state.closed || state.generation != generation {
            tracing::debug!("content replaced since optimistic update, rollback skipped");
            return;
        }

        state
            .notifications
            .iter_mut()
            .filter(|notification| ids.contains(&notification.id))
            .for_each(|notification| notification.read = false);
        state.revision += 1;
        drop(state);

        tracing::info!(count = ids.len(), "rolled back optimistic read state");
        self.notify_change();
    }
}

///
/// Marks a fetch as in flight until dropped,
/// also when the fetch future is dropped before it completes.
///
struct InFlightFetch<'a> {
    store: &'a NotificationStoreImpl,
}

impl<'a> InFlightFetch<'a> {
    fn start(store: &'a NotificationStoreImpl) -> Self {
        store.fetches_in_flight.fetch_add(1, Ordering::SeqCst);
        Self { store }
    }
}

impl Drop for InFlightFetch<'_> {
    fn drop(&mut self) {
        self.store.fetches_in_flight.fetch_sub(1, Ordering::SeqCst);
        self.store.notify_change();
    }
}

#[async_trait]
impl NotificationStore for NotificationStoreImpl {
    #[tracing::instrument(name = "Fetch notifications", skip_all)]
    async fn fetch(&self) -> FetchOutcome {
        let (in_flight, sequence, revision) = {
            let mut state = self.state.lock().await;
            if state.closed {
                return FetchOutcome::Closed;
            }

            state.latest_fetch += 1;
            (InFlightFetch::start(self), state.latest_fetch, state.revision)
        };
        self.notify_change();
        tracing::debug!(sequence, "fetching notifications");

        let result = self.fetch_remote().await;

        let mut state = self.state.lock().await;
        if state.closed {
            tracing::debug!(sequence, "store closed, response dropped");
            return FetchOutcome::Closed;
        }

        let outcome = if sequence != state.latest_fetch || revision != state.revision {
            tracing::debug!(sequence, "response superseded, dropped");
            FetchOutcome::Superseded
        } else {
            match result {
                Ok((notifications, activities)) => {
                    tracing::info!(
                        notifications = notifications.len(),
                        activities = activities.len(),
                        "fetched notifications"
                    );

                    let outcome = FetchOutcome::Applied {
                        notifications: notifications.len(),
                        activities: activities.len(),
                    };
                    state.notifications = notifications;
                    state.activities = activities;
                    state.error = None;
                    state.generation += 1;
                    outcome
                }
                Err(err) => {
                    tracing::warn!(%err, "fetching notifications failed");
                    state.error = Some(format!("Failed to load notifications: {err}"));
                    FetchOutcome::Failed
                }
            }
        };
        drop(state);
        drop(in_flight);

        outcome
    }

    #[tracing::instrument(name = "Mark read", skip_all, fields(%id))]
    async fn mark_read(&self, id: &ItemId) -> Result<MarkReadOutcome, Error> {
        let generation = {
            let mut state = self.state.lock().await;
            if state.closed {
                return Err(Error::FeedClosed);
            }

            let notification = state
                .notifications
                .iter_mut()
                .find(|notification| notification.id == *id && self.config.admits(notification))
                .ok_or(Error::NotificationNotExist)?;

            if notification.read {
                tracing::debug!("notification already read");
                return Ok(MarkReadOutcome::AlreadyRead);
            }

            notification.read = true;
            state.revision += 1;
            state.generation
        };
        self.notify_change();

        match self.api.mark_read(id).await {
            Ok(()) => {
                tracing::info!("marked notification as read");
                Ok(MarkReadOutcome::Marked)
            }
            Err(err) => {
                tracing::warn!(%err, "marking notification as read failed");
                self.rollback(generation, std::slice::from_ref(id)).await;
                Err(Error::Api(err))
            }
        }
    }

    #[tracing::instrument(name = "Mark all read", skip_all)]
    async fn mark_all_read(&self) -> Result<MarkAllReadReport, Error> {
        let (generation, ids) = {
            let mut state = self.state.lock().await;
            if state.closed {
                return Err(Error::FeedClosed);
            }

            let ids = state
                .notifications
                .iter_mut()
                .filter(|notification| !notification.read && self.config.admits(notification))
                .map(|notification| {
                    notification.read = true;
                    notification.id.clone()
                })
                .collect::<Vec<_>>();

            if !ids.is_empty() {
                state.revision += 1;
            }
            (state.generation, ids)
        };
        if !ids.is_empty() {
            self.notify_change();
        }

        match self.api.mark_all_read().await {
            Ok(()) => {
                tracing::info!(marked = ids.len(), "marked all notifications as read");
                Ok(MarkAllReadReport { marked: ids.len() })
            }
            Err(err) => {
                tracing::warn!(%err, "marking all notifications as read failed");
                self.rollback(generation, &ids).await;
                Err(Error::Api(err))
            }
        }
    }

    async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock().await;

        StoreSnapshot {
            notifications: state
                .notifications
                .iter()
                .filter(|notification| self.config.admits(notification))
                .cloned()
                .collect(),
            activities: state.activities.clone(),
            loading: self.fetches_in_flight.load(Ordering::SeqCst) > 0,
            error: state.error.clone(),
        }
    }

    async fn close(&self) {
        let mut state = self.state.lock().await;
        state.closed = true;
        tracing::debug!("notification store closed");
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        api::MockNotificationsApi,
        dto::{input::Timestamp, NotificationKind, ScopeMatch},
    };
    use session_auth::UserType;
    use std::{collections::VecDeque, time::Duration};
    use tokio::sync::oneshot;

    fn notification(id: u64, read: bool, user_type: Option<UserType>) -> Notification {
        Notification {
            id: ItemId::from(id),
            title: Some(format!("title {id}")),
            message: format!("message {id}"),
            kind: Some(NotificationKind::Review),
            read,
            created_at: Timestamp::Missing,
            action_link: None,
            user_type,
        }
    }

    fn store(api: MockNotificationsApi, config: NotificationStoreConfig) -> NotificationStoreImpl {
        NotificationStoreImpl::new(config, Arc::new(api))
    }

    fn api_returning(notifications: Vec<Notification>) -> MockNotificationsApi {
        let mut api = MockNotificationsApi::new();
        api.expect_fetch_notifications()
            .returning(move |_| Ok(notifications.clone()));
        api
    }

    fn read_flags(snapshot: &StoreSnapshot) -> Vec<(String, bool)> {
        snapshot
            .notifications
            .iter()
            .map(|notification| (notification.id.to_string(), notification.read))
            .collect()
    }

    #[tokio::test]
    async fn fetch_replaces_content() {
        let mut api = MockNotificationsApi::new();
        let mut responses = VecDeque::from([
            vec![notification(1, false, None), notification(2, false, None)],
            vec![notification(3, true, None)],
        ]);
        api.expect_fetch_notifications()
            .times(2)
            .returning(move |_| Ok(responses.pop_front().unwrap()));
        let store = store(api, NotificationStoreConfig::default());

        let first = store.fetch().await;
        let second = store.fetch().await;

        assert_eq!(
            first,
            FetchOutcome::Applied {
                notifications: 2,
                activities: 0
            }
        );
        assert_eq!(
            second,
            FetchOutcome::Applied {
                notifications: 1,
                activities: 0
            }
        );
        let snapshot = store.snapshot().await;
        assert_eq!(read_flags(&snapshot), vec![("3".to_string(), true)]);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn fetch_passes_scope() {
        let mut api = MockNotificationsApi::new();
        api.expect_fetch_notifications()
            .withf(|scope| *scope == Some(UserType::Admin))
            .times(1)
            .returning(|_| Ok(vec![]));
        let store = store(
            api,
            NotificationStoreConfig {
                scope: Some(UserType::Admin),
                ..Default::default()
            },
        );

        let outcome = store.fetch().await;

        assert!(matches!(outcome, FetchOutcome::Applied { .. }));
    }

    #[tokio::test]
    async fn fetch_with_activity_log() {
        let mut api = MockNotificationsApi::new();
        api.expect_fetch_notifications()
            .returning(|_| Ok(vec![notification(1, false, Some(UserType::Admin))]));
        api.expect_fetch_activity_log()
            .withf(|scope| *scope == UserType::Admin)
            .returning(|_| {
                Ok(vec![ActivityLogEntry {
                    id: ItemId::from("a1"),
                    message: None,
                    action: Some("REVIEW_FLAGGED".to_string()),
                    created_at: Timestamp::Missing,
                }])
            });
        let store = store(
            api,
            NotificationStoreConfig {
                scope: Some(UserType::Admin),
                activity_log_scope: Some(UserType::Admin),
                ..Default::default()
            },
        );

        let outcome = store.fetch().await;

        assert_eq!(
            outcome,
            FetchOutcome::Applied {
                notifications: 1,
                activities: 1
            }
        );
        assert_eq!(store.snapshot().await.activities.len(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_keeps_previous_content() {
        let mut api = MockNotificationsApi::new();
        let mut calls = 0;
        api.expect_fetch_notifications().returning(move |_| {
            calls += 1;
            match calls {
                1 => Ok(vec![notification(1, false, None)]),
                _ => Err(api::Error::UnexpectedStatus(503)),
            }
        });
        let store = store(api, NotificationStoreConfig::default());

        store.fetch().await;
        let outcome = store.fetch().await;

        assert_eq!(outcome, FetchOutcome::Failed);
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.notifications.len(), 1);
        assert!(snapshot.error.unwrap().contains("503"));
    }

    #[tokio::test]
    async fn fetch_success_clears_error() {
        let mut api = MockNotificationsApi::new();
        let mut calls = 0;
        api.expect_fetch_notifications().returning(move |_| {
            calls += 1;
            match calls {
                1 => Err(api::Error::UnexpectedStatus(500)),
                _ => Ok(vec![]),
            }
        });
        let store = store(api, NotificationStoreConfig::default());

        store.fetch().await;
        assert!(store.snapshot().await.error.is_some());
        store.fetch().await;

        assert!(store.snapshot().await.error.is_none());
    }

    #[tokio::test]
    async fn fetch_activity_failure_keeps_everything() {
        let mut api = MockNotificationsApi::new();
        api.expect_fetch_notifications()
            .returning(|_| Ok(vec![notification(1, false, Some(UserType::Admin))]));
        api.expect_fetch_activity_log()
            .returning(|_| Err(api::Error::UnexpectedStatus(500)));
        let store = store(
            api,
            NotificationStoreConfig {
                scope: Some(UserType::Admin),
                activity_log_scope: Some(UserType::Admin),
                ..Default::default()
            },
        );

        let outcome = store.fetch().await;

        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(store.snapshot().await.notifications.is_empty());
    }

    #[tokio::test]
    async fn snapshot_filters_scope() {
        let api = api_returning(vec![
            notification(1, false, Some(UserType::Admin)),
            notification(2, false, Some(UserType::Artist)),
            notification(3, false, None),
        ]);
        let store = store(
            api,
            NotificationStoreConfig {
                scope: Some(UserType::Admin),
                ..Default::default()
            },
        );

        store.fetch().await;

        let snapshot = store.snapshot().await;
        assert_eq!(read_flags(&snapshot), vec![("1".to_string(), false)]);
    }

    #[tokio::test]
    async fn snapshot_includes_untagged_when_configured() {
        let api = api_returning(vec![
            notification(1, false, Some(UserType::Artist)),
            notification(2, false, Some(UserType::Client)),
            notification(3, false, None),
        ]);
        let store = store(
            api,
            NotificationStoreConfig {
                scope: Some(UserType::Artist),
                scope_match: ScopeMatch::IncludeUntagged,
                ..Default::default()
            },
        );

        store.fetch().await;

        let snapshot = store.snapshot().await;
        assert_eq!(
            read_flags(&snapshot),
            vec![("1".to_string(), false), ("3".to_string(), false)]
        );
    }

    #[tokio::test]
    async fn mark_read_ok() {
        let mut api = api_returning(vec![notification(1, false, None)]);
        api.expect_mark_read()
            .withf(|id| id.as_str() == "1")
            .times(1)
            .returning(|_| Ok(()));
        let store = store(api, NotificationStoreConfig::default());
        store.fetch().await;

        let outcome = store.mark_read(&ItemId::from(1_u64)).await;

        assert!(matches!(outcome, Ok(MarkReadOutcome::Marked)));
        assert_eq!(
            read_flags(&store.snapshot().await),
            vec![("1".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn mark_read_already_read_no_request() {
        let mut api = api_returning(vec![notification(1, true, None)]);
        api.expect_mark_read().never();
        let store = store(api, NotificationStoreConfig::default());
        store.fetch().await;

        let first = store.mark_read(&ItemId::from(1_u64)).await;
        let second = store.mark_read(&ItemId::from(1_u64)).await;

        assert!(matches!(first, Ok(MarkReadOutcome::AlreadyRead)));
        assert!(matches!(second, Ok(MarkReadOutcome::AlreadyRead)));
        assert_eq!(
            read_flags(&store.snapshot().await),
            vec![("1".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn mark_read_twice_single_request() {
        let mut api = api_returning(vec![notification(1, false, None)]);
        api.expect_mark_read().times(1).returning(|_| Ok(()));
        let store = store(api, NotificationStoreConfig::default());
        store.fetch().await;

        let first = store.mark_read(&ItemId::from(1_u64)).await;
        let second = store.mark_read(&ItemId::from(1_u64)).await;

        assert!(matches!(first, Ok(MarkReadOutcome::Marked)));
        assert!(matches!(second, Ok(MarkReadOutcome::AlreadyRead)));
        assert_eq!(
            read_flags(&store.snapshot().await),
            vec![("1".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn mark_read_not_exist() {
        let mut api = api_returning(vec![notification(1, false, None)]);
        api.expect_mark_read().never();
        let store = store(api, NotificationStoreConfig::default());
        store.fetch().await;

        let outcome = store.mark_read(&ItemId::from(2_u64)).await;

        assert!(matches!(outcome, Err(Error::NotificationNotExist)));
    }

    #[tokio::test]
    async fn mark_read_outside_scope() {
        let mut api = api_returning(vec![notification(1, false, Some(UserType::Client))]);
        api.expect_mark_read().never();
        let store = store(
            api,
            NotificationStoreConfig {
                scope: Some(UserType::Admin),
                ..Default::default()
            },
        );
        store.fetch().await;

        let outcome = store.mark_read(&ItemId::from(1_u64)).await;

        assert!(matches!(outcome, Err(Error::NotificationNotExist)));
    }

    #[tokio::test]
    async fn mark_read_failure_rolls_back() {
        let mut api = api_returning(vec![notification(1, false, None)]);
        api.expect_mark_read()
            .returning(|_| Err(api::Error::UnexpectedStatus(500)));
        let store = store(api, NotificationStoreConfig::default());
        store.fetch().await;

        let outcome = store.mark_read(&ItemId::from(1_u64)).await;

        assert!(matches!(outcome, Err(Error::Api(_))));
        assert_eq!(
            read_flags(&store.snapshot().await),
            vec![("1".to_string(), false)]
        );
    }

    #[tokio::test]
    async fn mark_read_failure_keeps_optimistic_state() {
        let mut api = api_returning(vec![notification(1, false, None)]);
        api.expect_mark_read()
            .returning(|_| Err(api::Error::UnexpectedStatus(500)));
        let store = store(
            api,
            NotificationStoreConfig {
                optimistic_policy: OptimisticPolicy::Keep,
                ..Default::default()
            },
        );
        store.fetch().await;

        let outcome = store.mark_read(&ItemId::from(1_u64)).await;

        assert!(matches!(outcome, Err(Error::Api(_))));
        assert_eq!(
            read_flags(&store.snapshot().await),
            vec![("1".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn mark_all_read_ok() {
        let mut api = api_returning(vec![
            notification(1, false, Some(UserType::Admin)),
            notification(2, true, Some(UserType::Admin)),
            notification(3, false, Some(UserType::Admin)),
            notification(4, false, Some(UserType::Artist)),
        ]);
        api.expect_mark_all_read().times(1).returning(|| Ok(()));
        let store = store(
            api,
            NotificationStoreConfig {
                scope: Some(UserType::Admin),
                ..Default::default()
            },
        );
        store.fetch().await;

        let report = store.mark_all_read().await.unwrap();

        assert_eq!(report.marked, 2);
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.notifications.len(), 3);
        assert!(snapshot
            .notifications
            .iter()
            .all(|notification| notification.read));
        let state = store.state.lock().await;
        let out_of_scope = state
            .notifications
            .iter()
            .find(|notification| notification.id == ItemId::from(4_u64))
            .unwrap();
        assert!(!out_of_scope.read);
    }

    #[tokio::test]
    async fn mark_all_read_nothing_unread_still_requests() {
        let mut api = api_returning(vec![notification(1, true, None)]);
        api.expect_mark_all_read().times(1).returning(|| Ok(()));
        let store = store(api, NotificationStoreConfig::default());
        store.fetch().await;

        let report = store.mark_all_read().await.unwrap();

        assert_eq!(report.marked, 0);
    }

    #[tokio::test]
    async fn mark_all_read_failure_rolls_back_only_changed() {
        let mut api = api_returning(vec![
            notification(1, false, None),
            notification(2, true, None),
        ]);
        api.expect_mark_all_read()
            .returning(|| Err(api::Error::UnexpectedStatus(502)));
        let store = store(api, NotificationStoreConfig::default());
        store.fetch().await;

        let result = store.mark_all_read().await;

        assert!(matches!(result, Err(Error::Api(_))));
        assert_eq!(
            read_flags(&store.snapshot().await),
            vec![("1".to_string(), false), ("2".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn closed_store_rejects_everything() {
        let mut api = MockNotificationsApi::new();
        api.expect_fetch_notifications().never();
        api.expect_mark_all_read().never();
        let store = store(api, NotificationStoreConfig::default());

        store.close().await;

        assert_eq!(store.fetch().await, FetchOutcome::Closed);
        assert!(matches!(
            store.mark_all_read().await,
            Err(Error::FeedClosed)
        ));
        assert!(matches!(
            store.mark_read(&ItemId::from(1_u64)).await,
            Err(Error::FeedClosed)
        ));
    }

    #[tokio::test]
    async fn subscribe_notified_on_fetch() {
        let api = api_returning(vec![notification(1, false, None)]);
        let store = store(api, NotificationStoreConfig::default());
        let mut changes = store.subscribe();

        store.fetch().await;

        assert!(changes.has_changed().unwrap());
        changes.borrow_and_update();
        assert!(!changes.has_changed().unwrap());
    }

    ///
    /// Api whose fetch responses are released manually by the test
    ///
    struct GatedApi {
        responses: std::sync::Mutex<VecDeque<oneshot::Receiver<Vec<Notification>>>>,
        mark_read_calls: AtomicUsize,
        mark_read_fails: bool,
    }

    impl GatedApi {
        fn new(count: usize, mark_read_fails: bool) -> (Arc<Self>, Vec<oneshot::Sender<Vec<Notification>>>) {
            let (senders, receivers): (Vec<_>, VecDeque<_>) =
                (0..count).map(|_| oneshot::channel()).unzip();

            let api = Self {
                responses: std::sync::Mutex::new(receivers),
                mark_read_calls: AtomicUsize::new(0),
                mark_read_fails,
            };

            (Arc::new(api), senders)
        }
    }

    #[async_trait]
    impl NotificationsApi for GatedApi {
        async fn fetch_notifications(
            &self,
            _: Option<UserType>,
        ) -> Result<Vec<Notification>, api::Error> {
            let response = self.responses.lock().unwrap().pop_front().unwrap();

            response
                .await
                .map_err(|_| api::Error::UnexpectedStatus(499))
        }

        async fn mark_read(&self, _: &ItemId) -> Result<(), api::Error> {
            self.mark_read_calls.fetch_add(1, Ordering::SeqCst);
            match self.mark_read_fails {
                true => Err(api::Error::UnexpectedStatus(500)),
                false => Ok(()),
            }
        }

        async fn mark_all_read(&self) -> Result<(), api::Error> {
            Ok(())
        }

        async fn fetch_activity_log(
            &self,
            _: UserType,
        ) -> Result<Vec<ActivityLogEntry>, api::Error> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn fetch_superseded_by_newer_fetch() {
        let (api, mut senders) = GatedApi::new(2, false);
        let store = Arc::new(NotificationStoreImpl::new(
            NotificationStoreConfig::default(),
            api,
        ));

        let slow = tokio::spawn({
            let store = store.clone();
            async move { store.fetch().await }
        });
        tokio::task::yield_now().await;
        let fast = tokio::spawn({
            let store = store.clone();
            async move { store.fetch().await }
        });
        tokio::task::yield_now().await;
        assert!(store.snapshot().await.loading);

        let slow_sender = senders.remove(0);
        let fast_sender = senders.remove(0);
        fast_sender.send(vec![notification(2, false, None)]).unwrap();
        let fast_outcome = fast.await.unwrap();
        slow_sender.send(vec![notification(1, false, None)]).unwrap();
        let slow_outcome = slow.await.unwrap();

        assert!(matches!(fast_outcome, FetchOutcome::Applied { .. }));
        assert_eq!(slow_outcome, FetchOutcome::Superseded);
        let snapshot = store.snapshot().await;
        assert_eq!(read_flags(&snapshot), vec![("2".to_string(), false)]);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn fetch_superseded_by_optimistic_update() {
        let (api, mut senders) = GatedApi::new(2, false);
        let store = Arc::new(NotificationStoreImpl::new(
            NotificationStoreConfig::default(),
            api.clone(),
        ));
        senders
            .remove(0)
            .send(vec![notification(1, false, None)])
            .unwrap();
        store.fetch().await;

        let in_flight = tokio::spawn({
            let store = store.clone();
            async move { store.fetch().await }
        });
        tokio::task::yield_now().await;
        store.mark_read(&ItemId::from(1_u64)).await.unwrap();
        // response generated before the server saw mark_read
        senders
            .remove(0)
            .send(vec![notification(1, false, None)])
            .unwrap();
        let outcome = in_flight.await.unwrap();

        assert_eq!(outcome, FetchOutcome::Superseded);
        assert_eq!(api.mark_read_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            read_flags(&store.snapshot().await),
            vec![("1".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn rollback_skipped_after_refetch() {
        let (api, mut senders) = GatedApi::new(2, true);
        let store = Arc::new(NotificationStoreImpl::new(
            NotificationStoreConfig::default(),
            api,
        ));
        senders
            .remove(0)
            .send(vec![notification(1, false, None)])
            .unwrap();
        store.fetch().await;
        let generation = store.state.lock().await.generation;

        // server already reports notification as read
        senders
            .remove(0)
            .send(vec![notification(1, true, None)])
            .unwrap();
        store.fetch().await;
        store.rollback(generation, &[ItemId::from(1_u64)]).await;

        assert_eq!(
            read_flags(&store.snapshot().await),
            vec![("1".to_string(), true)]
        );
    }

    #[tokio::test]
    async fn response_after_close_is_dropped() {
        let (api, mut senders) = GatedApi::new(1, false);
        let store = Arc::new(NotificationStoreImpl::new(
            NotificationStoreConfig::default(),
            api,
        ));

        let in_flight = tokio::spawn({
            let store = store.clone();
            async move { store.fetch().await }
        });
        tokio::task::yield_now().await;
        store.close().await;
        senders
            .remove(0)
            .send(vec![notification(1, false, None)])
            .unwrap();

        assert_eq!(in_flight.await.unwrap(), FetchOutcome::Closed);
        assert!(store.snapshot().await.notifications.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_fetch_stops_loading() {
        let (api, _senders) = GatedApi::new(1, false);
        let store = NotificationStoreImpl::new(NotificationStoreConfig::default(), api);
        let changes = store.subscribe();

        let outcome = tokio::time::timeout(Duration::from_secs(1), store.fetch()).await;
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert!(outcome.is_err());
        assert!(!store.snapshot().await.loading);
        assert!(changes.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_fetch_does_not_block_next_fetch() {
        let (api, mut senders) = GatedApi::new(2, false);
        let store = NotificationStoreImpl::new(NotificationStoreConfig::default(), api);

        let cancelled = tokio::time::timeout(Duration::from_secs(1), store.fetch()).await;
        senders
            .remove(1)
            .send(vec![notification(1, false, None)])
            .unwrap();
        let outcome = store.fetch().await;

        assert!(cancelled.is_err());
        assert!(matches!(outcome, FetchOutcome::Applied { .. }));
        let snapshot = store.snapshot().await;
        assert!(!snapshot.loading);
        assert_eq!(read_flags(&snapshot), vec![("1".to_string(), false)]);
    }
}
