use super::FeedConfig;
use crate::{
    api::NotificationsApi,
    dto::output::{FeedItem, FeedView},
    error::Error,
    feed::{activity_merger, filter_engine, page_buttons, FeedFilter, Paginator},
    service::{
        feed_refresher::FeedRefresherHandle,
        notification_store::{
            FetchOutcome, MarkAllReadReport, NotificationStore, NotificationStoreImpl,
        },
        read_state_controller::{ActivationOutcome, Navigator, ReadStateController},
    },
};
use std::{sync::Arc, time::Duration};
use time::OffsetDateTime;
use tokio::sync::{watch, Mutex};

///
/// Notification feed of a single mounted view.
///
/// Store content goes through merge, filter and pagination every time
/// the view is requested, so the view always reflects the latest
/// notifications together with the current filter and page.
///
pub struct NotificationFeed {
    refresh_interval: Duration,
    store: Arc<dyn NotificationStore>,
    controller: ReadStateController,
    view_state: Mutex<ViewState>,
    lifecycle: Mutex<Lifecycle>,
}

struct ViewState {
    filter: FeedFilter,
    current_page: usize,
    paginator: Paginator,
}

enum Lifecycle {
    Created,
    Mounted(FeedRefresherHandle),
    Unmounted,
}

impl NotificationFeed {
    ///
    /// ### Errors
    /// - [Error::InvalidPageSize] when page size from config is not allowed
    ///
    pub fn new(
        config: FeedConfig,
        api: Arc<dyn NotificationsApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, Error> {
        let store = Arc::new(NotificationStoreImpl::new(config.store_config(), api));

        Self::with_store(config, store, navigator)
    }

    ///
    /// ### Errors
    /// - [Error::InvalidPageSize] when page size from config is not allowed
    ///
    pub fn with_store(
        config: FeedConfig,
        store: Arc<dyn NotificationStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, Error> {
        let paginator = Paginator::new(config.page_size)?;
        let controller = ReadStateController::new(store.clone(), navigator);

        Ok(Self {
            refresh_interval: config.refresh_interval,
            store,
            controller,
            view_state: Mutex::new(ViewState {
                filter: FeedFilter::All,
                current_page: 1,
                paginator,
            }),
            lifecycle: Mutex::new(Lifecycle::Created),
        })
    }

    ///
    /// Fetches notifications and starts periodic refresh
    ///
    /// ### Errors
    /// - [Error::FeedClosed] when feed was already unmounted
    ///
    #[tracing::instrument(name = "Mount feed", skip_all)]
    pub async fn mount(&self) -> Result<FetchOutcome, Error> {
        {
            let mut lifecycle = self.lifecycle.lock().await;
            match &*lifecycle {
                Lifecycle::Unmounted => return Err(Error::FeedClosed),
                Lifecycle::Mounted(_) => tracing::debug!("feed already mounted"),
                Lifecycle::Created => {
                    let refresher =
                        FeedRefresherHandle::spawn(self.store.clone(), self.refresh_interval);
                    tracing::info!(interval = ?self.refresh_interval, "feed mounted");
                    *lifecycle = Lifecycle::Mounted(refresher);
                }
            }
        }

        Ok(self.store.fetch().await)
    }

    ///
    /// Stops periodic refresh and closes the store.
    /// Nothing is fetched or updated afterwards.
    ///
    #[tracing::instrument(name = "Unmount feed", skip_all)]
    pub async fn unmount(&self) {
        let previous = {
            let mut lifecycle = self.lifecycle.lock().await;
            std::mem::replace(&mut *lifecycle, Lifecycle::Unmounted)
        };

        self.store.close().await;
        if let Lifecycle::Mounted(refresher) = previous {
            refresher.close().await;
        }

        tracing::info!("feed unmounted");
    }

    pub async fn refresh(&self) -> FetchOutcome {
        self.store.fetch().await
    }

    pub async fn view(&self) -> FeedView {
        self.view_at(OffsetDateTime::now_utc()).await
    }

    ///
    /// View with notifications missing `createdAt` placed at `now`
    ///
    pub async fn view_at(&self, now: OffsetDateTime) -> FeedView {
        self.update_view(now, |_, _| {}).await
    }

    ///
    /// Changes filter and goes back to the first page
    ///
    pub async fn set_filter(&self, filter: FeedFilter) -> FeedView {
        tracing::debug!(%filter, "filter changed");
        self.update_view(OffsetDateTime::now_utc(), |state, _| {
            state.filter = filter;
            state.current_page = 1;
        })
        .await
    }

    ///
    /// Page out of range is clamped to the nearest existing one
    ///
    pub async fn set_page(&self, page: usize) -> FeedView {
        self.update_view(OffsetDateTime::now_utc(), |state, _| {
            state.current_page = page;
        })
        .await
    }

    pub async fn next_page(&self) -> FeedView {
        self.update_view(OffsetDateTime::now_utc(), |state, feed| {
            let total_items = filter_engine::apply(feed, state.filter).len();
            state.current_page = state.paginator.next_page(total_items, state.current_page);
        })
        .await
    }

    pub async fn prev_page(&self) -> FeedView {
        self.update_view(OffsetDateTime::now_utc(), |state, feed| {
            let total_items = filter_engine::apply(feed, state.filter).len();
            state.current_page = state.paginator.prev_page(total_items, state.current_page);
        })
        .await
    }

    ///
    /// Changes page size and goes back to the first page
    ///
    /// ### Errors
    /// - [Error::InvalidPageSize] when page size is not one of the allowed options
    ///
    pub async fn set_page_size(&self, page_size: usize) -> Result<FeedView, Error> {
        let paginator = Paginator::new(page_size)?;

        let view = self
            .update_view(OffsetDateTime::now_utc(), |state, _| {
                state.paginator = paginator;
                state.current_page = 1;
            })
            .await;

        Ok(view)
    }

    pub async fn activate_item(&self, item: &FeedItem) -> ActivationOutcome {
        self.controller.activate_item(item).await
    }

    ///
    /// ### Errors
    /// - [Error::FeedClosed] when feed was unmounted
    /// - [Error::Api] when server rejected the change
    ///
    pub async fn mark_all_read(&self) -> Result<MarkAllReadReport, Error> {
        self.controller.mark_all_read().await
    }

    ///
    /// Notified whenever store content changes.
    /// Filter and page changes are returned directly by their methods.
    ///
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    async fn update_view(
        &self,
        now: OffsetDateTime,
        change: impl FnOnce(&mut ViewState, &[FeedItem]),
    ) -> FeedView {
        let snapshot = self.store.snapshot().await;
        let feed = activity_merger::merge(&snapshot.notifications, &snapshot.activities, now);
        let unread_count = snapshot
            .notifications
            .iter()
            .filter(|notification| !notification.read)
            .count();

        let mut state = self.view_state.lock().await;
        change(&mut *state, &feed);

        let filtered: &[FeedItem] = &filter_engine::apply(&feed, state.filter);
        let page = state.paginator.page(filtered, state.current_page);
        state.current_page = page.current_page;

        FeedView {
            items: page.items.to_vec(),
            total_items: page.total_items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            page_size: state.paginator.page_size(),
            filter_type: state.filter,
            page_buttons: page_buttons(page.current_page, page.total_pages),
            unread_count,
            loading: snapshot.loading,
            error: snapshot.error,
        }
    }
}
