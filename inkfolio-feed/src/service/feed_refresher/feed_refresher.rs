use crate::service::notification_store::{FetchOutcome, NotificationStore};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::Notify,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};

///
/// Re-fetches store content on a fixed period.
/// First tick happens one period after creation,
/// initial fetch is the responsibility of the caller.
///
pub struct FeedRefresher {
    store: Arc<dyn NotificationStore>,
    interval: Interval,
}

impl FeedRefresher {
    pub fn new(store: Arc<dyn NotificationStore>, period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { store, interval }
    }

    #[tracing::instrument(name = "Feed Refresher", skip_all)]
    pub async fn run(mut self, close_notify: Arc<Notify>) {
        tokio::select! {
            biased;

            _ = close_notify.notified() => {},

            _ = async { loop {
                self.interval.tick().await;
                tracing::debug!("refresh started");

                let outcome = self.store.fetch().await;
                tracing::debug!(?outcome, "refresh finished");

                if outcome == FetchOutcome::Closed {
                    break;
                }
            }} => {}
        }

        tracing::debug!("refresher stopped");
    }
}
