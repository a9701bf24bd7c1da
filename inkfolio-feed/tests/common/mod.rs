#![allow(dead_code)]

use async_trait::async_trait;
use inkfolio_feed::{
    api::{self, NotificationsApi},
    dto::{
        input::{ActivityLogEntry, Notification},
        output::FeedItem,
        ItemId,
    },
    service::read_state_controller::Navigator,
    UserType,
};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

///
/// In memory notifications API.
/// Behaves like the real server: marking changes what the next fetch returns.
///
#[derive(Default)]
pub struct FakeNotificationsApi {
    notifications: Mutex<Vec<Notification>>,
    activities: Mutex<Vec<ActivityLogEntry>>,
    fail_mutations: AtomicBool,

    pub fetch_calls: AtomicUsize,
    pub mark_all_read_calls: AtomicUsize,
    pub mark_read_calls: Mutex<Vec<ItemId>>,
}

impl FakeNotificationsApi {
    pub fn with_notifications(notifications: Value) -> Self {
        let notifications = serde_json::from_value(notifications).unwrap();

        Self {
            notifications: Mutex::new(notifications),
            ..Default::default()
        }
    }

    pub fn set_activities(&self, activities: Value) {
        *self.activities.lock().unwrap() = serde_json::from_value(activities).unwrap();
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn marked_ids(&self) -> Vec<String> {
        self.mark_read_calls
            .lock()
            .unwrap()
            .iter()
            .map(ItemId::to_string)
            .collect()
    }

    pub fn server_read_state(&self, id: &str) -> Option<bool> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .find(|notification| notification.id.as_str() == id)
            .map(|notification| notification.read)
    }

    fn mutation_result(&self) -> Result<(), api::Error> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(api::Error::UnexpectedStatus(500));
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationsApi for FakeNotificationsApi {
    async fn fetch_notifications(
        &self,
        _scope: Option<UserType>,
    ) -> Result<Vec<Notification>, api::Error> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn mark_read(&self, id: &ItemId) -> Result<(), api::Error> {
        self.mark_read_calls.lock().unwrap().push(id.clone());
        self.mutation_result()?;

        self.notifications
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|notification| notification.id == *id)
            .for_each(|notification| notification.read = true);

        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), api::Error> {
        self.mark_all_read_calls.fetch_add(1, Ordering::SeqCst);
        self.mutation_result()?;

        self.notifications
            .lock()
            .unwrap()
            .iter_mut()
            .for_each(|notification| notification.read = true);

        Ok(())
    }

    async fn fetch_activity_log(
        &self,
        _scope: UserType,
    ) -> Result<Vec<ActivityLogEntry>, api::Error> {
        Ok(self.activities.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    links: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn links(&self) -> Vec<String> {
        self.links.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, link: &str) {
        self.links.lock().unwrap().push(link.to_string());
    }
}

pub fn item_ids(items: &[FeedItem]) -> Vec<String> {
    items.iter().map(|item| item.id.to_string()).collect()
}
