use crate::dto::{
    input::{ActivityLogEntry, Notification},
    output::FeedItem,
};
use time::OffsetDateTime;

///
/// Combines notifications with activity log entries into one feed
/// ordered from the newest to the oldest.
///
/// Sort is stable, items with equal time keep their input order
/// (notifications before activities). Items without a parsable time
/// are placed at the end.
///
pub fn merge(
    notifications: &[Notification],
    activities: &[ActivityLogEntry],
    now: OffsetDateTime,
) -> Vec<FeedItem> {
    let mut feed = notifications
        .iter()
        .map(|notification| notification_item(notification, now))
        .chain(activities.iter().map(|activity| activity_item(activity, now)))
        .collect::<Vec<_>>();

    // None orders below every Some, so reversed comparison puts it last
    feed.sort_by(|a, b| b.time.cmp(&a.time));

    feed
}

fn notification_item(notification: &Notification, now: OffsetDateTime) -> FeedItem {
    FeedItem {
        id: notification.id.clone(),
        is_notification: true,
        title: notification.title.clone(),
        message: notification.message.clone(),
        kind: notification.kind,
        time: notification.created_at.resolve(now),
        read: notification.read,
        action_link: notification.action_link.clone(),
    }
}

fn activity_item(activity: &ActivityLogEntry, now: OffsetDateTime) -> FeedItem {
    FeedItem {
        id: activity.id.clone(),
        is_notification: false,
        title: None,
        message: activity.display_message(),
        kind: None,
        time: activity.created_at.resolve(now),
        read: true,
        action_link: None,
    }
}
