use super::Notification;
use serde::Deserialize;

///
/// Body of `GET notifications`
///
#[derive(Debug, Deserialize)]
pub struct NotificationsEnvelope {
    pub data: Vec<Notification>,
}
