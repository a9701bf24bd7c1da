use crate::dto::input::{ActivityLogEntry, Notification};

///
/// Copy of the store content at a point in time.
/// Notifications outside of the store scope are already left out.
///
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub notifications: Vec<Notification>,
    pub activities: Vec<ActivityLogEntry>,
    pub loading: bool,
    pub error: Option<String>,
}
