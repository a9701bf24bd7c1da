//!
//! Notification feed engine of the Inkfolio dashboards.
//!
//! Notifications and the admin activity log are fetched from the platform
//! REST API, merged into one chronological feed, filtered by type and
//! paginated for display. Read state is changed optimistically and
//! confirmed with the server.
//!
//! [notification_feed::NotificationFeed] is the entry point for host views.
//!

pub mod api;
pub mod display;
pub mod dto;
pub mod error;
pub mod feed;
pub mod notification_feed;
pub mod service;

pub use session_auth::{AuthContext, UserType};
