pub mod feed_refresher;
pub mod notification_store;
pub mod read_state_controller;
