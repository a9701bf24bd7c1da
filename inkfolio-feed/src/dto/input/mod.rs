mod activity_log_entry;
mod notification;
mod notifications_envelope;
mod timestamp;

pub use activity_log_entry::*;
pub use notification::*;
pub use notifications_envelope::*;
pub use timestamp::*;
