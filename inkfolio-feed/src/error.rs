use crate::api;
use session_auth::error::WrongUserTypeError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("notification not exist")]
    NotificationNotExist,

    #[error("validation error: page size {0} is not one of the allowed options")]
    InvalidPageSize(usize),

    #[error("validation error: unknown filter {0}")]
    InvalidFilter(String),

    #[error("feed closed")]
    FeedClosed,

    #[error("auth error: {0}")]
    Auth(#[from] WrongUserTypeError),

    #[error("api error: {0}")]
    Api(#[from] api::Error),
}
