use crate::UserType;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("unknown user type: {0}")]
    UnknownUserType(String),
}

#[derive(Debug, thiserror::Error)]
#[error("wrong user type: {actual}")]
pub struct WrongUserTypeError {
    pub actual: UserType,
}
