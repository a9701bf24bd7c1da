use crate::UserType;
use std::{ops::Deref, sync::Arc};

///
/// Identity of the signed in user.
///
/// To make sure cloning does not take too long
/// all fields are stored in InnerAuthContext behind an Arc.
///
/// InnerAuthContext fields are accessible thanks to Deref trait.
///
#[derive(Debug, Clone)]
pub struct AuthContext {
    inner: Arc<InnerAuthContext>,
}

///
/// User information retrieved from the session token.
///
#[derive(Debug)]
pub struct InnerAuthContext {
    pub user_id: String,
    pub user_type: UserType,
}

impl AuthContext {
    pub fn new(user_id: impl Into<String>, user_type: UserType) -> Self {
        Self {
            inner: Arc::new(InnerAuthContext {
                user_id: user_id.into(),
                user_type,
            }),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}

impl Deref for AuthContext {
    type Target = InnerAuthContext;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
