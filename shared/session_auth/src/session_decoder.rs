use crate::{dto::Claims, error::SessionError, AuthContext, UserType};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::{str::FromStr, sync::Arc};

///
/// Decodes and validates session tokens issued at login.
///
#[derive(Clone)]
pub struct SessionDecoder {
    inner: Arc<SessionDecoderInner>,
}

struct SessionDecoderInner {
    key: DecodingKey,
    validation: Validation,
}

impl SessionDecoder {
    pub fn new(key: DecodingKey, algorithms: Vec<Algorithm>) -> Self {
        let mut validation = Validation::default();
        validation.algorithms = algorithms;

        let inner = SessionDecoderInner { key, validation };

        Self {
            inner: Arc::new(inner),
        }
    }

    ///
    /// Turns session token into [AuthContext].
    /// Token may be passed with or without `Bearer ` prefix.
    ///
    /// ### Errors
    /// - [SessionError::InvalidToken] when
    ///     - token is malformed
    ///     - signature is invalid
    ///     - token expired
    /// - [SessionError::UnknownUserType] when user_type claim is not recognized
    ///
    pub fn decode(&self, token: &str) -> Result<AuthContext, SessionError> {
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();

        let token_data =
            jsonwebtoken::decode::<Claims>(token, &self.inner.key, &self.inner.validation)
                .inspect_err(|err| tracing::warn!(%err, "session token rejected"))?;

        let Claims { sub, user_type, .. } = token_data.claims;
        let user_type = UserType::from_str(&user_type)
            .map_err(|_| SessionError::UnknownUserType(user_type))?;

        Ok(AuthContext::new(sub, user_type))
    }
}
