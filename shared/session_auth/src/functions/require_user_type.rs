use crate::{error::WrongUserTypeError, AuthContext, UserType};

///
/// Validates that user is one of the allowed account kinds.
///
/// ### Errors
/// - [WrongUserTypeError] when user type is not in `allowed`
///
pub fn require_user_type(
    auth_context: &AuthContext,
    allowed: &[UserType],
) -> Result<(), WrongUserTypeError> {
    if allowed.contains(&auth_context.user_type) {
        return Ok(());
    }

    Err(WrongUserTypeError {
        actual: auth_context.user_type,
    })
}
