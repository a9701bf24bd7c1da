mod require_user_type;

pub use require_user_type::*;
