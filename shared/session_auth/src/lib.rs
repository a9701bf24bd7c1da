//!
//! Session identity shared by every dashboard feed.
//!
//! The frontend keeps the signed session token it received at login.
//! Instead of reading "who am I" from ambient storage, hosts decode the
//! token once into an [AuthContext] and pass it explicitly to whatever
//! needs to know the current user.
//!

mod auth_context;
mod session_decoder;
mod user_type;

pub mod dto;
pub mod error;
pub mod functions;
pub mod util;

pub use auth_context::*;
pub use session_decoder::*;
pub use user_type::*;
