mod dto;
mod navigator;
mod read_state_controller;

pub use dto::*;
pub use navigator::*;
pub use read_state_controller::*;
