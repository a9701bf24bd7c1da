mod activation_outcome;

pub use activation_outcome::*;
