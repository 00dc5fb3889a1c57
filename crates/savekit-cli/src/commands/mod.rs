//! Command implementations
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod bundle;
mod clear;
mod inspect;

pub use bundle::{Pack, Unpack};
pub use clear::{Clear, Delete};
pub use inspect::{Get, Keys, LastSave};
