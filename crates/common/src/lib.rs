//! Shared helpers for the inventory workspace: logging setup, data
//! directory bootstrap and the small response bodies every crate agrees on.

pub mod types;
pub mod utils;
pub mod env;
