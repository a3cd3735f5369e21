//! Utility functions.

pub mod env;
pub mod format;

pub use format::{format_amount, format_distance, format_percent, format_quantity};
