//! Utility module - logging and time helpers

pub mod logger;
pub mod time;

pub use time::{parse_date, parse_time};
