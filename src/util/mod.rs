//! Small shared helpers: input parsing and command throttling.

pub mod parse;
pub mod throttle;
