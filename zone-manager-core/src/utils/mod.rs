//! Utility module

pub mod datetime;
pub mod names;
pub mod serial;
