//! Utilities shared by the Duet server binary and its tests.

pub mod logger;
pub mod time;
