//! Real-time session layer for Duet.
//!
//! Presence tracking, room-scoped canvas broadcast, persisted direct messages
//! with best-effort push, and the collaboration-request workflow that hands out
//! room tokens.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
