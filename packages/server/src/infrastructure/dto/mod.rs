//! Data Transfer Objects (DTOs) for the Duet server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (closed tagged protocol)
//! - `http`: HTTP API request/response DTOs
//! - `seed`: user profile seed file entries

pub mod conversion;
pub mod http;
pub mod seed;
pub mod websocket;
