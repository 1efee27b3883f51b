//! Request handlers.
//!
//! - `http`: REST endpoints (collaboration workflow, chat history, health)
//! - `websocket`: per-connection event loop

mod http;
mod websocket;

pub use http::{
    accept_request, create_request, get_chat_history, health_check, list_received_requests,
    reject_request, send_chat_message,
};
pub use websocket::websocket_handler;
