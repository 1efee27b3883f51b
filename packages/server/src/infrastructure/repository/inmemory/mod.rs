//! InMemory Repository 実装

mod collaboration;
mod message;
mod user;

pub use collaboration::InMemoryCollaborationRequestRepository;
pub use message::InMemoryMessageStore;
pub use user::{InMemoryUserDirectory, UserSeedError};
