//! Presence / Room レジストリの実装

pub mod presence;
pub mod room;

pub use presence::InMemoryPresenceRegistry;
pub use room::InMemoryRoomRegistry;
