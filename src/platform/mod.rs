//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - URL query parameters (currency hand-off)
//! - The secondary room window and watching for its closure

pub mod query;
pub mod room;

pub use room::{ManualPortal, RoomError, RoomPortal, RoomSignal, RoomWatch, RoomWatcher};

#[cfg(target_arch = "wasm32")]
pub use room::BrowserPortal;
