//! Ideafield Server
//!
//! Serves the idea board: a RocksDB-backed idea store behind a small REST
//! API, plus a WebSocket that streams the live bubble field simulation to
//! the single-page frontend.
//!
//! # Architecture
//!
//! - **Storage**: append-only idea records in RocksDB
//! - **Board**: the engine's `BubbleField` behind a lock, ticked ~60x/s
//! - **API**: list/create/get ideas, embedded frontend, WebSocket stream

pub mod api;
pub mod board;
pub mod error;
pub mod ideas;
pub mod storage;

pub use api::{build_router, serve, AppState};
pub use board::{Board, BoardMessage, BoardRuntime, TICK_INTERVAL};
pub use error::{Error, Result};
pub use ideas::StoredIdea;
pub use storage::Storage;
