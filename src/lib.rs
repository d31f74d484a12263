//! Pure Rust async clients for game server status queries over UDP:
//! the [Source A2S Query Protocol](https://developer.valvesoftware.com/wiki/Server_queries)
//! and the block-game [Query protocol](https://wiki.vg/Query).
pub mod a2s;
pub mod config;
pub mod error;
mod parse;
pub mod stats;
pub mod transport;

pub use config::QueryConfig;
pub use error::{HandshakeError, ProtocolError, QueryError};
