//! The [Source server query protocol](https://developer.valvesoftware.com/wiki/Server_queries)
//! (A2S_INFO and A2S_PLAYER).
pub mod info;
pub mod packet;
pub mod players;
pub mod query;

pub use info::{ExtraDataFlags, ServerInfo};
pub use players::{Player, PlayerInfo};
pub use query::{query, Query};
