//! The GameSpot-style UDP query protocol spoken by block-game servers
//! (`enable-query=true`), see <https://wiki.vg/Query>.
pub mod basic;
pub mod full;
pub mod packet;
pub mod query;

pub use basic::BasicStats;
pub use full::FullStats;
pub use query::StatsQuery;
