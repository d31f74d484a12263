use crate::error::ProtocolError;
use crate::parse::Reader;

/// Server stats as obtained by [crate::stats::StatsQuery::basic_stats].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicStats {
    /// Message of the day
    pub motd: String,
    /// Current world
    pub map: String,
    pub num_players: u32,
    pub max_players: u32,
    pub port: u16,
    pub ip: String,
}

impl BasicStats {
    /// Parse the body of a basic stat response.
    pub fn parse(data: &[u8]) -> Result<BasicStats, ProtocolError> {
        let mut reader: Reader = Reader::new(data);

        let motd: String = reader.get_string()?;
        // game type, always "SMP"
        reader.get_cstr()?;
        let map: String = reader.get_string()?;
        let num_players: u32 = reader.get_decimal()?;
        let max_players: u32 = reader.get_decimal()?;
        // the one little-endian integer in this protocol
        let port: u16 = reader.get_u16()?;
        let ip: String = reader.get_string()?;

        Ok(BasicStats {
            motd,
            map,
            num_players,
            max_players,
            port,
            ip,
        })
    }
}
