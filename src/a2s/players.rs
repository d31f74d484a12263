use crate::a2s::packet::PacketType;
use crate::error::ProtocolError;
use crate::parse::Reader;

/// One entry of an A2S_PLAYER response.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Index of the player chunk
    pub index: u8,
    /// Display name
    pub name: String,
    /// Kills or points, depending on the game
    pub score: i32,
    /// Seconds connected
    pub duration: f32,
}

/// Player list as obtained by [crate::a2s::Query::players].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerInfo {
    pub players: Vec<Player>,
}

impl PlayerInfo {
    /// Parse a reassembled A2S_PLAYER response body.
    ///
    /// Reads exactly as many players as the body announces; anything after
    /// them is ignored.
    pub fn parse(data: &[u8]) -> Result<PlayerInfo, ProtocolError> {
        let mut reader: Reader = Reader::new(data);

        let header: u8 = reader.get_u8()?;
        if header != PacketType::Players.to_byte() {
            return Err(ProtocolError::UnexpectedPacketType {
                expected: PacketType::Players.to_byte(),
                found: header,
            });
        }

        let count: u8 = reader.get_u8()?;
        let mut players: Vec<Player> = Vec::with_capacity(count as usize);
        for _ in 0..count {
            players.push(Player {
                index: reader.get_u8()?,
                name: reader.get_string()?,
                score: reader.get_i32()?,
                duration: reader.get_f32()?,
            });
        }

        Ok(PlayerInfo { players })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
