use crate::error::ProtocolError;
use crate::parse::Reader;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PacketHeader {
    /// The whole response fits in this datagram.
    Single,
    /// One fragment of a response spread over several datagrams.
    Split,
}

/// Convert an i32 into a [PacketHeader].
impl TryFrom<i32> for PacketHeader {
    type Error = ProtocolError;

    fn try_from(value: i32) -> Result<PacketHeader, Self::Error> {
        match value {
            -1 => Ok(PacketHeader::Single),
            -2 => Ok(PacketHeader::Split),
            n => Err(ProtocolError::UnknownPacketHeader(n)),
        }
    }
}

/// For packing a [PacketHeader] into a packet in [RequestPacket::pack].
impl PacketHeader {
    pub fn to_le_bytes(&self) -> [u8; 4] {
        let type_value: i32 = match self {
            PacketHeader::Single => -1,
            PacketHeader::Split => -2,
        };
        type_value.to_le_bytes()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PacketType {
    /// A2S_INFO Request -- https://developer.valvesoftware.com/wiki/Server_queries#A2S_INFO
    InfoRequest,
    /// A2S_PLAYER Request -- https://developer.valvesoftware.com/wiki/Server_queries#A2S_PLAYER
    PlayerRequest,
    /// S2C_CHALLENGE
    ///
    /// the server may reply with a challenge to the client using S2C_CHALLENGE
    /// ('A' or 0x41). In that case, the client should repeat the request by appending the challenge number.
    Challenge,
    /// A2S_INFO Response, parsed by [crate::a2s::ServerInfo::parse].
    Info,
    /// A2S_PLAYER Response, parsed by [crate::a2s::PlayerInfo::parse].
    Players,
}

impl PacketType {
    pub fn to_byte(&self) -> u8 {
        match self {
            PacketType::InfoRequest => b'T',
            PacketType::PlayerRequest => b'U',
            PacketType::Challenge => b'A',
            PacketType::Info => b'I',
            PacketType::Players => b'D',
        }
    }
}

/// Sent in place of a challenge when the server has not issued one yet.
pub const NO_CHALLENGE: i32 = -1;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RequestPacket {
    packet_type: PacketType,
    body: Option<&'static str>,
}

impl RequestPacket {
    pub fn info() -> Self {
        RequestPacket {
            packet_type: PacketType::InfoRequest,
            body: Some("Source Engine Query"),
        }
    }

    pub fn players() -> Self {
        RequestPacket {
            packet_type: PacketType::PlayerRequest,
            body: None,
        }
    }

    /// Serializes the request with `challenge` appended.
    pub fn pack(&self, challenge: i32) -> Vec<u8> {
        // packet structure: header, type, body, terminator, challenge
        let mut payload: Vec<u8> = Vec::new();
        payload.extend_from_slice(&PacketHeader::Single.to_le_bytes());
        payload.push(self.packet_type.to_byte());
        if let Some(body) = self.body {
            payload.extend_from_slice(body.as_bytes());
            payload.push(0);
        }
        payload.extend_from_slice(&challenge.to_le_bytes());
        payload
    }
}

/// What a single datagram from the server turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub enum ResponsePacket<'a> {
    /// Server asks for the request again with this challenge appended.
    Challenge(i32),
    /// A complete response, or the last fragment of one.
    Single(&'a [u8]),
    /// A fragment with more to follow.
    Split(&'a [u8]),
}

impl<'a> ResponsePacket<'a> {
    /// Splits an incoming datagram into header and payload.
    ///
    /// `continuing` is set while fragments of a split response are
    /// buffered; the byte after the header is then payload, not a type tag.
    pub fn unpack(incoming: &'a [u8], continuing: bool) -> Result<Self, ProtocolError> {
        let mut reader: Reader<'a> = Reader::new(incoming);
        let packet_header: PacketHeader = reader.get_i32()?.try_into()?;

        match packet_header {
            PacketHeader::Single => {
                let payload: &'a [u8] = reader.rest();
                if !continuing && payload.first() == Some(&PacketType::Challenge.to_byte()) {
                    let mut reader: Reader<'a> = Reader::new(&payload[1..]);
                    return Ok(ResponsePacket::Challenge(reader.get_i32()?));
                }
                Ok(ResponsePacket::Single(payload))
            }
            PacketHeader::Split => Ok(ResponsePacket::Split(reader.rest())),
        }
    }
}
