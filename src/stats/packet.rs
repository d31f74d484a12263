use crate::error::{HandshakeError, ProtocolError, QueryError};
use crate::parse::Reader;

/// Leading bytes of every query-protocol request.
pub const MAGIC: u16 = 0xFEFD;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PacketType {
    Handshake,
    Stat,
}

impl From<PacketType> for u8 {
    fn from(packet_type: PacketType) -> Self {
        match packet_type {
            PacketType::Handshake => 9,
            PacketType::Stat => 0,
        }
    }
}

/// Spread a 16-bit session id over the low nibble of each byte of a u32.
pub fn spread_session_id(session_id: u16) -> u32 {
    let sid: u32 = session_id as u32;
    (sid & 0xF000) << 12 | (sid & 0x0F00) << 8 | (sid & 0x00F0) << 4 | (sid & 0x000F)
}

/// Inverse of [spread_session_id] for values it produced.
pub fn unspread_session_id(spread: u32) -> u16 {
    ((spread >> 12) & 0xF000 | (spread >> 8) & 0x0F00 | (spread >> 4) & 0x00F0 | spread & 0x000F) as u16
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum StatsRequest {
    Handshake { session_id: u16 },
    Basic { session_id: u16, challenge_token: i32 },
    Full { session_id: u16, challenge_token: i32 },
}

impl StatsRequest {
    pub fn packet_type(&self) -> PacketType {
        match self {
            StatsRequest::Handshake { .. } => PacketType::Handshake,
            StatsRequest::Basic { .. } | StatsRequest::Full { .. } => PacketType::Stat,
        }
    }

    pub fn session_id(&self) -> u16 {
        match self {
            StatsRequest::Handshake { session_id }
            | StatsRequest::Basic { session_id, .. }
            | StatsRequest::Full { session_id, .. } => *session_id,
        }
    }

    /// Serializes the request; header integers are big-endian.
    pub fn pack(&self) -> Vec<u8> {
        let mut payload: Vec<u8> = Vec::with_capacity(15);
        payload.extend_from_slice(&MAGIC.to_be_bytes());
        payload.push(self.packet_type().into());
        payload.extend_from_slice(&spread_session_id(self.session_id()).to_be_bytes());
        match self {
            StatsRequest::Handshake { .. } => {}
            StatsRequest::Basic { challenge_token, .. } => {
                payload.extend_from_slice(&challenge_token.to_be_bytes());
            }
            StatsRequest::Full { challenge_token, .. } => {
                payload.extend_from_slice(&challenge_token.to_be_bytes());
                // four zero bytes ask for the full stat
                payload.extend_from_slice(&[0; 4]);
            }
        }
        payload
    }

    /// Check that `response` answers this request and return its body.
    pub fn check_response<'a>(&self, response: &'a [u8]) -> Result<&'a [u8], QueryError> {
        let mut reader: Reader<'a> = Reader::new(response);
        let found_type: u8 = reader.get_u8()?;
        let found_session: u32 = reader.get_u32_be()?;

        let expected_type: u8 = self.packet_type().into();
        if found_type != expected_type {
            return Err(HandshakeError::UnexpectedType {
                expected: expected_type,
                found: found_type,
            }
            .into());
        }
        if found_session != spread_session_id(self.session_id()) {
            return Err(HandshakeError::SessionMismatch {
                expected: self.session_id(),
                found: found_session,
            }
            .into());
        }
        Ok(reader.rest())
    }
}

/// Parse the NUL-padded decimal challenge token of a handshake response.
pub fn parse_challenge_token(body: &[u8]) -> Result<i32, QueryError> {
    let text: &str = std::str::from_utf8(body)
        .map_err(ProtocolError::from)?
        .trim_matches('\0');
    text.trim()
        .parse::<i32>()
        .map_err(|_| HandshakeError::InvalidChallengeToken(text.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreading_places_nibbles() {
        assert_eq!(spread_session_id(0x0001), 0x0000_0001);
        assert_eq!(spread_session_id(0x1234), 0x0102_0304);
        assert_eq!(spread_session_id(0xFFFF), 0x0F0F_0F0F);
    }

    #[test]
    fn every_session_id_round_trips() {
        for sid in 0..=u16::MAX {
            assert_eq!(unspread_session_id(spread_session_id(sid)), sid);
        }
    }

    #[test]
    fn handshake_request_layout() {
        let request = StatsRequest::Handshake { session_id: 0x1234 };
        assert_eq!(request.pack(), vec![0xFE, 0xFD, 9, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn full_request_has_trailing_zero() {
        let request = StatsRequest::Full {
            session_id: 1,
            challenge_token: -2,
        };
        assert_eq!(
            request.pack(),
            vec![0xFE, 0xFD, 0, 0, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFE, 0, 0, 0, 0]
        );
    }

    #[test]
    fn basic_request_carries_token() {
        let request = StatsRequest::Basic {
            session_id: 1,
            challenge_token: 9513307,
        };
        assert_eq!(
            request.pack(),
            vec![0xFE, 0xFD, 0, 0, 0, 0, 1, 0x00, 0x91, 0x29, 0x5B]
        );
    }

    #[test]
    fn response_header_must_echo_request() {
        let request = StatsRequest::Handshake { session_id: 0x1234 };
        let body = request
            .check_response(&[9, 0x01, 0x02, 0x03, 0x04, b'4', b'2', 0])
            .unwrap();
        assert_eq!(body, b"42\0");

        assert!(matches!(
            request.check_response(&[0, 0x01, 0x02, 0x03, 0x04]),
            Err(QueryError::Handshake(HandshakeError::UnexpectedType {
                expected: 9,
                found: 0
            }))
        ));
        assert!(matches!(
            request.check_response(&[9, 0, 0, 0, 2]),
            Err(QueryError::Handshake(HandshakeError::SessionMismatch {
                expected: 0x1234,
                found: 2
            }))
        ));
    }

    #[test]
    fn echo_with_stray_high_nibbles_is_rejected() {
        let request = StatsRequest::Handshake { session_id: 0x1234 };
        assert!(matches!(
            request.check_response(&[9, 0xF1, 0xF2, 0xF3, 0xF4, b'4', b'2', 0]),
            Err(QueryError::Handshake(HandshakeError::SessionMismatch {
                expected: 0x1234,
                found: 0xF1F2_F3F4
            }))
        ));
    }

    #[test]
    fn challenge_token_is_decimal_text() {
        assert_eq!(parse_challenge_token(b"9513307\0").unwrap(), 9513307);
        assert_eq!(parse_challenge_token(b"-12\0\0").unwrap(), -12);
        assert!(matches!(
            parse_challenge_token(b"abc\0"),
            Err(QueryError::Handshake(HandshakeError::InvalidChallengeToken(_)))
        ));
    }
}
