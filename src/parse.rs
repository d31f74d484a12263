use std::io::{self, Cursor};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::error::ProtocolError;

/// A cursor over a response body.
///
/// Every getter advances past exactly the bytes it consumed and fails with
/// [ProtocolError::Truncated], leaving the cursor in place, instead of
/// reading past the end.
pub struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Reader {
            cursor: Cursor::new(data),
        }
    }

    /// Current offset into the body.
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn read<T>(
        &mut self,
        f: impl FnOnce(&mut Cursor<&'a [u8]>) -> io::Result<T>,
    ) -> Result<T, ProtocolError> {
        let start: usize = self.position();
        f(&mut self.cursor).map_err(|_| {
            // a short read leaves the cursor at the end
            self.cursor.set_position(start as u64);
            ProtocolError::Truncated(start)
        })
    }

    pub fn get_u8(&mut self) -> Result<u8, ProtocolError> {
        self.read(|c| c.read_u8())
    }

    pub fn get_u16(&mut self) -> Result<u16, ProtocolError> {
        self.read(|c| c.read_u16::<LittleEndian>())
    }

    pub fn get_i32(&mut self) -> Result<i32, ProtocolError> {
        self.read(|c| c.read_i32::<LittleEndian>())
    }

    pub fn get_u32_be(&mut self) -> Result<u32, ProtocolError> {
        self.read(|c| c.read_u32::<BigEndian>())
    }

    pub fn get_u64(&mut self) -> Result<u64, ProtocolError> {
        self.read(|c| c.read_u64::<LittleEndian>())
    }

    pub fn get_f32(&mut self) -> Result<f32, ProtocolError> {
        self.read(|c| c.read_f32::<LittleEndian>())
    }

    /// Get the raw bytes of a NUL-terminated field, without the terminator.
    ///
    /// Moves the cursor to the byte after the terminator.
    pub fn get_cstr(&mut self) -> Result<&'a [u8], ProtocolError> {
        let start: usize = self.position();
        let data: &'a [u8] = *self.cursor.get_ref();
        let rest: &'a [u8] = data.get(start..).unwrap_or_default();
        let len: usize = rest
            .iter()
            .position(|&c| c == 0)
            .ok_or(ProtocolError::UnterminatedString(start))?;
        self.cursor.set_position((start + len + 1) as u64);
        Ok(&rest[..len])
    }

    /// Get the value of a NUL-terminated UTF-8 string.
    pub fn get_string(&mut self) -> Result<String, ProtocolError> {
        Ok(std::str::from_utf8(self.get_cstr()?)?.to_string())
    }

    /// Get a NUL-terminated field holding a decimal number.
    pub fn get_decimal<T: std::str::FromStr>(&mut self) -> Result<T, ProtocolError> {
        let text: String = self.get_string()?;
        parse_decimal(&text)
    }

    /// Everything from the cursor to the end of the body.
    pub fn rest(&mut self) -> &'a [u8] {
        let data: &'a [u8] = *self.cursor.get_ref();
        let rest: &'a [u8] = data.get(self.position()..).unwrap_or_default();
        self.cursor.set_position(data.len() as u64);
        rest
    }
}

/// Parse decimal text as sent by the query protocol.
pub fn parse_decimal<T: std::str::FromStr>(text: &str) -> Result<T, ProtocolError> {
    text.trim()
        .parse::<T>()
        .map_err(|_| ProtocolError::InvalidNumber(text.to_string()))
}
