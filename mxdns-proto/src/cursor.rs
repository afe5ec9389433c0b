//! Bounds-checked reading from a raw DNS message buffer.
//!
//! A response buffer comes from a remote server and must be treated as
//! hostile: every length field in it may lie. [`MsgCursor`] therefore checks
//! each read against the remaining buffer and returns
//! [`ParseError::OffsetOverflow`] instead of ever reading out of bounds.

use crate::error::ParseError;

/// A cursor over a complete DNS message.
///
/// The cursor always wraps the *whole* message, not a single section, because
/// name compression pointers are absolute offsets into the message and the
/// cursor must be able to jump to them (see [`Name::parse()`](crate::Name::parse())).
///
/// # Examples
/// ```rust
/// use mxdns_proto::cursor::MsgCursor;
///
/// let mut msg = MsgCursor::new(b"\x00\x2a\x07");
/// assert_eq!(msg.read_u16().ok(), Some(42));
/// assert_eq!(msg.read_u8().ok(), Some(7));
/// assert!(msg.read_u8().is_err());
/// ```
#[derive(Debug)]
pub struct MsgCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> MsgCursor<'a> {
    /// Creates a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// The total length of the underlying message.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true iff the underlying message is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The number of bytes left between the current position and the end of
    /// the message.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Moves the read position to `pos`.
    ///
    /// `pos` may be equal to the message length (the position just past the
    /// last byte); anything beyond that is an error.
    pub fn set_position(&mut self, pos: usize) -> Result<(), ParseError> {
        if pos > self.buf.len() {
            return Err(ParseError::OffsetOverflow {
                offset: pos,
                wanted: 0,
                len: self.buf.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Consumes and returns the next `n` bytes.
    pub fn read_slice(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(ParseError::OffsetOverflow {
                offset: self.pos,
                wanted: n,
                len: self.buf.len(),
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Consumes and returns the next byte.
    pub fn read_u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.read_slice(1)?[0])
    }

    /// Consumes and returns the next two bytes as a big-endian integer.
    pub fn read_u16(&mut self) -> Result<u16, ParseError> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Consumes and returns the next four bytes as a big-endian integer.
    pub fn read_u32(&mut self) -> Result<u32, ParseError> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_big_endian() {
        let mut msg = MsgCursor::new(&[0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde]);
        assert_eq!(msg.read_u16().unwrap(), 0x1234);
        assert_eq!(msg.read_u32().unwrap(), 0x56789abc);
        assert_eq!(msg.read_u8().unwrap(), 0xde);
        assert_eq!(msg.remaining(), 0);
    }

    #[test]
    fn read_past_end_fails_without_consuming() {
        let mut msg = MsgCursor::new(&[0x01, 0x02]);
        assert_eq!(msg.read_u8().unwrap(), 0x01);
        assert!(matches!(
            msg.read_u32(),
            Err(ParseError::OffsetOverflow {
                offset: 1,
                wanted: 4,
                len: 2,
            })
        ));
        // the failed read must not have moved the position
        assert_eq!(msg.position(), 1);
        assert_eq!(msg.read_u8().unwrap(), 0x02);
    }

    #[test]
    fn set_position_is_checked() {
        let mut msg = MsgCursor::new(&[0x00; 4]);
        assert!(msg.set_position(4).is_ok());
        assert!(msg.set_position(5).is_err());
    }
}
