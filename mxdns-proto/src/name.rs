//! Definition and implementation of the [`Name`] type.

use std::collections::VecDeque;
use std::fmt::Display;
use std::io::Write;

use byteorder::WriteBytesExt;
use smartstring::SmartString;

use crate::cursor::MsgCursor;
use crate::error::{EncodeError, ParseError};

/// A DNS domain name.
///
/// Comparison is case-insensitive, since DNS names are (the wire encoding
/// preserves the case that was sent, and so does this type).
///
/// Note that the string representation omits the dot at the end of the name
/// that is sometimes seen. The only exception is the DNS root's name, which is
/// represented as `"."`.
#[derive(Eq, Clone, Debug)]
pub struct Name {
    // does not contain the root label, as that would be the empty string
    labels: VecDeque<SmartString<smartstring::LazyCompact>>,
}

/// Whether DNS message/name compression is allowed when parsing a [`Name`].
///
/// Compression is a decoding-time concept: query names are always encoded
/// without it.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Compression {
    /// Message compression is allowed.
    Allowed,
    /// Message compression is prohibited.
    Prohibited,
}

impl Name {
    /// Returns a `Name` representing the DNS root (`"."`).
    ///
    /// # Examples
    /// ```rust
    /// use mxdns_proto::Name;
    ///
    /// assert_eq!(Name::from_ascii(".").ok(), Some(Name::root()));
    /// ```
    pub fn root() -> Self {
        Self {
            labels: VecDeque::new(),
        }
    }

    /// Parses a `Name` encoded as a DNS QNAME from the given cursor.
    ///
    /// Labels are read as length-prefixed segments. A length byte with both
    /// high bits set is a compression pointer: together with the next byte it
    /// forms a 14-bit absolute offset into the message, and parsing continues
    /// from there. Once the name terminates, the cursor is restored to the
    /// byte after the first pointer, so the caller sees the name as a
    /// contiguous field.
    ///
    /// The number of pointer jumps is bounded by the message length. A
    /// message whose pointers form a cycle fails with
    /// [`ParseError::PointerCycle`] instead of looping forever.
    ///
    /// If `compression` is [`Compression::Prohibited`], encountering a
    /// pointer is an error.
    ///
    /// # Examples
    /// ```rust
    /// use mxdns_proto::cursor::MsgCursor;
    /// use mxdns_proto::name::{Compression, Name};
    ///
    /// // "example.com" spelled out, followed by "sub.example.com" encoded via
    /// // the "sub" label and a pointer back to offset 0
    /// let bytes = b"\x07example\x03com\0\x03sub\xc0\x00";
    /// let mut msg = MsgCursor::new(bytes);
    ///
    /// let first = Name::parse(&mut msg, Compression::Allowed).unwrap();
    /// assert_eq!(first, Name::from_ascii("example.com").unwrap());
    ///
    /// let second = Name::parse(&mut msg, Compression::Allowed).unwrap();
    /// assert_eq!(second, Name::from_ascii("sub.example.com").unwrap());
    /// assert_eq!(msg.remaining(), 0);
    /// ```
    pub fn parse(msg: &mut MsgCursor, compression: Compression) -> Result<Self, ParseError> {
        let mut labels = VecDeque::new();
        // where to continue after the name, once the first pointer is followed
        let mut return_pos = None;
        let mut jumps = 0;
        let max_jumps = msg.len();

        loop {
            let c = msg.read_u8()?;
            if c == 0 {
                break;
            }

            if (c & 0b1100_0000) == 0b1100_0000 {
                if compression == Compression::Prohibited {
                    return Err(ParseError::CompressionProhibited);
                }
                jumps += 1;
                if jumps > max_jumps {
                    return Err(ParseError::PointerCycle(max_jumps));
                }

                let offset = (((c & 0b0011_1111) as usize) << 8) | msg.read_u8()? as usize;
                if return_pos.is_none() {
                    return_pos = Some(msg.position());
                }
                msg.set_position(offset)?;
            } else if (c & 0b1100_0000) != 0 {
                // 0b01 and 0b10 label types are reserved
                return Err(ParseError::InvalidLabelType(c));
            } else {
                // c <= 63 here, so the wire cannot exceed the label limit
                let mut label = SmartString::new();
                for byte in msg.read_slice(c as usize)? {
                    label.push(*byte as char);
                }
                labels.push_back(label);
            }
        }

        if let Some(pos) = return_pos {
            msg.set_position(pos)?;
        }

        Ok(Name { labels })
    }

    /// Constructs a `Name` from an ASCII domain string.
    ///
    /// The rules for allowed names are as follows:
    /// - Every label must consist of the following characters: `a-z`, `A-Z`,
    ///   `0-9`, `_`, `-`. The label's first and last character must not be
    ///   `-`.
    /// - Every label must contain at least one character, except for the DNS
    ///   root's name.
    /// - Every label must be at most 63 bytes long, and the whole name at
    ///   most 255 bytes in its wire encoding.
    /// - A trailing dot is allowed, but not necessary.
    ///
    /// # Examples
    /// ```rust
    /// use mxdns_proto::Name;
    ///
    /// assert_eq!(Name::from_ascii(".").ok(), Some(Name::root()));
    /// assert_eq!(Name::from_ascii("").ok(), Some(Name::root()));
    ///
    /// assert!(Name::from_ascii("example.com").is_ok());
    /// assert!(Name::from_ascii("example.com.").is_ok());
    /// assert!(Name::from_ascii("mail_1.example.com").is_ok());
    ///
    /// assert!(Name::from_ascii("exa-mple-.com").is_err());
    /// assert!(Name::from_ascii("a..b").is_err());
    /// assert!(Name::from_ascii("exämple.com").is_err());
    /// ```
    pub fn from_ascii(name: impl AsRef<str>) -> Result<Self, ParseError> {
        let name = name.as_ref();

        // without this special case, we would later return `Err(EmptyLabel)`,
        // because splitting "." on '.' gives two empty labels
        if name == "." {
            return Ok(Self::root());
        }

        let mut labels = VecDeque::new();
        let mut root_label_found = false;
        for label in name.split('.') {
            if root_label_found {
                return Err(ParseError::EmptyLabel);
            }
            if label.len() > 63 {
                return Err(ParseError::LabelTooLong(label.len()));
            }
            if label.is_empty() {
                root_label_found = true;
            } else {
                Name::check_label(label)?;
                labels.push_back(label.into());
            }
        }

        let name = Name { labels };
        if name.encoded_len() > 255 {
            return Err(ParseError::NameTooLong(name.encoded_len()));
        }

        Ok(name)
    }

    /// Encodes this name as a DNS QNAME into the given buffer, i.e. as a
    /// sequence of length-prefixed labels terminated by a zero byte. Never
    /// uses message compression.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Examples
    /// ```rust
    /// use mxdns_proto::Name;
    ///
    /// let mut buf = Vec::new();
    /// let name = Name::from_ascii("example.com").unwrap();
    /// name.encode_into(&mut buf).ok();
    /// assert_eq!(buf, b"\x07example\x03com\0");
    /// ```
    pub fn encode_into(&self, buf: &mut impl Write) -> Result<u16, EncodeError> {
        if self.encoded_len() > 255 {
            return Err(EncodeError::DomainTooLong(self.encoded_len()));
        }

        let mut bytes_written = 0;
        for label in &self.labels {
            if label.len() > 63 {
                return Err(EncodeError::LabelTooLong(label.len()));
            }
            buf.write_u8(label.len() as u8)?;
            buf.write_all(label.as_bytes())?;
            bytes_written += 1 + label.as_bytes().len();
        }
        buf.write_u8(0)?;
        Ok(bytes_written as u16 + 1)
    }

    /// Returns the length of this name in its wire encoding, including the
    /// length prefixes and the terminating zero byte.
    ///
    /// # Examples
    /// ```rust
    /// use mxdns_proto::Name;
    ///
    /// assert_eq!(Name::root().encoded_len(), 1);
    /// assert_eq!(Name::from_ascii("example.com").unwrap().encoded_len(), 13);
    /// ```
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|label| label.len() + 1).sum::<usize>() + 1
    }

    /// Returns the label count of this `Name`. The DNS root's name (`"."`)
    /// has a label count of zero.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns true iff this `Name` represents the DNS root (`"."`).
    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Checks if the given string is a valid DNS name label.
    fn check_label(label: &str) -> Result<(), ParseError> {
        let valid = |c: char| c.is_ascii_alphanumeric() || c == '_';
        let mut chars = label.chars();
        // label is non-empty, so we can unwrap
        let first = chars.next().unwrap();
        if !valid(first) {
            return Err(ParseError::NameInvalidChars);
        }
        let mut last = first;
        for c in chars {
            if !valid(c) && c != '-' {
                return Err(ParseError::NameInvalidChars);
            }
            last = c;
        }
        if !valid(last) {
            return Err(ParseError::NameInvalidChars);
        }

        Ok(())
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(other.labels.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            write!(f, ".")
        } else {
            let last_index = self.labels.len() - 1;
            for (i, label) in self.labels.iter().enumerate() {
                if i != last_index {
                    write!(f, "{}.", label)?;
                } else {
                    write!(f, "{}", label)?;
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressed_and_spelled_out_names_decode_identically() {
        // "mail.example.com" spelled out at offset 0; the same name at offset
        // 18 as the "mail" label plus a pointer to "example.com" (offset 5)
        let mut bytes = Vec::new();
        Name::from_ascii("mail.example.com")
            .unwrap()
            .encode_into(&mut bytes)
            .unwrap();
        assert_eq!(bytes.len(), 18);
        bytes.extend_from_slice(b"\x04mail\xc0\x05");

        let mut msg = MsgCursor::new(&bytes);
        let spelled_out = Name::parse(&mut msg, Compression::Allowed).unwrap();
        let compressed = Name::parse(&mut msg, Compression::Allowed).unwrap();

        assert_eq!(spelled_out, compressed);
        assert_eq!(compressed.to_string(), "mail.example.com");
        // the cursor must sit right after the pointer, not at the jump target
        assert_eq!(msg.remaining(), 0);
    }

    #[test]
    fn pointer_cycle_is_rejected() {
        // a pointer to itself
        let mut msg = MsgCursor::new(b"\xc0\x00");
        assert!(matches!(
            Name::parse(&mut msg, Compression::Allowed),
            Err(ParseError::PointerCycle(_))
        ));

        // two pointers pointing at each other
        let mut msg = MsgCursor::new(b"\xc0\x02\xc0\x00");
        assert!(matches!(
            Name::parse(&mut msg, Compression::Allowed),
            Err(ParseError::PointerCycle(_))
        ));
    }

    #[test]
    fn prohibited_compression_is_rejected() {
        let mut msg = MsgCursor::new(b"\x03com\0\x03sub\xc0\x00");
        msg.set_position(5).unwrap();
        assert!(matches!(
            Name::parse(&mut msg, Compression::Prohibited),
            Err(ParseError::CompressionProhibited)
        ));
    }

    #[test]
    fn truncated_label_is_rejected() {
        // length byte promises 7 bytes, only 3 follow
        let mut msg = MsgCursor::new(b"\x07exa");
        assert!(matches!(
            Name::parse(&mut msg, Compression::Allowed),
            Err(ParseError::OffsetOverflow { .. })
        ));
    }

    #[test]
    fn reserved_label_types_are_rejected() {
        let mut msg = MsgCursor::new(b"\x40foo");
        assert!(matches!(
            Name::parse(&mut msg, Compression::Allowed),
            Err(ParseError::InvalidLabelType(0x40))
        ));
    }

    #[test]
    fn from_ascii_enforces_length_limits() {
        let long_label = "a".repeat(64);
        assert!(matches!(
            Name::from_ascii(format!("{}.com", long_label)),
            Err(ParseError::LabelTooLong(64))
        ));

        let label = "a".repeat(63);
        let long_name = [&label, &label, &label, &label].map(String::as_str).join(".");
        assert!(matches!(
            Name::from_ascii(long_name),
            Err(ParseError::NameTooLong(_))
        ));
    }

    #[test]
    fn comparison_ignores_case() {
        let lower = Name::from_ascii("mail.example.com").unwrap();
        let mixed = Name::from_ascii("MAIL.Example.COM").unwrap();
        assert_eq!(lower, mixed);
    }
}
