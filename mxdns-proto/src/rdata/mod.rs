//! RDATA type definitions.
//!
//! Only the record types this client knows how to interpret get a typed
//! variant: [`A`], [`NS`], [`CNAME`] and [`MX`]. Everything else is carried
//! as [`Rdata::Unknown`] raw bytes and left to the caller to ignore.

use std::fmt::Display;
use std::io::Write;

use data_encoding::HEXUPPER;

use crate::cursor::MsgCursor;
use crate::error::{EncodeError, ParseError};
use crate::RecordType;

pub mod a;
pub mod cname;
pub mod mx;
pub mod ns;

pub use a::A;
pub use cname::CNAME;
pub use mx::MX;
pub use ns::NS;

/// The record data (RDATA) for a [`Record`][super::Record].
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Rdata {
    A(A),
    NS(NS),
    CNAME(CNAME),
    MX(MX),

    /// RDATA of a type this client does not decode, containing the raw RDATA
    /// bytes.
    Unknown(Vec<u8>),
}

/// A trait for working with the different RDATA variants.
pub trait RdataTrait: Sized + Display {
    /// Parses the RDATA from the encoded bytes, starting at `msg`'s current
    /// position.
    ///
    /// `msg` is a cursor over the *complete* DNS message that contains the
    /// RDATA. This is needed for handling DNS message compression: names
    /// inside RDATA may point back into earlier parts of the message.
    fn parse_rdata(msg: &mut MsgCursor, rdlength: u16) -> Result<Rdata, ParseError>;

    /// Encodes the RDATA into the given `buf` and returns the number of
    /// written bytes on success.
    ///
    /// If an error is returned, no guarantees for the state of `buf` are
    /// given.
    fn encode_rdata_into(&self, buf: &mut impl Write) -> Result<u16, EncodeError>;

    /// Encodes the RDATA and returns the encoded bytes.
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut rdata = Vec::new();
        self.encode_rdata_into(&mut rdata)?;
        Ok(rdata)
    }
}

impl Rdata {
    /// Parses RDATA of the given record type.
    ///
    /// Dispatches on `rtype` over the closed set of decoded types; any other
    /// type tag yields [`Rdata::Unknown`] with the raw bytes.
    pub fn parse(
        rtype: RecordType,
        msg: &mut MsgCursor,
        rdlength: u16,
    ) -> Result<Self, ParseError> {
        match rtype {
            RecordType::A => A::parse_rdata(msg, rdlength),
            RecordType::NS => NS::parse_rdata(msg, rdlength),
            RecordType::CNAME => CNAME::parse_rdata(msg, rdlength),
            RecordType::MX => MX::parse_rdata(msg, rdlength),
            RecordType::Unknown(_) => {
                let rdata = msg.read_slice(rdlength as usize)?.to_vec();
                Ok(Rdata::Unknown(rdata))
            }
        }
    }

    /// See [`RdataTrait::encode_rdata_into()`].
    pub fn encode_into(&self, buf: &mut impl Write) -> Result<u16, EncodeError> {
        match self {
            Rdata::A(rdata) => rdata.encode_rdata_into(buf),
            Rdata::NS(rdata) => rdata.encode_rdata_into(buf),
            Rdata::CNAME(rdata) => rdata.encode_rdata_into(buf),
            Rdata::MX(rdata) => rdata.encode_rdata_into(buf),
            Rdata::Unknown(bytes) => {
                buf.write_all(bytes)?;
                Ok(bytes.len() as u16)
            }
        }
    }

    /// See [`RdataTrait::encode()`].
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut rdata = Vec::new();
        self.encode_into(&mut rdata)?;
        Ok(rdata)
    }

    /// Returns the [`RecordType`] that matches this RDATA.
    ///
    /// # Note
    /// As [`Rdata::Unknown`] does not know its type, calling this method on
    /// it will return `RecordType::Unknown(0)`.
    pub fn rtype(&self) -> RecordType {
        match self {
            Rdata::A(_) => RecordType::A,
            Rdata::NS(_) => RecordType::NS,
            Rdata::CNAME(_) => RecordType::CNAME,
            Rdata::MX(_) => RecordType::MX,
            Rdata::Unknown(_) => RecordType::Unknown(0),
        }
    }

    /// Returns a reference to the inner [`MX`] when called on the `MX`
    /// variant. For all other variants, returns [`None`].
    pub fn as_mx(&self) -> Option<&MX> {
        if let Self::MX(inner) = self {
            Some(inner)
        } else {
            None
        }
    }
}

impl From<A> for Rdata {
    fn from(rdata: A) -> Self {
        Self::A(rdata)
    }
}

impl From<NS> for Rdata {
    fn from(rdata: NS) -> Self {
        Self::NS(rdata)
    }
}

impl From<CNAME> for Rdata {
    fn from(rdata: CNAME) -> Self {
        Self::CNAME(rdata)
    }
}

impl From<MX> for Rdata {
    fn from(rdata: MX) -> Self {
        Self::MX(rdata)
    }
}

impl Display for Rdata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rdata::A(rdata) => write!(f, "{}", rdata),
            Rdata::NS(rdata) => write!(f, "{}", rdata),
            Rdata::CNAME(rdata) => write!(f, "{}", rdata),
            Rdata::MX(rdata) => write!(f, "{}", rdata),
            Rdata::Unknown(data) => {
                write!(f, "\\# {} {}", data.len(), HEXUPPER.encode(data))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Name;

    #[test]
    fn mx_rdata_roundtrip() {
        let mx = MX {
            preference: 10,
            exchange: Name::from_ascii("mail.example.com").unwrap(),
        };
        let encoded = mx.encode().unwrap();
        assert_eq!(&encoded[..2], &[0, 10]);

        let mut msg = MsgCursor::new(&encoded);
        let parsed = MX::parse_rdata(&mut msg, encoded.len() as u16).unwrap();
        assert_eq!(parsed, Rdata::MX(mx));
    }

    #[test]
    fn mx_rdata_with_compressed_exchange() {
        // message layout: "example.com" at offset 0, MX RDATA at offset 13
        // with the exchange "mail" + pointer to offset 0
        let mut bytes = Vec::new();
        Name::from_ascii("example.com")
            .unwrap()
            .encode_into(&mut bytes)
            .unwrap();
        let rdata_start = bytes.len();
        bytes.extend_from_slice(b"\x00\x14\x04mail\xc0\x00");

        let mut msg = MsgCursor::new(&bytes);
        msg.set_position(rdata_start).unwrap();
        let parsed = MX::parse_rdata(&mut msg, 9).unwrap();

        let expected = MX {
            preference: 20,
            exchange: Name::from_ascii("mail.example.com").unwrap(),
        };
        assert_eq!(parsed, Rdata::MX(expected));
        assert_eq!(msg.remaining(), 0);
    }

    #[test]
    fn a_rdata_decodes_an_ipv4_address() {
        let mut msg = MsgCursor::new(&[192, 0, 2, 17]);
        let parsed = Rdata::parse(RecordType::A, &mut msg, 4).unwrap();
        match parsed {
            Rdata::A(a) => assert_eq!(a.address.octets(), [192, 0, 2, 17]),
            other => panic!("expected A RDATA, got {:?}", other),
        }
    }

    #[test]
    fn a_rdata_shorter_than_four_bytes_fails() {
        let mut msg = MsgCursor::new(&[192, 0]);
        assert!(matches!(
            Rdata::parse(RecordType::A, &mut msg, 2),
            Err(ParseError::OffsetOverflow { .. })
        ));
    }

    #[test]
    fn unrecognized_type_keeps_raw_bytes() {
        let mut msg = MsgCursor::new(b"\x03abc");
        let parsed = Rdata::parse(RecordType::Unknown(16), &mut msg, 4).unwrap();
        assert_eq!(parsed, Rdata::Unknown(b"\x03abc".to_vec()));
        assert_eq!(parsed.to_string(), "\\# 4 03616263");
    }
}
