//! `MX` RDATA definition.

use std::fmt::Display;
use std::io::Write;

use byteorder::{NetworkEndian, WriteBytesExt};

use crate::cursor::MsgCursor;
use crate::error::{EncodeError, ParseError};
use crate::name::{Compression, Name};

use super::{Rdata, RdataTrait};

/// A record containing mail exchange information.
/// [\[RFC 1035\]](https://www.rfc-editor.org/rfc/rfc1035)
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct MX {
    /// An integer which specifies the preference given to this record among
    /// others at the same owner. Lower values are preferred.
    pub preference: u16,
    /// A domain name which specifies a host willing to act as a mail
    /// exchange for the owner name.
    ///
    /// If this is ".", the record's domain does not accept mail.
    /// [\[RFC 7505\]](https://www.rfc-editor.org/rfc/rfc7505)
    pub exchange: Name,
}

impl RdataTrait for MX {
    fn parse_rdata(msg: &mut MsgCursor, _rdlength: u16) -> Result<Rdata, ParseError> {
        let preference = msg.read_u16()?;
        let exchange = Name::parse(msg, Compression::Allowed)?;
        Ok(Rdata::MX(Self {
            preference,
            exchange,
        }))
    }

    fn encode_rdata_into(&self, buf: &mut impl Write) -> Result<u16, EncodeError> {
        buf.write_u16::<NetworkEndian>(self.preference)?;
        self.exchange
            .encode_into(buf)
            .map(|bytes_written| bytes_written + 2)
    }
}

impl Display for MX {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}
