//! `NS` RDATA definition.

use std::fmt::Display;
use std::io::Write;

use crate::cursor::MsgCursor;
use crate::error::{EncodeError, ParseError};
use crate::name::{Compression, Name};

use super::{Rdata, RdataTrait};

/// A record containing the name of an authoritative name server.
/// [\[RFC 1035\]](https://www.rfc-editor.org/rfc/rfc1035)
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct NS {
    /// A domain name which specifies a host which should be authoritative
    /// for the specified class and domain.
    pub name: Name,
}

impl RdataTrait for NS {
    fn parse_rdata(msg: &mut MsgCursor, _rdlength: u16) -> Result<Rdata, ParseError> {
        Ok(Rdata::NS(Self {
            name: Name::parse(msg, Compression::Allowed)?,
        }))
    }

    fn encode_rdata_into(&self, buf: &mut impl Write) -> Result<u16, EncodeError> {
        self.name.encode_into(buf)
    }
}

impl Display for NS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
