//! `mxdns-proto` provides the definition of the DNS wire format needed for
//! mail exchanger lookups, as well as the means to de-/serialize messages
//! from/to that format. In simpler terms, you can construct and encode DNS
//! queries and decode DNS responses with it.
//!
//! It is used as the backend for [`mxdns`], a client that resolves the MX
//! records of a domain, but you can use this library on its own as well.
//!
//! The decoded record types form a closed set: `A`, `NS`, `CNAME` and `MX`.
//! Records of any other type are carried as raw bytes (see
//! [`Rdata::Unknown`]) and are expected to be ignored by callers.
//!
//! # Basic usage example
//! ```rust
//! use mxdns_proto::{Message, Name, RecordType};
//!
//! let msg = Message::new_query(
//!     Name::from_ascii("example.com").unwrap(),
//!     RecordType::MX,
//! ).unwrap();
//! let _encoded = msg.encode().unwrap();
//! ```
//!
//! If you're also looking for utilities to actually send and receive DNS
//! queries and responses, please take a look at [`mxdns`].
//!
//! [`mxdns`]: ../mxdns/index.html

use std::fmt::{self, Display};
use std::io::Write;

use byteorder::{NetworkEndian, WriteBytesExt};
use rand::Rng;
use repr_with_fallback::repr_with_fallback;
use strum_macros::EnumString;

pub mod cursor;
pub mod error;
pub mod name;
pub mod rdata;

use cursor::MsgCursor;
use error::{EncodeError, ParseError};

pub use name::Name;
pub use rdata::Rdata;

/// Represents a DNS OpCode.
///
/// See [here](https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-5)
/// for further information.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Opcode {
    QUERY,
    IQUERY,
    STATUS,
    NOTIFY,
    UPDATE,
    DSO,
}

/// Represents a DNS RCODE.
///
/// Only the RCODEs from [RFC 1035](https://www.rfc-editor.org/rfc/rfc1035)
/// are represented; the extended RCODEs require EDNS, which this client does
/// not speak.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum RCode {
    NOERROR,
    FORMERR,
    SERVFAIL,
    NXDOMAIN,
    NOTIMP,
    REFUSED,
}

repr_with_fallback! {
    /// Represents a DNS TYPE.
    ///
    /// Only the types in the closed decoded set have named variants; every
    /// other type tag is preserved in the `Unknown` variant.
    #[derive(PartialEq, Eq, Copy, Clone, EnumString, Debug)]
    pub enum RecordType {
        A = 1,
        NS = 2,
        CNAME = 5,
        MX = 15,
        Unknown(u16),
    }
}

/// Represents a DNS CLASS.
///
/// Other classes than `IN` are included only for completeness and historical
/// reasons; queries are always sent with class `IN`.
///
/// See [RFC 1035](https://www.rfc-editor.org/rfc/rfc1035) for further
/// information.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Class {
    IN,
    CH,
    HS,
    NONE,
    ANY,
}

/// Represents the flags of a [`Header`].
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct HeaderFlags {
    /// authoritative answer (valid in responses only)
    /// [\[RFC 1035\]](https://www.rfc-editor.org/rfc/rfc1035)
    pub aa: bool,
    /// truncated (set on all truncated messages except last one)
    /// [\[RFC 1035\]](https://www.rfc-editor.org/rfc/rfc1035)
    pub tc: bool,
    /// recursion desired (copied in answer if supported and accepted)
    /// [\[RFC 1035\]](https://www.rfc-editor.org/rfc/rfc1035)
    pub rd: bool,
    /// valid in responses, indicating recursive query support in the name
    /// server [\[RFC 1035\]](https://www.rfc-editor.org/rfc/rfc1035)
    pub ra: bool,
}

/// Represents a DNS header.
///
/// The general format of a header is defined in
/// [RFC 1035](https://www.rfc-editor.org/rfc/rfc1035).
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Header {
    /// Supplied by questioner and reflected back unchanged by responder.
    pub msg_id: u16,
    /// False for queries, true for responses.
    pub qr: bool,
    /// The [`Opcode`] of the message.
    pub opcode: Opcode,
    /// The [`HeaderFlags`] of the message.
    pub flags: HeaderFlags,
    /// For queries: [`None`]. For responses: the return/status code of the
    /// server.
    pub rcode: Option<RCode>,
    /// The number of questions.
    pub qdcount: u16,
    /// The number of resource records in the answer section.
    pub ancount: u16,
    /// The number of name server resource records.
    pub nscount: u16,
    /// The number of additional resource records.
    pub arcount: u16,
}

/// Represents a DNS question, i.e. an entry in the question section of a DNS
/// message.
///
/// See [RFC 1035](https://www.rfc-editor.org/rfc/rfc1035) for further
/// information.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Question {
    /// The [`Name`] to query for.
    pub qname: Name,
    /// The [`RecordType`] to query for.
    pub qtype: RecordType,
    /// The query [`Class`].
    pub qclass: Class,
}

/// Represents a DNS resource record, i.e. an entry in the answer section of a
/// DNS message.
///
/// See [RFC 1035](https://www.rfc-editor.org/rfc/rfc1035) for further
/// information.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Record {
    /// The [`Name`] that this record is for.
    pub owner: Name,
    /// The type of this record.
    pub rtype: RecordType,
    /// The class of this record (will almost always be [`Class::IN`]).
    pub class: Class,
    /// The amount of seconds this record may be cached for. Informational
    /// only; this client does not cache.
    pub ttl: u32,
    // rdlength omitted as rdata knows its own length
    encoded_rdata: Vec<u8>, // needed for encoding
    rdata: Rdata,
}

/// Represents a DNS message.
///
/// Responses keep only the sections this client interprets: the authority and
/// additional sections are skipped during parsing, consistent with the
/// MX-only public contract.
///
/// See [RFC 1035](https://www.rfc-editor.org/rfc/rfc1035) for further
/// information.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Message {
    /// The message header.
    pub header: Header,
    /// The list of questions.
    pub questions: Vec<Question>,
    /// The list of resource records in the answer section.
    pub answers: Vec<Record>,
}

impl Opcode {
    /// Encodes an `Opcode` as a byte.
    pub fn encode(&self) -> u8 {
        match self {
            Opcode::QUERY => 0,
            Opcode::IQUERY => 1,
            Opcode::STATUS => 2,
            Opcode::NOTIFY => 4,
            Opcode::UPDATE => 5,
            Opcode::DSO => 6,
        }
    }

    /// Parses an encoded `Opcode` from a byte.
    ///
    /// Returns an error if the given byte does not represent a valid DNS
    /// OpCode.
    pub fn parse(val: u8) -> Result<Opcode, ParseError> {
        Ok(match val {
            0 => Opcode::QUERY,
            1 => Opcode::IQUERY,
            2 => Opcode::STATUS,
            4 => Opcode::NOTIFY,
            5 => Opcode::UPDATE,
            6 => Opcode::DSO,
            x => return Err(ParseError::InvalidOpcode(x)),
        })
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl RCode {
    /// Encodes an `RCode` as a byte (actually only the lower four bits are
    /// used).
    pub fn encode(&self) -> u8 {
        match self {
            RCode::NOERROR => 0,
            RCode::FORMERR => 1,
            RCode::SERVFAIL => 2,
            RCode::NXDOMAIN => 3,
            RCode::NOTIMP => 4,
            RCode::REFUSED => 5,
        }
    }

    /// Parses an encoded `RCode` from the lower four bits of the header's
    /// second line.
    ///
    /// Returns an error if the given value does not represent a valid DNS
    /// RCODE.
    pub fn parse(val: u16) -> Result<RCode, ParseError> {
        Ok(match val {
            0 => RCode::NOERROR,
            1 => RCode::FORMERR,
            2 => RCode::SERVFAIL,
            3 => RCode::NXDOMAIN,
            4 => RCode::NOTIMP,
            5 => RCode::REFUSED,
            x => return Err(ParseError::InvalidRcode(x)),
        })
    }
}

impl Display for RCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Unknown(x) => write!(f, "TYPE{}", x),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Class {
    /// Encodes a `Class` as a two-byte value.
    pub fn encode(&self) -> u16 {
        match self {
            Class::IN => 1,
            Class::CH => 3,
            Class::HS => 4,
            Class::NONE => 254,
            Class::ANY => 255,
        }
    }

    /// Parses an encoded `Class` from a two-byte value.
    ///
    /// Returns an error if the given value does not represent a valid DNS
    /// CLASS.
    pub fn parse(val: u16) -> Result<Class, ParseError> {
        Ok(match val {
            1 => Class::IN,
            3 => Class::CH,
            4 => Class::HS,
            254 => Class::NONE,
            255 => Class::ANY,
            x => return Err(ParseError::InvalidClass(x)),
        })
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl HeaderFlags {
    /// Creates a `HeaderFlags` struct from bitflags as they would appear in
    /// the second 16-bit line of a [`Header`].
    pub fn from_flags(flags: u16) -> Self {
        Self {
            aa: (flags & (1 << 10)) != 0,
            tc: (flags & (1 << 9)) != 0,
            rd: (flags & (1 << 8)) != 0,
            ra: (flags & (1 << 7)) != 0,
        }
    }

    /// Returns a u16 representing bitflags as they would appear in the
    /// second 16-bit line of a [`Header`].
    pub fn as_flags(&self) -> u16 {
        let aa = if self.aa { 1 } else { 0 };
        let tc = if self.tc { 1 } else { 0 };
        let rd = if self.rd { 1 } else { 0 };
        let ra = if self.ra { 1 } else { 0 };
        (aa << 10) + (tc << 9) + (rd << 8) + (ra << 7)
    }
}

impl Header {
    /// Creates a header for a standard recursion-desired DNS query with a
    /// single question.
    pub fn new_query_header(msg_id: u16) -> Self {
        Header {
            msg_id,
            qr: false,
            opcode: Opcode::QUERY,
            flags: HeaderFlags {
                aa: false,
                tc: false,
                rd: true,
                ra: false,
            },
            rcode: None,
            qdcount: 1,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    /// Creates a header for a DNS response message.
    ///
    /// `qdcount` and `ancount` are grouped in that order in the `counts`
    /// parameter.
    pub fn new_response_header(msg_id: u16, rcode: RCode, counts: [u16; 2]) -> Self {
        Header {
            msg_id,
            qr: true,
            opcode: Opcode::QUERY,
            flags: HeaderFlags {
                aa: false,
                tc: false,
                rd: true,
                ra: true,
            },
            rcode: Some(rcode),
            qdcount: counts[0],
            ancount: counts[1],
            nscount: 0,
            arcount: 0,
        }
    }

    /// Encodes a `Header` as a series of bytes.
    ///
    /// Returns an error if a method defined in [`byteorder::WriteBytesExt`]
    /// returns an error.
    pub fn encode_into(&self, buf: &mut impl Write) -> Result<(), EncodeError> {
        let qr = if self.qr { 1u16 } else { 0u16 };
        let opcode = self.opcode.encode() as u16;
        let rcode = match &self.rcode {
            Some(val) => val.encode() as u16,
            None => 0u16,
        };

        let line_two = (qr << 15) + (opcode << 11) + self.flags.as_flags() + rcode;
        buf.write_u16::<NetworkEndian>(self.msg_id)?;
        buf.write_u16::<NetworkEndian>(line_two)?;
        buf.write_u16::<NetworkEndian>(self.qdcount)?;
        buf.write_u16::<NetworkEndian>(self.ancount)?;
        buf.write_u16::<NetworkEndian>(self.nscount)?;
        buf.write_u16::<NetworkEndian>(self.arcount)?;

        Ok(())
    }

    /// Parses an encoded `Header` from the first twelve bytes of a message.
    ///
    /// Returns an error if [`Opcode::parse()`], [`RCode::parse()`] or a
    /// cursor read returns an error.
    pub fn parse(msg: &mut MsgCursor) -> Result<Self, ParseError> {
        let msg_id = msg.read_u16()?;
        let line_two = msg.read_u16()?;
        let qr = (line_two & (1 << 15)) != 0;
        let opcode = Opcode::parse(((line_two & (0b1111 << 11)) >> 11) as u8)?;
        let flags = HeaderFlags::from_flags(line_two);
        let rcode = RCode::parse(line_two & 0b1111)?;

        Ok(Header {
            msg_id,
            qr,
            opcode,
            flags,
            rcode: if qr { Some(rcode) } else { None },
            qdcount: msg.read_u16()?,
            ancount: msg.read_u16()?,
            nscount: msg.read_u16()?,
            arcount: msg.read_u16()?,
        })
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.qr { "DNS Response" } else { "DNS Query" };
        match self.rcode {
            Some(rcode) => write!(
                f,
                "{} (id: {}, opcode: {}, rcode: {})",
                kind, self.msg_id, self.opcode, rcode
            ),
            None => write!(f, "{} (id: {}, opcode: {})", kind, self.msg_id, self.opcode),
        }
    }
}

impl Question {
    /// Creates a DNS question.
    pub fn new(qname: Name, qtype: RecordType, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    /// Encodes a `Question` as a series of bytes: the encoded name, the
    /// two-byte type tag, the two-byte class value.
    pub fn encode_into(&self, buf: &mut impl Write) -> Result<(), EncodeError> {
        self.qname.encode_into(buf)?;
        buf.write_u16::<NetworkEndian>(self.qtype.into())?;
        buf.write_u16::<NetworkEndian>(self.qclass.encode())?;
        Ok(())
    }

    /// Parses an encoded `Question` from a series of bytes.
    pub fn parse(msg: &mut MsgCursor) -> Result<Self, ParseError> {
        let qname = Name::parse(msg, name::Compression::Allowed)?;
        let qtype: RecordType = msg.read_u16()?.into();
        let qclass = Class::parse(msg.read_u16()?)?;

        Ok(Question {
            qname,
            qtype,
            qclass,
        })
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DNS Question for '{}' (type: {}, class: {})",
            self.qname, self.qtype, self.qclass
        )
    }
}

impl Record {
    /// Creates a new `Record` from [`Rdata`].
    ///
    /// Returns an error if `rdata` could not be encoded.
    pub fn new(owner: Name, class: Class, ttl: u32, rdata: Rdata) -> Result<Self, EncodeError> {
        let rtype = rdata.rtype();
        let encoded_rdata = rdata.encode()?;

        Ok(Self {
            owner,
            rtype,
            class,
            ttl,
            rdata,
            encoded_rdata,
        })
    }

    /// Encodes a `Record` as a series of bytes.
    pub fn encode_into(&self, buf: &mut impl Write) -> Result<(), EncodeError> {
        self.owner.encode_into(buf)?;
        buf.write_u16::<NetworkEndian>(self.rtype.into())?;
        buf.write_u16::<NetworkEndian>(self.class.encode())?;
        buf.write_u32::<NetworkEndian>(self.ttl)?;
        buf.write_u16::<NetworkEndian>(self.encoded_rdata.len() as u16)?;
        buf.write_all(&self.encoded_rdata)?;
        Ok(())
    }

    /// Parses an encoded `Record` from a series of bytes.
    ///
    /// The record's RDATA window is validated before it is decoded: a record
    /// whose declared `rdlength` reaches past the end of the message fails
    /// with [`ParseError::OffsetOverflow`], and a known-type RDATA that does
    /// not occupy exactly `rdlength` bytes fails with
    /// [`ParseError::RdataLengthMismatch`].
    pub fn parse(msg: &mut MsgCursor) -> Result<Self, ParseError> {
        let owner = Name::parse(msg, name::Compression::Allowed)?;
        let rtype: RecordType = msg.read_u16()?.into();
        let class = Class::parse(msg.read_u16()?)?;
        let ttl = msg.read_u32()?;
        let rdlength = msg.read_u16()?;

        let rdata_start = msg.position();
        let encoded_rdata = msg.read_slice(rdlength as usize)?.to_vec();
        // reset position to the start of rdata for Rdata::parse()
        msg.set_position(rdata_start)?;
        let rdata = Rdata::parse(rtype, msg, rdlength)?;
        if msg.position() != rdata_start + rdlength as usize {
            return Err(ParseError::RdataLengthMismatch { rtype, rdlength });
        }

        Ok(Record {
            owner,
            rtype,
            class,
            ttl,
            encoded_rdata,
            rdata,
        })
    }

    /// Returns a reference to the contained [`Rdata`].
    pub fn rdata(&self) -> &Rdata {
        &self.rdata
    }

    /// Returns the contained [`Rdata`], consuming the record.
    pub fn into_rdata(self) -> Rdata {
        self.rdata
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.owner, self.ttl, self.rtype, self.rdata
        )
    }
}

impl Message {
    /// Creates a DNS query: a standard recursion-desired question for
    /// `qname`/`qtype` with class `IN` and a fresh random transaction id.
    ///
    /// Returns an error if `qname` is the root name, since there is nothing
    /// meaningful to ask about it here.
    ///
    /// # Examples
    /// ```rust
    /// use mxdns_proto::{Message, Name, RecordType};
    ///
    /// let name = Name::from_ascii("example.com").unwrap();
    /// let msg = Message::new_query(name, RecordType::MX).unwrap();
    /// assert_eq!(msg.header.qdcount, 1);
    ///
    /// assert!(Message::new_query(Name::root(), RecordType::MX).is_err());
    /// ```
    pub fn new_query(qname: Name, qtype: RecordType) -> Result<Self, EncodeError> {
        if qname.is_root() {
            return Err(EncodeError::EmptyDomain);
        }

        let msg_id = rand::thread_rng().gen();

        Ok(Message {
            header: Header::new_query_header(msg_id),
            questions: vec![Question::new(qname, qtype, Class::IN)],
            answers: Vec::new(),
        })
    }

    /// Creates a DNS response with the given answer records.
    ///
    /// Mostly useful for test harnesses and stub servers; a resolver client
    /// only ever encodes queries.
    pub fn new_response(
        msg_id: u16,
        rcode: RCode,
        questions: Vec<Question>,
        answers: Vec<Record>,
    ) -> Self {
        Message {
            header: Header::new_response_header(
                msg_id,
                rcode,
                [questions.len() as u16, answers.len() as u16],
            ),
            questions,
            answers,
        }
    }

    /// Encodes a `Message` as a series of bytes.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        self.encode_into(&mut buf)?;
        Ok(buf)
    }

    /// The same as [`encode()`](Self::encode()), but encoded bytes are
    /// appended to the given writer instead of to a newly allocated one.
    pub fn encode_into(&self, buf: &mut impl Write) -> Result<(), EncodeError> {
        self.header.encode_into(buf)?;
        for question in &self.questions {
            question.encode_into(buf)?;
        }
        for record in &self.answers {
            record.encode_into(buf)?;
        }

        Ok(())
    }

    /// Parses an encoded `Message` from a series of bytes.
    ///
    /// Parses the header, `QDCOUNT` questions and `ANCOUNT` answer records.
    /// The authority and additional sections are not parsed: this client has
    /// no use for them.
    ///
    /// Returns an error if any section fails to decode or a truncated
    /// message (TC flag) is received.
    pub fn parse(msg: &mut MsgCursor) -> Result<Self, ParseError> {
        let header = Header::parse(msg)?;

        if header.flags.tc {
            return Err(ParseError::TruncatedMessage);
        }

        let mut questions = Vec::with_capacity(header.qdcount as usize);
        for _ in 0..header.qdcount {
            questions.push(Question::parse(msg)?);
        }

        let mut answers = Vec::with_capacity(header.ancount as usize);
        for _ in 0..header.ancount {
            answers.push(Record::parse(msg)?);
        }

        Ok(Message {
            header,
            questions,
            answers,
        })
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdata::{A, MX};

    fn example_question() -> Question {
        Question::new(
            Name::from_ascii("example.com").unwrap(),
            RecordType::MX,
            Class::IN,
        )
    }

    #[test]
    fn mx_query_wire_format() {
        let msg = Message::new_query(Name::from_ascii("example.com").unwrap(), RecordType::MX)
            .unwrap();
        let encoded = msg.encode().unwrap();

        // header: id (random), flags with only rd set, qdcount 1, rest 0
        assert_eq!(encoded.len(), 12 + 13 + 4);
        assert_eq!(&encoded[2..12], &[0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0]);
        // question name
        assert_eq!(&encoded[12..25], b"\x07example\x03com\0");
        // type MX, class IN
        assert_eq!(&encoded[25..], &[0x00, 0x0f, 0x00, 0x01]);
    }

    #[test]
    fn encoded_question_name_decodes_back() {
        let question = example_question();
        let mut buf = Vec::new();
        question.encode_into(&mut buf).unwrap();

        let parsed = Question::parse(&mut MsgCursor::new(&buf)).unwrap();
        assert_eq!(parsed, question);
        assert_eq!(parsed.qname.to_string(), "example.com");
    }

    #[test]
    fn response_header_roundtrip() {
        let header = Header::new_response_header(0xbeef, RCode::NXDOMAIN, [1, 0]);
        let mut buf = Vec::new();
        header.encode_into(&mut buf).unwrap();

        let parsed = Header::parse(&mut MsgCursor::new(&buf)).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn query_rejects_root_name() {
        assert!(matches!(
            Message::new_query(Name::root(), RecordType::MX),
            Err(EncodeError::EmptyDomain)
        ));
    }

    #[test]
    fn record_with_rdlength_past_buffer_end_fails() {
        // root owner, type A, class IN, ttl 0, rdlength 10, but only 4 bytes
        // of rdata present
        let bytes = b"\x00\x00\x01\x00\x01\x00\x00\x00\x00\x00\x0a\x7f\x00\x00\x01";
        let mut msg = MsgCursor::new(bytes);
        assert!(matches!(
            Record::parse(&mut msg),
            Err(ParseError::OffsetOverflow { .. })
        ));
    }

    #[test]
    fn record_whose_rdata_overruns_its_window_fails() {
        // type A with rdlength 2: the 4-byte address read spills into the
        // trailing bytes, which the rdlength check must catch
        let bytes = b"\x00\x00\x01\x00\x01\x00\x00\x00\x00\x00\x02\x7f\x00\x00\x01";
        let mut msg = MsgCursor::new(bytes);
        assert!(matches!(
            Record::parse(&mut msg),
            Err(ParseError::RdataLengthMismatch {
                rtype: RecordType::A,
                rdlength: 2,
            })
        ));
    }

    #[test]
    fn record_roundtrip() {
        let record = Record::new(
            Name::from_ascii("example.com").unwrap(),
            Class::IN,
            300,
            Rdata::MX(MX {
                preference: 10,
                exchange: Name::from_ascii("mail.example.com").unwrap(),
            }),
        )
        .unwrap();

        let mut buf = Vec::new();
        record.encode_into(&mut buf).unwrap();
        let parsed = Record::parse(&mut MsgCursor::new(&buf)).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn unknown_record_type_is_preserved_as_raw_bytes() {
        // type 16 (TXT) is not in the decoded set
        let record = Record::new(
            Name::from_ascii("example.com").unwrap(),
            Class::IN,
            60,
            Rdata::Unknown(b"\x04text".to_vec()),
        )
        .unwrap();
        let mut buf = Vec::new();
        record.encode_into(&mut buf).unwrap();
        // patch the type tag from Unknown(0) to 16
        buf[14] = 16;

        let parsed = Record::parse(&mut MsgCursor::new(&buf)).unwrap();
        assert_eq!(parsed.rtype, RecordType::Unknown(16));
        assert_eq!(parsed.rdata(), &Rdata::Unknown(b"\x04text".to_vec()));
    }

    #[test]
    fn truncated_response_is_rejected() {
        let mut header = Header::new_response_header(1, RCode::NOERROR, [0, 0]);
        header.flags.tc = true;
        let mut buf = Vec::new();
        header.encode_into(&mut buf).unwrap();

        assert!(matches!(
            Message::parse(&mut MsgCursor::new(&buf)),
            Err(ParseError::TruncatedMessage)
        ));
    }

    #[test]
    fn response_message_roundtrip() {
        let answers = vec![
            Record::new(
                Name::from_ascii("example.com").unwrap(),
                Class::IN,
                300,
                Rdata::MX(MX {
                    preference: 10,
                    exchange: Name::from_ascii("mail1.example.com").unwrap(),
                }),
            )
            .unwrap(),
            Record::new(
                Name::from_ascii("example.com").unwrap(),
                Class::IN,
                300,
                Rdata::A(A {
                    address: "192.0.2.1".parse().unwrap(),
                }),
            )
            .unwrap(),
        ];
        let msg = Message::new_response(0x1234, RCode::NOERROR, vec![example_question()], answers);

        let encoded = msg.encode().unwrap();
        let parsed = Message::parse(&mut MsgCursor::new(&encoded)).unwrap();
        assert_eq!(parsed, msg);
    }
}
