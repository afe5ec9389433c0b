//! Driving a single query from built to resolved.
//!
//! A resolution moves through three stages: the query is *built* (validated
//! and encoded, before any I/O), *sent* (one datagram out, one bounded wait),
//! and *resolved* (the response correlated, decoded and filtered). Any
//! failure along the way is terminal; nothing is retried and no earlier
//! stage is revisited.

use tracing::debug;

use mxdns_proto::cursor::MsgCursor;
use mxdns_proto::{Message, Name, Rdata, RecordType};

use crate::error::ResolveError;
use crate::net::{AsyncTransport, AsyncUdpTransport, Transport, UdpTransport};
use crate::{QueryResult, ResolverConfig};

/// Resolves queries through a blocking [`Transport`].
///
/// Each call to [`resolve()`](Self::resolve) is an independent exchange with
/// its own transaction id and (for the UDP transport) its own socket, so
/// separate `Resolver` instances may run concurrently without coordination.
pub struct Resolver<T> {
    transport: T,
}

impl Resolver<UdpTransport> {
    /// Creates a resolver that queries `config.server` over UDP.
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            transport: UdpTransport::new(config.server, config.timeout),
        }
    }
}

impl<T: Transport> Resolver<T> {
    /// Creates a resolver on top of an arbitrary transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Resolves `qtype` records for `domain`.
    ///
    /// Only [`RecordType::MX`] is supported; any other type fails with
    /// [`ResolveError::UnsupportedQueryType`] before the transport is
    /// touched.
    pub fn resolve(&mut self, domain: &str, qtype: RecordType) -> Result<QueryResult, ResolveError> {
        let query = build_query(domain, qtype)?;
        let wire = query.encode()?;
        let raw = self.transport.exchange(&wire)?;
        interpret_response(&raw, &query)
    }
}

/// Resolves queries through an [`AsyncTransport`].
///
/// The async twin of [`Resolver`]: same stages, same guarantees, but the
/// wait for the response datagram suspends instead of blocking.
pub struct AsyncResolver<T> {
    transport: T,
}

impl AsyncResolver<AsyncUdpTransport> {
    /// Creates a resolver that queries `config.server` over UDP.
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            transport: AsyncUdpTransport::new(config.server, config.timeout),
        }
    }
}

impl<T: AsyncTransport> AsyncResolver<T> {
    /// Creates a resolver on top of an arbitrary transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Resolves `qtype` records for `domain`. See [`Resolver::resolve()`].
    pub async fn resolve(
        &mut self,
        domain: &str,
        qtype: RecordType,
    ) -> Result<QueryResult, ResolveError> {
        let query = build_query(domain, qtype)?;
        let wire = query.encode()?;
        let raw = self.transport.exchange(&wire).await?;
        interpret_response(&raw, &query)
    }
}

/// Validates the request and builds the query message. No I/O happens here;
/// every rejection in this function fires before a socket exists.
fn build_query(domain: &str, qtype: RecordType) -> Result<Message, ResolveError> {
    if qtype != RecordType::MX {
        return Err(ResolveError::UnsupportedQueryType(qtype));
    }

    let qname = Name::from_ascii(domain).map_err(ResolveError::InvalidName)?;
    let query = Message::new_query(qname, qtype)?;
    debug!(id = query.header.msg_id, domain, "query built");
    Ok(query)
}

/// Decodes the response, checks that it belongs to `query` and extracts the
/// mail exchangers.
fn interpret_response(raw: &[u8], query: &Message) -> Result<QueryResult, ResolveError> {
    let response = Message::parse(&mut MsgCursor::new(raw))?;

    if !response.header.qr
        || response.header.msg_id != query.header.msg_id
        || response.questions != query.questions
    {
        return Err(ResolveError::TransactionMismatch);
    }

    let records: Vec<_> = response
        .answers
        .into_iter()
        .filter_map(|record| match record.into_rdata() {
            Rdata::MX(mx) => Some(mx),
            // any other answer record (a stray CNAME, an unknown type) is
            // intentionally dropped: the public contract yields mail
            // exchangers and nothing else
            Rdata::A(_) | Rdata::NS(_) | Rdata::CNAME(_) | Rdata::Unknown(_) => None,
        })
        .collect();

    debug!(id = response.header.msg_id, count = records.len(), "query resolved");
    Ok(QueryResult { records })
}
