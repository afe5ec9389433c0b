//! The resolution error kinds.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use mxdns_proto::error::{EncodeError, ParseError};
use mxdns_proto::RecordType;

/// Everything that can go wrong during a resolution, as a closed set of
/// inspectable kinds.
///
/// A failed resolution yields exactly one of these, describing the first
/// failure encountered; no partial results are ever returned and nothing is
/// retried internally. The only condition that is absorbed rather than
/// reported is a record of an unrecognized *type* inside an otherwise
/// well-formed response, which is filtered out of the result.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A query type other than MX was requested. Detected before any message
    /// is built or any I/O happens.
    #[error("Unsupported query type {0}: only MX lookups are exposed.")]
    UnsupportedQueryType(RecordType),

    /// The domain string was rejected by name validation, before any I/O.
    #[error("Invalid domain name.")]
    InvalidName(#[source] ParseError),

    /// The query message could not be encoded.
    #[error("Could not encode the query.")]
    Encode(#[from] EncodeError),

    /// No response datagram arrived within the configured bound.
    #[error("No response from {server} within {timeout:?}.")]
    Timeout {
        server: SocketAddr,
        timeout: Duration,
    },

    /// A socket, send or receive fault.
    #[error("Network error while talking to {server}.")]
    Network {
        server: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The response's transaction id, QR flag or echoed question does not
    /// match the outstanding query. The response is rejected as not
    /// correlated to the pending request (a spoofing/misdelivery guard).
    #[error("The response's transaction id or question does not match the query.")]
    TransactionMismatch,

    /// The response bytes could not be decoded: a bounds violation, a
    /// truncated record, or an invalid compression pointer.
    #[error("Malformed response.")]
    Malformed(#[from] ParseError),
}
