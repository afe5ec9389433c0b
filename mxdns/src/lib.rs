//! `mxdns` resolves the mail exchangers of a domain.
//!
//! It sends a single DNS query over UDP, waits (bounded by a timeout) for
//! one response datagram, and decodes the answer into the ordered list of
//! [`MX`] records, exactly as the server sent them. The wire format lives in
//! [`mxdns_proto`], re-exported here as [`proto`].
//!
//! # Basic usage example
//! ```rust,no_run
//! use mxdns::{query, proto::RecordType};
//!
//! let result = query("example.com", RecordType::MX).unwrap();
//! for mx in &result.records {
//!     println!("{} {}", mx.preference, mx.exchange);
//! }
//! ```
//!
//! Only MX lookups are exposed: requesting any other record type fails with
//! [`ResolveError::UnsupportedQueryType`] before anything is sent.

use std::net::SocketAddr;
use std::time::Duration;

use mxdns_proto::rdata::MX;
use mxdns_proto::RecordType;

pub mod error;
pub mod net;
pub mod resolver;

pub use error::ResolveError;
pub use mxdns_proto as proto;
pub use resolver::{AsyncResolver, Resolver};

/// Where to send queries and how long to wait for the answer.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    /// The resolver to query. Defaults to [`net::DEFAULT_RESOLVER`].
    pub server: SocketAddr,
    /// How long to wait for a response datagram. Defaults to five seconds.
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            server: net::DEFAULT_RESOLVER,
            timeout: Duration::from_secs(5),
        }
    }
}

/// The outcome of a successful resolution: the mail exchangers from the
/// response's answer section, in wire order (not re-sorted by preference).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryResult {
    /// The decoded mail exchange records.
    pub records: Vec<MX>,
}

impl QueryResult {
    /// Returns true iff the answer contained no mail exchangers.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Resolves `qtype` records for `domain` using the default configuration
/// (public resolver, five second timeout). Only [`RecordType::MX`] is
/// supported.
pub fn query(domain: &str, qtype: RecordType) -> Result<QueryResult, ResolveError> {
    query_with(&ResolverConfig::default(), domain, qtype)
}

/// Like [`query()`], with an explicit resolver address and timeout.
pub fn query_with(
    config: &ResolverConfig,
    domain: &str,
    qtype: RecordType,
) -> Result<QueryResult, ResolveError> {
    Resolver::new(config).resolve(domain, qtype)
}

/// The asynchronous equivalent of [`query()`]. The wait for the response is
/// a suspension point, not a blocked thread.
pub async fn query_async(domain: &str, qtype: RecordType) -> Result<QueryResult, ResolveError> {
    query_async_with(&ResolverConfig::default(), domain, qtype).await
}

/// Like [`query_async()`], with an explicit resolver address and timeout.
pub async fn query_async_with(
    config: &ResolverConfig,
    domain: &str,
    qtype: RecordType,
) -> Result<QueryResult, ResolveError> {
    AsyncResolver::new(config).resolve(domain, qtype).await
}
