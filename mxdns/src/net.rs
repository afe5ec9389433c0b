//! Network-related code, i.e. actually sending queries and receiving
//! answers.
//!
//! A transport performs exactly one exchange: one datagram out, one bounded
//! wait, one datagram back (or an error). There is no retry; whether a
//! failed exchange is worth repeating is the caller's decision, not the
//! transport's. Each exchange owns its socket for the duration of the call,
//! so the socket is released on every exit path, including timeouts, and
//! concurrent resolutions never share state.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::ResolveError;

/// Google's public resolver, the default destination for queries.
pub const DEFAULT_RESOLVER: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 53));

/// The maximum payload of a DNS message over UDP without EDNS, which this
/// client does not speak.
pub const MAX_UDP_PAYLOAD: usize = 512;

/// A blocking single-exchange transport.
pub trait Transport {
    /// Sends `query` and waits for a single response datagram.
    fn exchange(&mut self, query: &[u8]) -> Result<Vec<u8>, ResolveError>;
}

/// An asynchronous single-exchange transport. The wait for the response is a
/// genuine suspension point and is cancelled by the configured timeout.
#[async_trait]
pub trait AsyncTransport {
    /// Sends `query` and waits for a single response datagram.
    async fn exchange(&mut self, query: &[u8]) -> Result<Vec<u8>, ResolveError>;
}

/// Sends queries over UDP from a blocking context.
#[derive(Clone, Debug)]
pub struct UdpTransport {
    /// The resolver to send queries to.
    pub server: SocketAddr,
    /// How long to wait for a response datagram.
    pub timeout: Duration,
}

impl UdpTransport {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    fn network_error(&self, source: io::Error) -> ResolveError {
        ResolveError::Network {
            server: self.server,
            source,
        }
    }

    fn timeout_error(&self) -> ResolveError {
        ResolveError::Timeout {
            server: self.server,
            timeout: self.timeout,
        }
    }
}

impl Transport for UdpTransport {
    fn exchange(&mut self, query: &[u8]) -> Result<Vec<u8>, ResolveError> {
        // match the bind address family to the destination; binding to ::
        // and connecting to an IPv4 address misbehaves on some platforms
        let socket = UdpSocket::bind(bind_addr(&self.server)).map_err(|e| self.network_error(e))?;
        socket
            .set_write_timeout(Some(self.timeout))
            .map_err(|e| self.network_error(e))?;
        socket
            .set_read_timeout(Some(self.timeout))
            .map_err(|e| self.network_error(e))?;
        socket
            .connect(self.server)
            .map_err(|e| self.network_error(e))?;

        socket.send(query).map_err(|e| self.network_error(e))?;
        debug!(server = %self.server, bytes = query.len(), "query sent");

        let mut buf = vec![0; MAX_UDP_PAYLOAD];
        let received = socket.recv(&mut buf).map_err(|e| {
            if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) {
                self.timeout_error()
            } else {
                self.network_error(e)
            }
        })?;
        trace!(bytes = received, "response received");

        buf.truncate(received);
        Ok(buf)
        // socket dropped (and thus closed) here, on this and every earlier
        // return path
    }
}

/// Sends queries over UDP from an async context.
#[derive(Clone, Debug)]
pub struct AsyncUdpTransport {
    /// The resolver to send queries to.
    pub server: SocketAddr,
    /// How long to wait for a response datagram.
    pub timeout: Duration,
}

impl AsyncUdpTransport {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    fn network_error(&self, source: io::Error) -> ResolveError {
        ResolveError::Network {
            server: self.server,
            source,
        }
    }
}

#[async_trait]
impl AsyncTransport for AsyncUdpTransport {
    async fn exchange(&mut self, query: &[u8]) -> Result<Vec<u8>, ResolveError> {
        let socket = tokio::net::UdpSocket::bind(bind_addr(&self.server))
            .await
            .map_err(|e| self.network_error(e))?;
        socket
            .connect(self.server)
            .await
            .map_err(|e| self.network_error(e))?;

        socket
            .send(query)
            .await
            .map_err(|e| self.network_error(e))?;
        debug!(server = %self.server, bytes = query.len(), "query sent");

        let mut buf = vec![0; MAX_UDP_PAYLOAD];
        let received = match tokio::time::timeout(self.timeout, socket.recv(&mut buf)).await {
            Ok(Ok(received)) => received,
            Ok(Err(e)) => return Err(self.network_error(e)),
            Err(_elapsed) => {
                return Err(ResolveError::Timeout {
                    server: self.server,
                    timeout: self.timeout,
                })
            }
        };
        trace!(bytes = received, "response received");

        buf.truncate(received);
        Ok(buf)
    }
}

fn bind_addr(server: &SocketAddr) -> (&'static str, u16) {
    if server.is_ipv6() {
        ("::", 0)
    } else {
        ("0.0.0.0", 0)
    }
}
