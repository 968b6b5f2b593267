//! Byte-stream transport.
//!
//! The client only needs a connected stream with blocking send and
//! receive. The trait seam exists so tests can drive the whole stack with
//! a scripted in-memory transport instead of a live instrument.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Transport-level failures.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Underlying socket error.
    #[error("socket I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The instrument closed the connection.
    #[error("instrument closed the connection")]
    PeerClosed,

    /// No reply arrived within the configured read timeout.
    #[error("timed out waiting for instrument reply")]
    Timeout,

    /// The address did not resolve to a usable socket address.
    #[error("could not resolve {0}")]
    Resolve(String),
}

/// A connected, blocking byte stream.
///
/// No buffering across calls: one `receive` returns whatever the peer sent
/// in one write, up to `max_len` bytes. MacNet responses arrive as a
/// single write not exceeding the configured buffer size; reassembly of
/// larger messages is out of scope.
pub trait Transport {
    /// Write the whole frame to the peer.
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportError>;

    /// Read up to `max_len` bytes. Zero bytes means the peer closed.
    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>, TransportError>;
}

/// TCP transport to a live instrument.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    /// Connect to the instrument.
    ///
    /// `read_timeout` bounds every receive; `None` blocks indefinitely,
    /// which reproduces the instrument vendor's reference behavior but is
    /// not recommended.
    pub fn connect(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        read_timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let addr = (host, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| TransportError::Resolve(format!("{}:{}", host, port)))?;
        let stream = TcpStream::connect_timeout(&addr, connect_timeout)?;
        stream.set_read_timeout(read_timeout)?;
        Ok(Self { stream })
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        self.stream.write_all(frame)?;
        Ok(())
    }

    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; max_len];
        let n = match self.stream.read(&mut buf) {
            Ok(n) => n,
            Err(e)
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut =>
            {
                return Err(TransportError::Timeout);
            }
            Err(e) => return Err(TransportError::Io(e)),
        };
        if n == 0 {
            return Err(TransportError::PeerClosed);
        }
        buf.truncate(n);
        Ok(buf)
    }
}
