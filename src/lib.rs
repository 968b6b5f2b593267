//! MacNet client.
//!
//! This crate talks to the MacNet control protocol exposed by Maccor
//! battery-cycler test equipment: JSON-RPC over a long-lived TCP
//! connection. It reads channel telemetry (voltage, current, auxiliary
//! inputs, full channel status), reads SMB registers, and decodes the
//! instrument's RF1/RF2 status codes into names.
//!
//! The design is fully synchronous: one client owns one connection and
//! one transaction is in flight at a time. Responses are validated
//! against the request's echoed parameters to detect stale replies from
//! a loaded instrument, with a bounded retry on mismatch.

pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod protocol;
pub mod status;
pub mod transport;

pub use client::MacNetClient;
pub use config::ClientConfig;
pub use error::MacNetError;
pub use protocol::{ChannelStatus, Operation, ParamSet, RemoteError, RpcRequest, RpcResponse};
pub use transport::{TcpTransport, Transport, TransportError};
