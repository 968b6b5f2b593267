//! MacNet protocol types.
//!
//! Defines the JSON-RPC envelope exchanged with the instrument and the
//! catalog of supported operations.

pub mod catalog;
pub mod envelope;
pub mod results;

pub use catalog::Operation;
pub use envelope::{ParamSet, RemoteError, RpcRequest, RpcResponse};
pub use results::ChannelStatus;

/// Fixed request ID sent in every envelope.
///
/// MacNet does not correlate requests and responses by ID; the instrument
/// echoes it back verbatim. Stale responses are detected by param matching
/// instead (see the transaction engine).
pub const CLIENT_ID: i64 = 1987;

/// JSON-RPC version string required by the instrument.
pub const JSONRPC_VERSION: &str = "2.0";

/// Method name for every MacNet call.
pub const METHOD: &str = "MacNet";
