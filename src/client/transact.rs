//! Transaction engine.
//!
//! A transaction serializes one request, exchanges it on the transport,
//! and parses the reply. Validated transactions additionally check that
//! the response echoes the request's identifying params; the instrument's
//! firmware can return a stale or misrouted result under load, and the
//! echo check detects that without protocol sequence numbers. A mismatch
//! re-sends the whole request, up to the retry bound.
//!
//! Each inner attempt produces an explicit outcome value that the bounded
//! retry loop inspects; failures are data here, not unwound faults.

use tracing::{debug, warn};

use crate::error::MacNetError;
use crate::protocol::{RpcRequest, RpcResponse};
use crate::transport::{Transport, TransportError};

use super::MacNetClient;

/// Outcome of one send/receive/parse/match attempt.
#[derive(Debug)]
enum Attempt {
    /// Response parsed and every validated field matched.
    Matched(RpcResponse),
    /// The socket failed or the peer went away.
    Transport(TransportError),
    /// The reply was not a well-formed response envelope.
    Parse(String),
    /// The reply was an error payload or otherwise carried no result.
    NoResult,
    /// An echoed param differed from what was sent.
    Mismatch { field: &'static str },
}

impl<T: Transport> MacNetClient<T> {
    /// Execute one transaction.
    ///
    /// With an empty `validate` set this is a single exchange: transport
    /// and parse failures propagate immediately and the response is
    /// returned as-is, error payloads included. With a non-empty set the
    /// exchange is retried up to `max_retries` times until a response
    /// echoes every named param; exhaustion fails with
    /// [`MacNetError::ValidationExhausted`].
    pub fn transact(
        &mut self,
        request: &RpcRequest,
        validate: &[&'static str],
        max_retries: u32,
    ) -> Result<RpcResponse, MacNetError> {
        let wire = request.to_wire()?;

        if validate.is_empty() {
            let frame = self.exchange(&wire)?;
            return RpcResponse::parse(&frame);
        }

        for attempt in 1..=max_retries {
            match self.attempt(&wire, request, validate) {
                Attempt::Matched(response) => {
                    debug!(attempt, "transaction validated");
                    return Ok(response);
                }
                Attempt::Transport(e) => {
                    self.comm_errors += 1;
                    warn!(attempt, max_retries, error = %e, "transport failure");
                }
                Attempt::Parse(msg) => {
                    self.comm_errors += 1;
                    warn!(attempt, max_retries, %msg, "unparseable reply");
                }
                Attempt::NoResult => {
                    self.comm_errors += 1;
                    warn!(attempt, max_retries, "reply carried no result");
                }
                Attempt::Mismatch { field } => {
                    self.comm_errors += 1;
                    warn!(attempt, max_retries, field, "response echo mismatch");
                }
            }
        }

        Err(MacNetError::ValidationExhausted {
            attempts: max_retries,
        })
    }

    /// One inner attempt: exchange, parse, match the echoed params.
    fn attempt(&mut self, wire: &[u8], request: &RpcRequest, validate: &[&'static str]) -> Attempt {
        let frame = match self.exchange(wire) {
            Ok(frame) => frame,
            Err(e) => return Attempt::Transport(e),
        };
        let response = match RpcResponse::parse(&frame) {
            Ok(response) => response,
            Err(MacNetError::Parse(msg)) => return Attempt::Parse(msg),
            // RpcResponse::parse only fails with Parse.
            Err(_) => return Attempt::Parse("unexpected parse failure".to_string()),
        };
        let result = match response.result.as_ref() {
            Some(result) => result,
            None => return Attempt::NoResult,
        };
        for &field in validate {
            let sent = request.params.field(field);
            if sent.is_none() || result.get(field) != sent.as_ref() {
                return Attempt::Mismatch { field };
            }
        }
        Attempt::Matched(response)
    }

    /// Raw send/receive round trip.
    fn exchange(&mut self, wire: &[u8]) -> Result<Vec<u8>, TransportError> {
        debug!(len = wire.len(), "sending request");
        self.transport.send(wire)?;
        let frame = self.transport.receive(self.config.buf_size)?;
        debug!(len = frame.len(), "received reply");
        Ok(frame)
    }
}
