//! Scripted transport for tests.
//!
//! Plays back a queue of canned replies (frames or injected transport
//! failures) and records every frame the client sends, so tests can
//! assert on attempt counts and wire bytes without a live instrument.

use std::collections::VecDeque;

use serde_json::Value;

use crate::transport::{Transport, TransportError};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Return these bytes from the next receive.
    Frame(Vec<u8>),
    /// Fail the next receive as if the peer closed.
    PeerClosed,
    /// Fail the next receive with a read timeout.
    Timeout,
}

/// In-memory transport driven by a reply script.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<Reply>,
    /// Replayed once the queue is empty, forever.
    fallback: Option<Reply>,
    sent: Vec<Vec<u8>>,
}

impl ScriptedTransport {
    /// New transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw frame reply.
    pub fn enqueue_frame(&mut self, frame: impl Into<Vec<u8>>) {
        self.replies.push_back(Reply::Frame(frame.into()));
    }

    /// Queue a JSON value as a reply frame.
    pub fn enqueue_json(&mut self, value: &Value) {
        self.enqueue_frame(value.to_string().into_bytes());
    }

    /// Queue a transport failure.
    pub fn enqueue_failure(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }

    /// Reply to use once the queue runs out.
    pub fn set_fallback_json(&mut self, value: &Value) {
        self.fallback = Some(Reply::Frame(value.to_string().into_bytes()));
    }

    /// Frames the client has sent, in order.
    pub fn sent_frames(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Number of request frames sent, i.e. inner attempts performed.
    pub fn attempts(&self) -> usize {
        self.sent.len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        self.sent.push(frame.to_vec());
        Ok(())
    }

    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>, TransportError> {
        let reply = match self.replies.pop_front().or_else(|| self.fallback.clone()) {
            Some(reply) => reply,
            None => panic!("scripted transport ran out of replies"),
        };
        match reply {
            Reply::Frame(mut frame) => {
                frame.truncate(max_len);
                Ok(frame)
            }
            Reply::PeerClosed => Err(TransportError::PeerClosed),
            Reply::Timeout => Err(TransportError::Timeout),
        }
    }
}
