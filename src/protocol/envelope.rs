//! JSON-RPC envelope types.
//!
//! One self-contained JSON object per message, UTF-8. The instrument's
//! firmware rejects anything that is not strictly double-quoted JSON;
//! `serde_json` produces exactly that, so serialization never needs the
//! quote fixups the instrument's manual warns about.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CLIENT_ID, JSONRPC_VERSION, METHOD};
use crate::error::MacNetError;

/// Request envelope.
///
/// `id` is the fixed [`CLIENT_ID`] sentinel; see the module docs on why it
/// carries no correlation meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// JSON-RPC version, always "2.0".
    pub jsonrpc: String,
    /// Method name, always "MacNet".
    pub method: String,
    /// Operation parameters (opcode pair plus addressing fields).
    pub params: ParamSet,
    /// Fixed request ID.
    pub id: i64,
}

impl RpcRequest {
    /// Wrap a parameter set in the standard envelope.
    pub fn new(params: ParamSet) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: METHOD.to_string(),
            params,
            id: CLIENT_ID,
        }
    }

    /// Serialize to wire bytes.
    pub fn to_wire(&self) -> Result<Vec<u8>, MacNetError> {
        serde_json::to_vec(self).map_err(|e| MacNetError::Parse(e.to_string()))
    }
}

/// Operation parameters.
///
/// `FClass`/`FNum` are the two-part opcode selecting the operation; the
/// remaining fields address a channel or SMB register and are omitted from
/// the wire when unused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    /// Functional class (4 = channel telemetry, 7 = SMB).
    #[serde(rename = "FClass")]
    pub fclass: u16,
    /// Function number within the class.
    #[serde(rename = "FNum")]
    pub fnum: u16,
    /// Channel index on the instrument.
    #[serde(rename = "Chan", skip_serializing_if = "Option::is_none")]
    pub chan: Option<u32>,
    /// Count of channels to read (defaults to 1 when omitted).
    #[serde(rename = "Len", skip_serializing_if = "Option::is_none")]
    pub len: Option<u32>,
    /// SMB register address, scan-list reads only.
    #[serde(rename = "SMBRegAddr", skip_serializing_if = "Option::is_none")]
    pub smb_reg_addr: Option<u32>,
}

impl ParamSet {
    /// Look up a parameter by its wire name, as a JSON value.
    ///
    /// Used by the transaction engine to compare echoed response fields
    /// against what was sent. Returns `None` for params not set on this
    /// request (and for names that are not params at all).
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "FClass" => Some(Value::from(self.fclass)),
            "FNum" => Some(Value::from(self.fnum)),
            "Chan" => self.chan.map(Value::from),
            "Len" => self.len.map(Value::from),
            "SMBRegAddr" => self.smb_reg_addr.map(Value::from),
            _ => None,
        }
    }
}

/// Response envelope.
///
/// Exactly one of `result`/`error` is present; [`RpcResponse::parse`]
/// rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Success payload, operation-dependent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Map<String, Value>>,
    /// Instrument-reported failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RemoteError>,
}

impl RpcResponse {
    /// Parse wire bytes into a response, enforcing the result/error
    /// discriminant invariant.
    pub fn parse(bytes: &[u8]) -> Result<Self, MacNetError> {
        let response: RpcResponse = serde_json::from_slice(bytes)
            .map_err(|e| MacNetError::Parse(format!("invalid JSON from instrument: {}", e)))?;
        match (&response.result, &response.error) {
            (Some(_), None) | (None, Some(_)) => Ok(response),
            (Some(_), Some(_)) => Err(MacNetError::Parse(
                "response carries both result and error".to_string(),
            )),
            (None, None) => Err(MacNetError::Parse(
                "response carries neither result nor error".to_string(),
            )),
        }
    }
}

/// Error payload returned by the instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteError {
    /// Instrument error code (small negative integers in practice).
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Operation;

    #[test]
    fn test_request_wire_shape() {
        let req = RpcRequest::new(Operation::ReadVoltage.params(0, Some(24), None));
        let wire = req.to_wire().unwrap();
        let text = String::from_utf8(wire).unwrap();

        assert!(text.contains(r#""jsonrpc":"2.0""#));
        assert!(text.contains(r#""method":"MacNet""#));
        assert!(text.contains(r#""FClass":4"#));
        assert!(text.contains(r#""FNum":2"#));
        assert!(text.contains(r#""Chan":0"#));
        assert!(text.contains(r#""Len":24"#));
        assert!(text.contains(r#""id":1987"#));
        // The firmware rejects single-quoted pseudo-JSON.
        assert!(!text.contains('\''));
    }

    #[test]
    fn test_unused_params_omitted() {
        let req = RpcRequest::new(Operation::ReadChannel.params(5, None, None));
        let text = String::from_utf8(req.to_wire().unwrap()).unwrap();

        assert!(text.contains(r#""Chan":5"#));
        assert!(!text.contains("Len"));
        assert!(!text.contains("SMBRegAddr"));
    }

    #[test]
    fn test_request_roundtrip() {
        let req = RpcRequest::new(Operation::ReadCurrent.params(7, Some(8), None));
        let wire = req.to_wire().unwrap();
        let back: RpcRequest = serde_json::from_slice(&wire).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn test_param_field_lookup() {
        let params = Operation::SmbReadScanList.params(3, None, Some(22));
        assert_eq!(params.field("FClass"), Some(serde_json::json!(7)));
        assert_eq!(params.field("FNum"), Some(serde_json::json!(4)));
        assert_eq!(params.field("Chan"), Some(serde_json::json!(3)));
        assert_eq!(params.field("SMBRegAddr"), Some(serde_json::json!(22)));
        assert_eq!(params.field("Len"), None);
        assert_eq!(params.field("Voltage"), None);
    }

    #[test]
    fn test_response_parse_result() {
        let resp = RpcResponse::parse(br#"{"result":{"Voltage":[4.1]}}"#).unwrap();
        assert!(resp.result.is_some());
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_response_parse_error_shape() {
        let resp =
            RpcResponse::parse(br#"{"error":{"code":-1,"message":"bad channel"}}"#).unwrap();
        let err = resp.error.unwrap();
        assert_eq!(err.code, -1);
        assert_eq!(err.message, "bad channel");
    }

    #[test]
    fn test_response_rejects_both_and_neither() {
        assert!(RpcResponse::parse(br#"{}"#).is_err());
        assert!(
            RpcResponse::parse(br#"{"result":{},"error":{"code":0,"message":""}}"#).is_err()
        );
        assert!(RpcResponse::parse(b"not json").is_err());
    }
}
