//! Typed result payloads.
//!
//! Result extraction is schema-checked instead of indexed blindly: a
//! missing or mis-shaped field is a parse failure the caller can match on,
//! not a lookup panic.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::MacNetError;
use crate::status;

/// Pull a named field out of a result map and deserialize it.
pub(crate) fn take_field<T: DeserializeOwned>(
    result: &Map<String, Value>,
    name: &str,
) -> Result<T, MacNetError> {
    let value = result
        .get(name)
        .ok_or_else(|| MacNetError::Parse(format!("result is missing the {} field", name)))?;
    serde_json::from_value(value.clone())
        .map_err(|e| MacNetError::Parse(format!("malformed {} field: {}", name, e)))
}

/// Deserialize a whole result map into a typed payload.
pub(crate) fn from_result<T: DeserializeOwned>(
    result: Map<String, Value>,
) -> Result<T, MacNetError> {
    serde_json::from_value(Value::Object(result))
        .map_err(|e| MacNetError::Parse(format!("malformed result payload: {}", e)))
}

/// Full channel status (FClass 4, FNum 7).
///
/// The fixed fields cover every firmware revision seen in the field; the
/// `extra` map keeps whatever else a newer revision adds, including the
/// echoed opcode pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChannelStatus {
    /// Channel index this status describes.
    #[serde(rename = "Chan")]
    pub chan: u32,
    /// Channel-state code, decoded via the RF1 table.
    #[serde(rename = "RF1")]
    pub rf1: u16,
    /// Step-type / end / safety code, decoded via the RF2 table.
    #[serde(rename = "RF2")]
    pub rf2: u16,
    /// Current cycle number, if the firmware reports it.
    #[serde(rename = "Cycle", default)]
    pub cycle: Option<u32>,
    /// Current step number within the test procedure.
    #[serde(rename = "Step", default)]
    pub step: Option<u32>,
    /// Elapsed test time in seconds.
    #[serde(rename = "TestTime", default)]
    pub test_time: Option<f64>,
    /// Elapsed time in the current step, seconds.
    #[serde(rename = "StepTime", default)]
    pub step_time: Option<f64>,
    /// Most recent voltage sample, volts.
    #[serde(rename = "Voltage", default)]
    pub voltage: Option<f64>,
    /// Most recent current sample, amps.
    #[serde(rename = "Current", default)]
    pub current: Option<f64>,
    /// Accumulated capacity, amp-hours.
    #[serde(rename = "Capacity", default)]
    pub capacity: Option<f64>,
    /// Accumulated energy, watt-hours.
    #[serde(rename = "Energy", default)]
    pub energy: Option<f64>,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChannelStatus {
    /// Decoded RF1 state name.
    pub fn rf1_name(&self) -> &'static str {
        status::decode_rf1(self.rf1)
    }

    /// Decoded RF2 state name.
    pub fn rf2_name(&self) -> &'static str {
        status::decode_rf2(self.rf2)
    }
}
