//! Command catalog.
//!
//! Maps each logical read operation to its fixed `(FClass, FNum)` opcode
//! pair and the set of params the instrument echoes back for validation.
//! The catalog is purely declarative: a new operation is a new table row,
//! not new control flow.

use super::envelope::ParamSet;
use super::RpcRequest;

/// Logical read operations supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Voltage readings for a run of channels (FClass 4, FNum 2).
    ReadVoltage,
    /// Current readings for a run of channels (FClass 4, FNum 3).
    ReadCurrent,
    /// Auxiliary inputs for one channel (FClass 4, FNum 4).
    ReadAux,
    /// Test file / procedure comment for one channel (FClass 4, FNum 6).
    ReadComment,
    /// Full channel status including RF1/RF2 (FClass 4, FNum 7).
    ReadChannel,
    /// SMB device status for one channel (FClass 7, FNum 1).
    SmbReadStatus,
    /// SMB register read via the scan list (FClass 7, FNum 4).
    SmbReadScanList,
}

/// One catalog row: opcode pair plus the param-matching set.
#[derive(Debug, Clone, Copy)]
pub struct OpSpec {
    /// Functional class.
    pub fclass: u16,
    /// Function number within the class.
    pub fnum: u16,
    /// Wire names of params the response must echo back verbatim.
    /// Empty for operations the firmware does not echo.
    pub validated: &'static [&'static str],
}

const CHAN_MATCH: &[&str] = &["FClass", "FNum", "Chan"];
const CHAN_LEN_MATCH: &[&str] = &["FClass", "FNum", "Chan", "Len"];

impl Operation {
    /// The catalog row for this operation.
    pub fn spec(&self) -> &'static OpSpec {
        match self {
            Operation::ReadVoltage => &OpSpec {
                fclass: 4,
                fnum: 2,
                validated: CHAN_LEN_MATCH,
            },
            Operation::ReadCurrent => &OpSpec {
                fclass: 4,
                fnum: 3,
                validated: CHAN_LEN_MATCH,
            },
            Operation::ReadAux => &OpSpec {
                fclass: 4,
                fnum: 4,
                validated: CHAN_MATCH,
            },
            Operation::ReadComment => &OpSpec {
                fclass: 4,
                fnum: 6,
                validated: CHAN_MATCH,
            },
            Operation::ReadChannel => &OpSpec {
                fclass: 4,
                fnum: 7,
                validated: CHAN_MATCH,
            },
            Operation::SmbReadStatus => &OpSpec {
                fclass: 7,
                fnum: 1,
                validated: CHAN_MATCH,
            },
            Operation::SmbReadScanList => &OpSpec {
                fclass: 7,
                fnum: 4,
                validated: &[],
            },
        }
    }

    /// Param names validated against the response echo.
    pub fn validated_fields(&self) -> &'static [&'static str] {
        self.spec().validated
    }

    /// Build the parameter set for this operation.
    ///
    /// `len` and `smb_reg_addr` are only meaningful for the operations
    /// that send them; the serializer drops unset fields from the wire.
    pub fn params(&self, chan: u32, len: Option<u32>, smb_reg_addr: Option<u32>) -> ParamSet {
        let spec = self.spec();
        ParamSet {
            fclass: spec.fclass,
            fnum: spec.fnum,
            chan: Some(chan),
            len,
            smb_reg_addr,
        }
    }

    /// Build a complete request envelope for this operation.
    pub fn request(&self, chan: u32, len: Option<u32>, smb_reg_addr: Option<u32>) -> RpcRequest {
        RpcRequest::new(self.params(chan, len, smb_reg_addr))
    }

    /// Operation name for logs and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ReadVoltage => "read_voltage",
            Operation::ReadCurrent => "read_current",
            Operation::ReadAux => "read_aux",
            Operation::ReadComment => "read_comment",
            Operation::ReadChannel => "read_channel",
            Operation::SmbReadStatus => "smb_read_status",
            Operation::SmbReadScanList => "smb_read_scan_list",
        }
    }
}
