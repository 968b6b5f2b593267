//! MacNet client façade.
//!
//! One client owns one connection and performs one blocking transaction
//! at a time; `&mut self` on every read keeps concurrent use out at
//! compile time. Wrap the client in a mutex if it must be shared.

mod transact;

use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::MacNetError;
use crate::protocol::results::{from_result, take_field};
use crate::protocol::{ChannelStatus, Operation, RpcResponse};
use crate::transport::{TcpTransport, Transport, TransportError};

/// Client for one MacNet instrument connection.
pub struct MacNetClient<T: Transport> {
    transport: T,
    config: ClientConfig,
    /// Failed inner attempts over the life of the session. Observational
    /// only; never drives control flow.
    comm_errors: u64,
}

impl MacNetClient<TcpTransport> {
    /// Connect to the instrument named in the configuration.
    pub fn connect(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = TcpTransport::connect(
            &config.host,
            config.port,
            config.connect_timeout(),
            config.read_timeout(),
        )?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> MacNetClient<T> {
    /// Build a client over an already-connected transport.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            comm_errors: 0,
        }
    }

    /// Failed inner attempts since the session was opened.
    pub fn comm_errors(&self) -> u64 {
        self.comm_errors
    }

    /// The underlying transport (tests inspect the scripted one).
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Read voltages for `read_num` channels starting at `start_ch`, in
    /// volts.
    pub fn read_voltage(&mut self, start_ch: u32, read_num: u32) -> Result<Vec<f64>, MacNetError> {
        let result = self.read_op(Operation::ReadVoltage, start_ch, Some(read_num), None)?;
        take_field(&result, "Voltage")
    }

    /// Read currents for `read_num` channels starting at `start_ch`, in
    /// amps.
    pub fn read_current(&mut self, start_ch: u32, read_num: u32) -> Result<Vec<f64>, MacNetError> {
        let result = self.read_op(Operation::ReadCurrent, start_ch, Some(read_num), None)?;
        take_field(&result, "Current")
    }

    /// Read the auxiliary inputs of one channel.
    ///
    /// Aux payloads vary with the installed hardware, so the raw result
    /// map is returned instead of a fixed schema.
    pub fn read_aux(&mut self, channel: u32) -> Result<Map<String, Value>, MacNetError> {
        self.read_op(Operation::ReadAux, channel, None, None)
    }

    /// Read the test file and procedure comment of one channel.
    pub fn read_comment(&mut self, channel: u32) -> Result<Map<String, Value>, MacNetError> {
        self.read_op(Operation::ReadComment, channel, None, None)
    }

    /// Read the full status of one channel, RF1/RF2 codes included.
    pub fn read_channel(&mut self, channel: u32) -> Result<ChannelStatus, MacNetError> {
        let result = self.read_op(Operation::ReadChannel, channel, None, None)?;
        from_result(result)
    }

    /// Read the SMB device status of one channel.
    pub fn smb_read_status(&mut self, channel: u32) -> Result<Map<String, Value>, MacNetError> {
        self.read_op(Operation::SmbReadStatus, channel, None, None)
    }

    /// Read one SMB register through the scan list.
    ///
    /// The firmware does not echo params for this opcode, so the exchange
    /// is unvalidated and never retried.
    pub fn smb_read_scan_list(&mut self, channel: u32, reg_addr: u32) -> Result<i64, MacNetError> {
        let result = self.read_op(Operation::SmbReadScanList, channel, None, Some(reg_addr))?;
        take_field(&result, "SMBRegValue")
    }

    /// Shared read path: build from the catalog, transact with the
    /// catalog's param-matching set, unwrap the result payload.
    fn read_op(
        &mut self,
        op: Operation,
        chan: u32,
        len: Option<u32>,
        smb_reg_addr: Option<u32>,
    ) -> Result<Map<String, Value>, MacNetError> {
        let request = op.request(chan, len, smb_reg_addr);
        let max_retries = self.config.max_retries;
        let response = self.transact(&request, op.validated_fields(), max_retries)?;
        Self::into_result(response)
    }

    /// Split a response into its result, converting an error payload into
    /// the typed remote failure.
    fn into_result(response: RpcResponse) -> Result<Map<String, Value>, MacNetError> {
        if let Some(remote) = response.error {
            return Err(MacNetError::Remote {
                code: remote.code,
                message: remote.message,
            });
        }
        // parse() guarantees one of the two is present.
        response
            .result
            .ok_or_else(|| MacNetError::Parse("response carries no result".to_string()))
    }
}
