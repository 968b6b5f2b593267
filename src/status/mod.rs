//! Status code decoding.
//!
//! A full channel read returns two independent status codes: RF1 carries
//! the channel state and RF2 carries the active step type or the end /
//! safety condition that stopped it. The two code spaces are unrelated;
//! each gets its own table.
//!
//! Firmware revisions add codes, so an unknown code is an expected input.
//! Decoding never fails; codes outside a table map to that table's
//! sentinel name.

/// Name returned for RF1 codes not in the table.
pub const RF1_UNKNOWN: &str = "Unknown RF1 state";

/// Name returned for RF2 codes not in the table.
pub const RF2_UNKNOWN: &str = "Unknown RF2 state";

/// Decode an RF1 channel-state code.
pub fn decode_rf1(code: u16) -> &'static str {
    match code {
        0 => "Available",
        1 => "Transition",
        2 => "Unsafe",
        3 => "AdvCycle",
        4 => "Pause",
        5 => "Start",
        6 => "Resume",
        7 => "Jump",
        8 => "Suspended",
        16 => "Run",
        17 => "Stop",
        18 => "Hold",
        24 => "External",
        25 => "Schedule",
        26 => "Calibrate",
        28 => "Standby",
        30 => "Aborted",
        31 => "Complete",
        _ => RF1_UNKNOWN,
    }
}

/// Decode an RF2 step-type / end / safety code.
///
/// Blocks: 0-7 idle and hold reasons, 128+ active step types, 192+ end
/// codes, 224+ safety trips, 250+ system conditions.
pub fn decode_rf2(code: u16) -> &'static str {
    match code {
        0 => "Idle",
        1 => "Preparing",
        2 => "Settling",
        3 => "Queued",
        4 => "Front_Panel_Hold",
        5 => "Remote_Hold",
        6 => "Safety_Hold",
        7 => "Waiting",
        128 => "Rest",
        129 => "Set_Variable",
        130 => "Charge",
        131 => "Discharge",
        132 => "Current",
        133 => "Voltage",
        134 => "Power",
        135 => "Resistance",
        136 => "CCCV",
        137 => "CV",
        138 => "CP",
        139 => "CR",
        140 => "Ramp_Current",
        141 => "Ramp_Voltage",
        142 => "Ramp_Power",
        143 => "Pulse",
        144 => "FRA",
        145 => "Loop_1",
        146 => "Loop_2",
        147 => "Do_1",
        148 => "Do_2",
        149 => "AdvCycle_Step",
        150 => "End_Step",
        151 => "SMB_Step",
        192 => "Step_End",
        193 => "Normal_End",
        194 => "Step_Time_End",
        195 => "Test_Time_End",
        196 => "Voltage_End",
        197 => "Current_End",
        198 => "Capacity_End",
        199 => "Energy_End",
        200 => "Aux_End",
        201 => "Loop_End",
        202 => "Operator_Stop",
        203 => "Schedule_Stop",
        204 => "Remote_Stop",
        205 => "Power_Fail_Stop",
        206 => "SMB_End",
        207 => "Watchdog_End",
        224 => "Voltage_High_Safety",
        225 => "Voltage_Low_Safety",
        226 => "Current_High_Safety",
        227 => "Current_Low_Safety",
        228 => "Capacity_Safety",
        229 => "Energy_Safety",
        230 => "Temperature_High_Safety",
        231 => "Temperature_Low_Safety",
        232 => "Aux_High_Safety",
        233 => "Aux_Low_Safety",
        234 => "Voltage_Clamp",
        235 => "Current_Clamp",
        236 => "Hardware_Fault",
        237 => "Cell_Reversal",
        238 => "Contact_Fault",
        239 => "Interlock_Open",
        250 => "Not_Ready",
        251 => "Calibration_Invalid",
        252 => "Firmware_Update",
        253 => "Comm_Loss",
        254 => "Channel_Fault",
        255 => "Buffer_Full",
        _ => RF2_UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rf1_known_codes() {
        assert_eq!(decode_rf1(0), "Available");
        assert_eq!(decode_rf1(3), "AdvCycle");
        assert_eq!(decode_rf1(31), "Complete");
    }

    #[test]
    fn test_rf1_unknown_is_sentinel() {
        assert_eq!(decode_rf1(99), RF1_UNKNOWN);
        assert_eq!(decode_rf1(u16::MAX), RF1_UNKNOWN);
    }

    #[test]
    fn test_rf2_known_codes() {
        assert_eq!(decode_rf2(132), "Current");
        assert_eq!(decode_rf2(193), "Normal_End");
        assert_eq!(decode_rf2(255), "Buffer_Full");
    }

    #[test]
    fn test_rf2_unknown_is_sentinel() {
        assert_eq!(decode_rf2(9999), RF2_UNKNOWN);
        assert_eq!(decode_rf2(100), RF2_UNKNOWN);
    }

    #[test]
    fn test_sentinels_are_distinct() {
        assert_ne!(RF1_UNKNOWN, RF2_UNKNOWN);
    }
}
