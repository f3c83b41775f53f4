//! EcoFlow USB vendor and product ID constants.
//!
//! VID `0x3746` is assigned to EcoFlow Technology Inc.
//!
//! Sources: USB captures of a River 3 Plus unit (`lsusb` reports
//! `3746:ffff`), the sysfs HID name `0003:3746:FFFF.*` observed on Linux,
//! and community reports from other River-series owners.

/// EcoFlow USB Vendor ID.
pub const ECOFLOW_VENDOR_ID: u16 = 0x3746;

/// River 3 Plus portable power station (confirmed from device capture).
///
/// PID `0xFFFF` looks like a placeholder but is what the shipping firmware
/// actually enumerates with; several EcoFlow models share it and are told
/// apart over the vendor protocol, not by USB identity.
pub const PID_RIVER_3_PLUS: u16 = 0xFFFF;

/// Returns `true` if the VID/PID pair identifies a known EcoFlow device.
pub fn is_ecoflow(vid: u16, pid: u16) -> bool {
    vid == ECOFLOW_VENDOR_ID && matches!(pid, PID_RIVER_3_PLUS)
}

/// Returns `true` if `pid` is the River 3 Plus product ID (VID not checked).
pub fn is_river_3_plus(pid: u16) -> bool {
    pid == PID_RIVER_3_PLUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn river_3_plus_recognised() {
        assert!(is_ecoflow(ECOFLOW_VENDOR_ID, PID_RIVER_3_PLUS));
        assert!(is_river_3_plus(PID_RIVER_3_PLUS));
    }

    #[test]
    fn wrong_vid_not_recognised() {
        assert!(!is_ecoflow(0x0000, PID_RIVER_3_PLUS));
        assert!(!is_ecoflow(0x1DD2, PID_RIVER_3_PLUS)); // Leo Bodnar VID
    }

    #[test]
    fn unknown_pid_not_recognised() {
        assert!(!is_ecoflow(ECOFLOW_VENDOR_ID, 0x0001));
        assert!(!is_river_3_plus(0x0001));
    }
}
