//! Property-based tests for EcoFlow device identification.
//!
//! Uses proptest with 500 cases to verify invariants on the VID/PID
//! constants and the identification predicates.

use hid_ecoflow_rdesc::{ECOFLOW_VENDOR_ID, PID_RIVER_3_PLUS, is_ecoflow, is_river_3_plus};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// ECOFLOW_VENDOR_ID must always equal 0x3746 (EcoFlow Technology Inc.).
    #[test]
    fn prop_vendor_id_constant_is_ecoflow(_unused: u8) {
        prop_assert_eq!(ECOFLOW_VENDOR_ID, 0x3746u16,
            "ECOFLOW_VENDOR_ID must always be 0x3746 (EcoFlow Technology Inc.)");
    }

    /// is_ecoflow with the correct VID must agree with is_river_3_plus for any PID.
    #[test]
    fn prop_is_ecoflow_with_vendor_id_agrees_with_pid_check(pid: u16) {
        prop_assert_eq!(
            is_ecoflow(ECOFLOW_VENDOR_ID, pid),
            is_river_3_plus(pid),
            "is_ecoflow(ECOFLOW_VENDOR_ID, {:#06x}) must equal is_river_3_plus({:#06x})",
            pid, pid
        );
    }

    /// is_ecoflow with any VID other than ECOFLOW_VENDOR_ID must always return false.
    #[test]
    fn prop_wrong_vid_never_recognised(
        vid in any::<u16>().prop_filter("not EcoFlow VID", |v| *v != ECOFLOW_VENDOR_ID),
        pid: u16,
    ) {
        prop_assert!(!is_ecoflow(vid, pid),
            "VID {:#06x} must not be recognised as EcoFlow for any PID", vid);
    }

    /// is_river_3_plus must be true only for PID_RIVER_3_PLUS.
    #[test]
    fn prop_river_3_plus_pid_only(pid: u16) {
        prop_assert_eq!(is_river_3_plus(pid), pid == PID_RIVER_3_PLUS);
    }
}
