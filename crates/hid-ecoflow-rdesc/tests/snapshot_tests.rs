//! Snapshot tests pinning the River 3 Plus identity and defect-signature
//! constants, to catch accidental regressions in values that must only
//! ever change together with a hardware capture.

use hid_ecoflow_rdesc::{
    DEFECTIVE_RDESC_LEN, ECOFLOW_VENDOR_ID, MISSING_END_COLLECTIONS, PATCHED_RDESC_LEN,
    PID_RIVER_3_PLUS, River3PlusRdescFixup,
};
use hid_fixup_common::{DescriptorBuffer, END_COLLECTION, RdescFixup};
use insta::assert_debug_snapshot;

#[test]
fn test_snapshot_river_3_plus_identity() {
    let id = River3PlusRdescFixup::device_id();
    let summary = format!("device={id}, vid={ECOFLOW_VENDOR_ID:#06x}, pid={PID_RIVER_3_PLUS:#06x}");
    assert_debug_snapshot!(summary);
}

#[test]
fn test_snapshot_defect_signature_constants() {
    let summary = format!(
        "defective_len={DEFECTIVE_RDESC_LEN}, missing_end_collections={MISSING_END_COLLECTIONS}, \
         patched_len={PATCHED_RDESC_LEN}, end_collection={END_COLLECTION:#04X}"
    );
    assert_debug_snapshot!(summary);
}

#[test]
fn test_snapshot_patched_tail() {
    let mut data = [0u8; 4096];
    let mut buf = DescriptorBuffer::new(&mut data, DEFECTIVE_RDESC_LEN);
    let outcome = River3PlusRdescFixup.fixup(&mut buf);
    let tail = &buf.bytes()[DEFECTIVE_RDESC_LEN..];
    let summary = format!(
        "patched={}, len={}, tail={tail:02X?}",
        outcome.is_patched(),
        buf.len()
    );
    assert_debug_snapshot!(summary);
}
