//! The River 3 Plus report-descriptor fixup.
//!
//! Firmware V1.33.81.55 sends a 376-byte descriptor whose last three End
//! Collection items are missing, leaving three collections open at end of
//! input. Appending `C0 C0 C0` yields a descriptor the HID parser accepts.
//!
//! The defect signature is the exact byte length. Exact equality matters
//! twice over: a 379-byte descriptor has already been patched and must not
//! grow again, and any other length means a firmware revision this fixup
//! has never seen, where blind appends could corrupt a valid descriptor.

use hid_fixup_common::{
    DescriptorBuffer, DeviceId, FixupOutcome, FixupRegistry, FixupResult, RdescFixup,
    END_COLLECTION, scan,
};
use tracing::debug;

use crate::ids::{ECOFLOW_VENDOR_ID, PID_RIVER_3_PLUS};

/// Declared length of the defective descriptor from firmware V1.33.81.55.
pub const DEFECTIVE_RDESC_LEN: usize = 376;

/// Number of End Collection items the firmware leaves off.
pub const MISSING_END_COLLECTIONS: usize = 3;

/// Declared length after the fixup has run.
pub const PATCHED_RDESC_LEN: usize = DEFECTIVE_RDESC_LEN + MISSING_END_COLLECTIONS;

/// Descriptor fixup for the River 3 Plus firmware defect.
///
/// Stateless; one value can serve any number of invocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct River3PlusRdescFixup;

impl River3PlusRdescFixup {
    /// Registration key: River 3 Plus on USB, generic HID group.
    pub const fn device_id() -> DeviceId {
        DeviceId::usb_generic(ECOFLOW_VENDOR_ID, PID_RIVER_3_PLUS)
    }
}

impl RdescFixup for River3PlusRdescFixup {
    fn name(&self) -> &'static str {
        "river-3-plus-rdesc"
    }

    fn fixup(&self, rdesc: &mut DescriptorBuffer<'_>) -> FixupOutcome {
        if rdesc.len() != DEFECTIVE_RDESC_LEN {
            return FixupOutcome::Unchanged;
        }

        let summary = scan(rdesc.bytes());
        debug!(
            items = summary.items,
            open_collections = summary.open_collections,
            "descriptor matches V1.33.81.55 defect signature"
        );

        if !rdesc.append(&[END_COLLECTION; MISSING_END_COLLECTIONS]) {
            // Host granted less capacity than the patched length needs;
            // leaving the defect in place beats writing out of bounds.
            debug!(capacity = rdesc.capacity(), "declining fixup, no room to append");
            return FixupOutcome::Unchanged;
        }

        FixupOutcome::Patched {
            new_len: rdesc.len(),
        }
    }
}

/// Registers the River 3 Plus fixup with `registry`.
///
/// # Errors
/// Returns [`hid_fixup_common::FixupError::DuplicateDevice`] if a fixup is
/// already registered for the River 3 Plus identity.
pub fn register(registry: &mut FixupRegistry) -> FixupResult<()> {
    registry.register(
        River3PlusRdescFixup::device_id(),
        Box::new(River3PlusRdescFixup),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defective(capacity: usize) -> Vec<u8> {
        // Synthetic stand-in for the real 376-byte descriptor: the fixup
        // only keys on length, so content is arbitrary for these tests.
        vec![0x05u8; capacity]
    }

    #[test]
    fn patched_len_is_379() {
        assert_eq!(PATCHED_RDESC_LEN, 379);
    }

    #[test]
    fn appends_three_end_collections() {
        let mut data = defective(4096);
        let mut buf = DescriptorBuffer::new(&mut data, DEFECTIVE_RDESC_LEN);
        let outcome = River3PlusRdescFixup.fixup(&mut buf);
        assert_eq!(
            outcome,
            FixupOutcome::Patched {
                new_len: PATCHED_RDESC_LEN
            }
        );
        assert_eq!(
            &buf.bytes()[DEFECTIVE_RDESC_LEN..],
            &[END_COLLECTION; MISSING_END_COLLECTIONS]
        );
    }

    #[test]
    fn wrong_length_is_untouched() {
        let mut data = defective(4096);
        let mut buf = DescriptorBuffer::new(&mut data, 200);
        assert_eq!(River3PlusRdescFixup.fixup(&mut buf), FixupOutcome::Unchanged);
        assert_eq!(buf.len(), 200);
    }

    #[test]
    fn insufficient_capacity_declines() {
        let mut data = defective(DEFECTIVE_RDESC_LEN + 2);
        let mut buf = DescriptorBuffer::new(&mut data, DEFECTIVE_RDESC_LEN);
        assert_eq!(River3PlusRdescFixup.fixup(&mut buf), FixupOutcome::Unchanged);
        assert_eq!(buf.len(), DEFECTIVE_RDESC_LEN);
    }
}
