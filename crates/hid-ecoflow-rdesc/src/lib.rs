//! HID report-descriptor fixup for the EcoFlow River 3 Plus.
//!
//! EcoFlow portable power stations expose a vendor HID interface for local
//! telemetry. The River 3 Plus (VID `0x3746`) firmware V1.33.81.55 emits a
//! report descriptor that is three End Collection items short, so the
//! host's HID parser rejects the whole interface. This crate detects that
//! exact defect and appends the missing items before the descriptor is
//! parsed.
//!
//! ## Design
//! This crate is intentionally I/O-free. It provides constants, predicates,
//! and a [`hid_fixup_common::RdescFixup`] implementation that can be used
//! and tested without hardware access.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod rdesc;

pub use ids::{ECOFLOW_VENDOR_ID, PID_RIVER_3_PLUS, is_ecoflow, is_river_3_plus};
pub use rdesc::{
    DEFECTIVE_RDESC_LEN, MISSING_END_COLLECTIONS, PATCHED_RDESC_LEN, River3PlusRdescFixup,
    register,
};
