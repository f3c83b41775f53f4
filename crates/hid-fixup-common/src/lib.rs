//! Common building blocks for HID report-descriptor fixups.
//!
//! A descriptor fixup is a narrow correction applied to the raw report
//! descriptor a device hands the host, active only when the defect's exact
//! signature is detected. This crate provides the pieces every fixup needs:
//! device identity keys, a bounds-checked view over the descriptor bytes,
//! the fixup trait itself, and a registry the host dispatches through.
//!
//! ## Design
//! This crate is intentionally I/O-free. Fixups are pure transformations on
//! caller-owned byte buffers and can be tested without hardware access or
//! kernel plumbing. All buffer writes go through bounds-checked accessors;
//! a fixup physically cannot write outside the region it was granted.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod descriptor;
pub mod device_id;
pub mod fixup;
pub mod items;
pub mod registry;

pub use descriptor::{DescriptorBuffer, MAX_DESCRIPTOR_BYTES};
pub use device_id::{BusType, DeviceId, HidGroup};
pub use fixup::{FixupOutcome, RdescFixup};
pub use items::{DescriptorSummary, Item, ItemType, Items, END_COLLECTION, scan};
pub use registry::FixupRegistry;

use thiserror::Error;

/// Errors surfaced by registry construction and identity parsing.
///
/// Note that applying a fixup never errors: every failure mode on that path
/// degrades to "descriptor left unchanged".
#[derive(Error, Debug)]
pub enum FixupError {
    #[error("fixup already registered for device {0}")]
    DuplicateDevice(DeviceId),

    #[error("invalid device identity '{input}': {reason}")]
    InvalidDeviceId { input: String, reason: String },
}

pub type FixupResult<T> = Result<T, FixupError>;
