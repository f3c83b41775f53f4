//! Registry mapping device identities to their descriptor fixups.
//!
//! The host builds one registry at startup and dispatches through it on
//! every device enumeration. This replaces a static host-scanned
//! declaration table with an explicit owned value; no global mutable state
//! is involved.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::{DescriptorBuffer, DeviceId, FixupError, FixupResult, RdescFixup};

/// Owned map from [`DeviceId`] to the fixup registered for it.
#[derive(Default)]
pub struct FixupRegistry {
    entries: HashMap<DeviceId, Box<dyn RdescFixup>>,
}

impl FixupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `fixup` for `id`.
    ///
    /// # Errors
    /// Returns [`FixupError::DuplicateDevice`] when a fixup is already
    /// registered for the same identity; two fixups racing to patch one
    /// descriptor is never intended.
    pub fn register(&mut self, id: DeviceId, fixup: Box<dyn RdescFixup>) -> FixupResult<()> {
        if self.entries.contains_key(&id) {
            return Err(FixupError::DuplicateDevice(id));
        }
        debug!(device = %id, fixup = fixup.name(), "registered descriptor fixup");
        self.entries.insert(id, fixup);
        Ok(())
    }

    pub fn lookup(&self, id: &DeviceId) -> Option<&dyn RdescFixup> {
        self.entries.get(id).map(Box::as_ref)
    }

    /// Dispatches the fixup registered for `id`, returning the declared
    /// length the host should use afterwards.
    ///
    /// An unknown device, like a non-matching signature, is a traced no-op:
    /// the buffer is untouched and the original declared length comes back.
    pub fn apply(&self, id: &DeviceId, rdesc: &mut DescriptorBuffer<'_>) -> usize {
        let original = rdesc.len();
        let Some(fixup) = self.lookup(id) else {
            debug!(device = %id, len = original, "no descriptor fixup registered");
            return original;
        };

        let outcome = fixup.fixup(rdesc);
        if outcome.is_patched() {
            info!(
                device = %id,
                fixup = fixup.name(),
                from_len = original,
                to_len = outcome.new_len(original),
                "patched report descriptor"
            );
        } else {
            debug!(
                device = %id,
                fixup = fixup.name(),
                len = original,
                "descriptor signature not matched, left unchanged"
            );
        }
        outcome.new_len(original)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates registered (identity, fixup) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&DeviceId, &dyn RdescFixup)> {
        self.entries.iter().map(|(id, f)| (id, f.as_ref()))
    }
}
