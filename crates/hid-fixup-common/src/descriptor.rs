//! Bounded mutable view over a report-descriptor byte buffer.
//!
//! The host owns the memory; a fixup is granted temporary exclusive write
//! access through [`DescriptorBuffer`] for the duration of one call. The
//! declared length accompanying the buffer originates in device firmware
//! and is untrusted: it is clamped to the physical capacity on
//! construction, and every write goes through an all-or-nothing
//! bounds-checked accessor.

/// Upper bound on report-descriptor size, mirroring the kernel's
/// `HID_MAX_DESCRIPTOR_SIZE`.
pub const MAX_DESCRIPTOR_BYTES: usize = 4096;

/// A mutable descriptor buffer with explicit capacity and declared length.
///
/// Invariant: `len <= data.len()` at all times. `bytes()` is the valid
/// prefix; the remainder of the slice is scratch capacity a fixup may grow
/// into via [`append`](Self::append).
#[derive(Debug)]
pub struct DescriptorBuffer<'a> {
    data: &'a mut [u8],
    len: usize,
}

impl<'a> DescriptorBuffer<'a> {
    /// Wraps caller-owned memory. `declared_len` is clamped to the slice
    /// length; a firmware-supplied length can never grant access past the
    /// memory the host actually provided.
    pub fn new(data: &'a mut [u8], declared_len: usize) -> Self {
        let len = declared_len.min(data.len());
        Self { data, len }
    }

    /// Number of currently valid descriptor bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical capacity granted by the host for this call.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The valid prefix `[0, len)`.
    pub fn bytes(&self) -> &[u8] {
        self.data.get(..self.len).unwrap_or_default()
    }

    /// Whether `extra` more bytes fit without exceeding capacity.
    pub fn can_append(&self, extra: usize) -> bool {
        extra <= self.capacity().saturating_sub(self.len)
    }

    /// Appends `bytes` after the last valid byte, extending the declared
    /// length. All-or-nothing: returns `false` and leaves the buffer
    /// untouched when the write would exceed capacity.
    pub fn append(&mut self, bytes: &[u8]) -> bool {
        if !self.can_append(bytes.len()) {
            return false;
        }
        let end = self.len.saturating_add(bytes.len());
        match self.data.get_mut(self.len..end) {
            Some(dst) => {
                dst.copy_from_slice(bytes);
                self.len = end;
                true
            }
            None => false,
        }
    }

    /// Overwrites bytes in place within the valid prefix. All-or-nothing:
    /// returns `false` and leaves the buffer untouched when any byte of the
    /// target region lies at or past the declared length.
    pub fn write_at(&mut self, offset: usize, bytes: &[u8]) -> bool {
        let end = match offset.checked_add(bytes.len()) {
            Some(end) if end <= self.len => end,
            _ => return false,
        };
        match self.data.get_mut(offset..end) {
            Some(dst) => {
                dst.copy_from_slice(bytes);
                true
            }
            None => false,
        }
    }
}
