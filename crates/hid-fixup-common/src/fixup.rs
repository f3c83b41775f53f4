//! The fixup contract: one synchronous call per matching device enumeration.

use crate::DescriptorBuffer;

/// Result of one fixup invocation.
///
/// There is no failure variant. A fixup whose precondition is not met, or
/// that would have to write past the buffer's capacity, reports
/// [`Unchanged`](FixupOutcome::Unchanged) — the designed no-op path, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum FixupOutcome {
    /// Precondition not met; the buffer was left byte-for-byte untouched.
    Unchanged,
    /// The defect signature matched and the buffer was corrected in place.
    Patched { new_len: usize },
}

impl FixupOutcome {
    /// Folds the outcome to the declared length the host should report
    /// downstream: `original` when unchanged, the corrected length when
    /// patched.
    pub fn new_len(self, original: usize) -> usize {
        match self {
            Self::Unchanged => original,
            Self::Patched { new_len } => new_len,
        }
    }

    pub fn is_patched(self) -> bool {
        matches!(self, Self::Patched { .. })
    }
}

/// A report-descriptor fixup for one known firmware defect.
///
/// Implementations must be stateless and total:
/// - check the exact defect signature before touching anything (a wrong
///   declared length, including an already-patched one, is a no-op);
/// - validate capacity before writing, declining rather than truncating;
/// - never retain a reference to the buffer past the call.
///
/// Bounds safety is enforced structurally — the only mutation paths are
/// [`DescriptorBuffer::append`] and [`DescriptorBuffer::write_at`].
pub trait RdescFixup: Send + Sync {
    /// Short name used for log attribution.
    fn name(&self) -> &'static str;

    /// Inspects the descriptor and corrects it in place when the defect
    /// signature matches.
    fn fixup(&self, rdesc: &mut DescriptorBuffer<'_>) -> FixupOutcome;
}
