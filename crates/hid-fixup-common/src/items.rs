//! Short-item scanner for report-descriptor diagnostics.
//!
//! This is deliberately not a HID parser: it only recovers item framing
//! (HID 1.11 §6.2.2.2) well enough to count collections. Fixups never gate
//! on it — the defect signature check stays an exact length comparison —
//! but it lets tooling and logs say *why* a descriptor looks broken
//! ("2 collections left open") instead of just "wrong length".

/// Prefix byte of an End Collection item: tag 0xC, type Main, no data.
pub const END_COLLECTION: u8 = 0xC0;

/// Main-item tag opening a collection.
pub const TAG_COLLECTION: u8 = 0xA;

/// Main-item tag closing a collection.
pub const TAG_END_COLLECTION: u8 = 0xC;

/// Item type, bits 2..=3 of the prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Main,
    Global,
    Local,
    Reserved,
}

/// One framed descriptor item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'a> {
    pub item_type: ItemType,
    pub tag: u8,
    pub data: &'a [u8],
}

impl Item<'_> {
    pub fn is_collection(&self) -> bool {
        self.item_type == ItemType::Main && self.tag == TAG_COLLECTION
    }

    pub fn is_end_collection(&self) -> bool {
        self.item_type == ItemType::Main && self.tag == TAG_END_COLLECTION
    }
}

/// Iterator over the short items of a descriptor byte slice.
///
/// Long items (prefix `0xFE`) are framed and skipped. Iteration stops at
/// the first item whose declared data runs past the end of the slice; use
/// [`scan`] to learn whether that happened.
pub struct Items<'a> {
    bytes: &'a [u8],
    pos: usize,
    truncated: bool,
}

impl<'a> Items<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            truncated: false,
        }
    }
}

impl<'a> Iterator for Items<'a> {
    type Item = Item<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let prefix = *self.bytes.get(self.pos)?;
        self.pos = self.pos.saturating_add(1);

        let item_type = match (prefix >> 2) & 0x3 {
            0 => ItemType::Main,
            1 => ItemType::Global,
            2 => ItemType::Local,
            _ => ItemType::Reserved,
        };
        let mut tag = prefix >> 4;
        // Size 3 encodes a 4-byte payload for short items.
        let mut size = match prefix & 0x3 {
            3 => 4usize,
            n => n as usize,
        };

        if prefix == 0xFE {
            // Long item: one size byte, one tag byte, then the payload.
            size = match self.bytes.get(self.pos) {
                Some(&s) => s as usize,
                None => {
                    self.truncated = true;
                    return None;
                }
            };
            tag = match self.bytes.get(self.pos.saturating_add(1)) {
                Some(&t) => t,
                None => {
                    self.truncated = true;
                    return None;
                }
            };
            self.pos = self.pos.saturating_add(2);
        }

        let end = self.pos.saturating_add(size);
        let Some(data) = self.bytes.get(self.pos..end) else {
            self.truncated = true;
            return None;
        };
        self.pos = end;

        Some(Item {
            item_type,
            tag,
            data,
        })
    }
}

/// What a scan of a descriptor's item framing found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DescriptorSummary {
    /// Number of items framed before the end of input (or truncation).
    pub items: usize,
    /// Collection opens minus closes; positive means collections were left
    /// open, which is the EcoFlow-style defect this suite exists for.
    pub open_collections: i32,
    /// An item's declared payload ran past the end of the buffer.
    pub truncated: bool,
}

impl DescriptorSummary {
    pub fn is_balanced(&self) -> bool {
        self.open_collections == 0 && !self.truncated
    }
}

/// Scans `bytes` and reports item count, collection balance, and whether
/// the final item was cut short.
pub fn scan(bytes: &[u8]) -> DescriptorSummary {
    let mut iter = Items::new(bytes);
    let mut items = 0usize;
    let mut open: i32 = 0;
    for item in iter.by_ref() {
        items = items.saturating_add(1);
        if item.is_collection() {
            open = open.saturating_add(1);
        } else if item.is_end_collection() {
            open = open.saturating_sub(1);
        }
    }
    DescriptorSummary {
        items,
        open_collections: open,
        truncated: iter.truncated,
    }
}
