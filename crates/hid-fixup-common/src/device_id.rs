//! Device identity types used as fixup registration keys.
//!
//! A fixup is matched to hardware by the tuple (bus, HID group, vendor ID,
//! product ID) — the same key the kernel uses in sysfs device names such as
//! `0003:3746:FFFF.000A`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{FixupError, FixupResult};

/// Transport bus a HID device is attached over.
///
/// Discriminants match the kernel's `BUS_*` constants so sysfs names
/// round-trip without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum BusType {
    Usb = 0x0003,
    Bluetooth = 0x0005,
    Virtual = 0x0006,
    I2c = 0x0018,
}

impl BusType {
    /// Maps a raw kernel bus number to a known bus type.
    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            0x0003 => Some(Self::Usb),
            0x0005 => Some(Self::Bluetooth),
            0x0006 => Some(Self::Virtual),
            0x0018 => Some(Self::I2c),
            _ => None,
        }
    }
}

/// HID driver group, second component of the kernel match key.
///
/// Discriminants match the kernel's `HID_GROUP_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum HidGroup {
    Any = 0x0000,
    Generic = 0x0001,
    Multitouch = 0x0002,
}

/// Immutable registration/match key for one device model.
///
/// Defined at build time, never mutated. The host environment compares this
/// key against an enumerated device before a fixup is ever invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId {
    pub bus: BusType,
    pub group: HidGroup,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceId {
    pub const fn new(bus: BusType, group: HidGroup, vendor_id: u16, product_id: u16) -> Self {
        Self {
            bus,
            group,
            vendor_id,
            product_id,
        }
    }

    /// The common case: a generic-group device on the USB bus.
    pub const fn usb_generic(vendor_id: u16, product_id: u16) -> Self {
        Self::new(BusType::Usb, HidGroup::Generic, vendor_id, product_id)
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }

    /// Parses a sysfs HID device name, e.g. `0003:3746:FFFF` or
    /// `0003:3746:FFFF.000A` (the instance suffix is ignored).
    ///
    /// The group is not encoded in sysfs names; it defaults to
    /// [`HidGroup::Generic`].
    ///
    /// # Errors
    /// Returns [`FixupError::InvalidDeviceId`] when the name does not have
    /// three colon-separated hex fields or the bus number is unknown.
    pub fn parse_sysfs_name(name: &str) -> FixupResult<Self> {
        let invalid = |reason: &str| FixupError::InvalidDeviceId {
            input: name.to_string(),
            reason: reason.to_string(),
        };

        let stem = name.split('.').next().unwrap_or(name);
        let mut fields = stem.split(':');
        let (bus, vid, pid) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(bus), Some(vid), Some(pid), None) => (bus, vid, pid),
            _ => return Err(invalid("expected BUS:VID:PID")),
        };

        let parse_hex = |field: &str, what: &str| {
            u16::from_str_radix(field, 16)
                .map_err(|_| invalid(&format!("{what} is not a 16-bit hex value")))
        };

        let bus_raw = parse_hex(bus, "bus")?;
        let bus = BusType::from_raw(bus_raw)
            .ok_or_else(|| invalid(&format!("unknown bus number {bus_raw:#06x}")))?;
        let vendor_id = parse_hex(vid, "vendor id")?;
        let product_id = parse_hex(pid, "product id")?;

        Ok(Self::new(bus, HidGroup::Generic, vendor_id, product_id))
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04X}:{:04X}:{:04X}",
            self.bus as u16, self.vendor_id, self.product_id
        )
    }
}

impl FromStr for DeviceId {
    type Err = FixupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_sysfs_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usb_generic_key() {
        let id = DeviceId::usb_generic(0x3746, 0xFFFF);
        assert_eq!(id.bus, BusType::Usb);
        assert_eq!(id.group, HidGroup::Generic);
        assert!(id.matches(0x3746, 0xFFFF));
        assert!(!id.matches(0x3746, 0x0001));
    }

    #[test]
    fn test_display_is_sysfs_form() {
        let id = DeviceId::usb_generic(0x3746, 0xFFFF);
        assert_eq!(id.to_string(), "0003:3746:FFFF");
    }

    #[test]
    fn test_parse_sysfs_name_with_instance_suffix() {
        let id = DeviceId::parse_sysfs_name("0003:3746:FFFF.000A").expect("parse");
        assert_eq!(id, DeviceId::usb_generic(0x3746, 0xFFFF));
    }

    #[test]
    fn test_parse_round_trip() {
        let id = DeviceId::usb_generic(0x046D, 0xC24F);
        let parsed: DeviceId = id.to_string().parse().expect("parse");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DeviceId::parse_sysfs_name("").is_err());
        assert!(DeviceId::parse_sysfs_name("0003:3746").is_err());
        assert!(DeviceId::parse_sysfs_name("0003:3746:FFFF:0001").is_err());
        assert!(DeviceId::parse_sysfs_name("zzzz:3746:FFFF").is_err());
        assert!(DeviceId::parse_sysfs_name("0099:3746:FFFF").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let id = DeviceId::usb_generic(0x3746, 0xFFFF);
        let json = serde_json::to_string(&id).expect("serialize");
        let back: DeviceId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
