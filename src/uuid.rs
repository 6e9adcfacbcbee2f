//! GATT UUIDs
//!
//! Attributes are identified either by an assigned 16-bit UUID or a full
//! 128-bit UUID. A 16-bit UUID is shorthand for the Bluetooth Base UUID with
//! the value placed in bits 96..112, so the two forms compare equal when they
//! name the same attribute.

/// Bluetooth Base UUID `00000000-0000-1000-8000-00805F9B34FB`
pub const BLUETOOTH_BASE_UUID: u128 = 0x0000_0000_0000_1000_8000_0080_5F9B_34FB;

/// A 16-bit or 128-bit attribute UUID
#[derive(Debug, Clone, Copy, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Uuid {
    /// Assigned 16-bit UUID
    Uuid16(u16),
    /// Full 128-bit UUID
    Uuid128(u128),
}

impl Uuid {
    /// Decode a UUID from its little-endian wire form (2 or 16 bytes)
    #[must_use]
    pub fn from_le_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes.len() {
            2 => Some(Self::Uuid16(u16::from_le_bytes([bytes[0], bytes[1]]))),
            16 => {
                let mut raw = [0u8; 16];
                raw.copy_from_slice(bytes);
                Some(Self::Uuid128(u128::from_le_bytes(raw)))
            }
            _ => None,
        }
    }

    /// Expand to the full 128-bit value
    #[must_use]
    pub const fn as_u128(&self) -> u128 {
        match *self {
            Self::Uuid16(short) => BLUETOOTH_BASE_UUID | ((short as u128) << 96),
            Self::Uuid128(full) => full,
        }
    }

    /// The 16-bit alias, if this UUID lies on the Bluetooth Base UUID
    #[must_use]
    pub const fn as_u16(&self) -> Option<u16> {
        let full = self.as_u128();
        let short = (full >> 96) as u16;
        if full == BLUETOOTH_BASE_UUID | ((short as u128) << 96) {
            Some(short)
        } else {
            None
        }
    }

    /// Little-endian 128-bit wire form
    #[must_use]
    pub const fn to_le_bytes128(&self) -> [u8; 16] {
        self.as_u128().to_le_bytes()
    }
}

impl PartialEq for Uuid {
    fn eq(&self, other: &Self) -> bool {
        self.as_u128() == other.as_u128()
    }
}

impl From<u16> for Uuid {
    fn from(short: u16) -> Self {
        Self::Uuid16(short)
    }
}

impl From<u128> for Uuid {
    fn from(full: u128) -> Self {
        Self::Uuid128(full)
    }
}
