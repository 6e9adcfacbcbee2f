use bt_hci::param::{AddrKind, BdAddr};

/// A Bluetooth device address, stored in over-the-air (little-endian) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BluetoothAddress(pub [u8; 6]);

impl BluetoothAddress {
    /// Create an address from little-endian bytes as received from the controller
    #[must_use]
    pub const fn new(addr: [u8; 6]) -> Self {
        Self(addr)
    }

    /// Get the raw little-endian bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Format as the usual colon-separated, most-significant-byte-first string
    #[must_use]
    pub fn format_hex(&self) -> heapless::String<17> {
        const HEX: &[u8; 16] = b"0123456789ABCDEF";
        let mut out = heapless::String::new();
        for (i, byte) in self.0.iter().rev().enumerate() {
            if i > 0 {
                out.push(':').ok();
            }
            out.push(HEX[usize::from(byte >> 4)] as char).ok();
            out.push(HEX[usize::from(byte & 0x0F)] as char).ok();
        }
        out
    }

    /// Parse a colon-separated, most-significant-byte-first string
    ///
    /// # Errors
    /// Returns [`AddressParseError`] unless the input is six colon-separated hex pairs
    pub fn from_hex(hex: &str) -> Result<Self, AddressParseError> {
        if hex.len() != 17 {
            return Err(AddressParseError);
        }
        let mut bytes = [0u8; 6];
        let mut parts = hex.split(':');
        for slot in bytes.iter_mut().rev() {
            let part = parts.next().ok_or(AddressParseError)?;
            if part.len() != 2 {
                return Err(AddressParseError);
            }
            *slot = u8::from_str_radix(part, 16).map_err(|_| AddressParseError)?;
        }
        if parts.next().is_some() {
            return Err(AddressParseError);
        }
        Ok(Self(bytes))
    }
}

/// Returned when an address string is not of the form `AA:BB:CC:DD:EE:FF`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressParseError;

impl From<[u8; 6]> for BluetoothAddress {
    fn from(addr: [u8; 6]) -> Self {
        Self(addr)
    }
}

impl From<BluetoothAddress> for BdAddr {
    fn from(addr: BluetoothAddress) -> Self {
        BdAddr::new(addr.0)
    }
}

impl From<BdAddr> for BluetoothAddress {
    fn from(addr: BdAddr) -> Self {
        Self(addr.raw().try_into().unwrap_or_default())
    }
}

impl TryFrom<&str> for BluetoothAddress {
    type Error = AddressParseError;

    fn try_from(hex: &str) -> Result<Self, Self::Error> {
        Self::from_hex(hex)
    }
}

/// LE address type of a peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressType {
    /// Public device address
    #[default]
    Public,
    /// Random (static or private) device address
    Random,
}

impl From<AddressType> for AddrKind {
    fn from(kind: AddressType) -> Self {
        match kind {
            AddressType::Public => AddrKind::PUBLIC,
            AddressType::Random => AddrKind::RANDOM,
        }
    }
}

impl From<AddrKind> for AddressType {
    fn from(kind: AddrKind) -> Self {
        if kind == AddrKind::PUBLIC {
            AddressType::Public
        } else {
            AddressType::Random
        }
    }
}

/// Identity of a peer: address plus address type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerAddress {
    /// Device address
    pub addr: BluetoothAddress,
    /// Address type used when connecting
    pub kind: AddressType,
}

impl PeerAddress {
    /// Create a peer address
    #[must_use]
    pub const fn new(addr: BluetoothAddress, kind: AddressType) -> Self {
        Self { addr, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hex_is_msb_first() {
        let addr = BluetoothAddress::new([0xBC, 0x9A, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(addr.format_hex().as_str(), "12:34:56:78:9A:BC");
    }

    #[test]
    fn test_from_hex_round_trips_byte_order() {
        let addr = BluetoothAddress::from_hex("0A:B1:2C:D3:4E:F5").unwrap();
        assert_eq!(addr.as_bytes(), &[0xF5, 0x4E, 0xD3, 0x2C, 0xB1, 0x0A]);
        assert_eq!(addr.format_hex().as_str(), "0A:B1:2C:D3:4E:F5");
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert_eq!(BluetoothAddress::from_hex(""), Err(AddressParseError));
        assert_eq!(
            BluetoothAddress::from_hex("12:34:56:78:9A"),
            Err(AddressParseError)
        );
        assert_eq!(
            BluetoothAddress::from_hex("12-34-56-78-9A-BC"),
            Err(AddressParseError)
        );
        assert_eq!(
            BluetoothAddress::from_hex("12:34:56:78:9A:ZZ"),
            Err(AddressParseError)
        );
        assert_eq!(
            BluetoothAddress::from_hex("123:4:56:78:9A:BC"),
            Err(AddressParseError)
        );
    }

    #[test]
    fn test_bd_addr_conversion_keeps_wire_order() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let bd_addr: BdAddr = BluetoothAddress::new(bytes).into();
        assert_eq!(bd_addr.raw(), &bytes);
        assert_eq!(BluetoothAddress::from(bd_addr).as_bytes(), &bytes);
    }

    #[test]
    fn test_address_type_conversion() {
        assert_eq!(AddrKind::from(AddressType::Public), AddrKind::PUBLIC);
        assert_eq!(AddrKind::from(AddressType::Random), AddrKind::RANDOM);
        assert_eq!(AddressType::from(AddrKind::RANDOM), AddressType::Random);
        assert_eq!(AddressType::from(AddrKind::PUBLIC), AddressType::Public);
    }
}
