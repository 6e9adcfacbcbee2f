//! `Pipit` Constants
//!
//! Compile-time limits and the handful of assigned GATT numbers the discovery
//! state machine needs. Buffer sizes are fixed here because the client never
//! allocates; raise them if a peer exposes longer strings or values.

/// Maximum length of a characteristic user description, in bytes
pub const MAX_DESCRIPTION_LENGTH: usize = 50;

/// Maximum length of a stored characteristic value, in bytes
pub const MAX_VALUE_LENGTH: usize = 100;

/// Descriptor slots tracked per characteristic
pub const DESCRIPTORS_PER_CHARACTERISTIC: usize = 2;

/// Characteristic table capacity used by [`crate::DefaultClient`]
pub const DEFAULT_MAX_CHARACTERISTICS: usize = 8;

/// Maximum advertised local name length kept by the advertisement parser
pub const MAX_LOCAL_NAME_LENGTH: usize = 32;

/// Characteristic User Description descriptor UUID
pub const USER_DESCRIPTION_UUID: u16 = 0x2901;

/// Client Characteristic Configuration descriptor UUID
pub const CLIENT_CHARACTERISTIC_CONFIGURATION_UUID: u16 = 0x2902;

/// Client configuration value enabling notifications
pub const CCC_NOTIFY: u16 = 0x0001;

/// Client configuration value enabling indications
pub const CCC_INDICATE: u16 = 0x0002;

/// Characteristic property: broadcast
pub const PROPERTY_BROADCAST: u8 = 0x01;

/// Characteristic property: read
pub const PROPERTY_READ: u8 = 0x02;

/// Characteristic property: write without response
pub const PROPERTY_WRITE_WITHOUT_RESPONSE: u8 = 0x04;

/// Characteristic property: write
pub const PROPERTY_WRITE: u8 = 0x08;

/// Characteristic property: notify
pub const PROPERTY_NOTIFY: u8 = 0x10;

/// Characteristic property: indicate
pub const PROPERTY_INDICATE: u8 = 0x20;

/// ATT status reported on a successful procedure
pub const ATT_SUCCESS: u8 = 0x00;

/// ATT error: no attribute in the requested range
pub const ATT_ATTRIBUTE_NOT_FOUND: u8 = 0x0A;

/// HCI status reported on a successful connection
pub const HCI_SUCCESS: u8 = 0x00;

/// AD type: incomplete list of 16-bit service UUIDs
pub const AD_INCOMPLETE_16BIT_UUIDS: u8 = 0x02;

/// AD type: complete list of 16-bit service UUIDs
pub const AD_COMPLETE_16BIT_UUIDS: u8 = 0x03;

/// AD type: incomplete list of 128-bit service UUIDs
pub const AD_INCOMPLETE_128BIT_UUIDS: u8 = 0x06;

/// AD type: complete list of 128-bit service UUIDs
pub const AD_COMPLETE_128BIT_UUIDS: u8 = 0x07;

/// AD type: shortened local name
pub const AD_SHORTENED_LOCAL_NAME: u8 = 0x08;

/// AD type: complete local name
pub const AD_COMPLETE_LOCAL_NAME: u8 = 0x09;

/// Default LE scan interval in 0.625 ms units (48 = 30 ms)
pub const DEFAULT_SCAN_INTERVAL: u16 = 0x0030;

/// Default LE scan window in 0.625 ms units (48 = 30 ms)
pub const DEFAULT_SCAN_WINDOW: u16 = 0x0030;
