//! Characteristic Record Table
//!
//! Fixed-capacity, append-only storage for the characteristics discovered on
//! the peer's service. Capacity is the const generic `N`; the table never
//! allocates and never removes individual entries, only [`CharacteristicTable::clear`]
//! empties it.

use crate::constants::{
    CCC_NOTIFY, CLIENT_CHARACTERISTIC_CONFIGURATION_UUID, DESCRIPTORS_PER_CHARACTERISTIC,
    MAX_DESCRIPTION_LENGTH, MAX_VALUE_LENGTH, PROPERTY_INDICATE, PROPERTY_NOTIFY, PROPERTY_READ,
    USER_DESCRIPTION_UUID,
};
use crate::uuid::Uuid;
use heapless::Vec;

/// Characteristic declaration as reported by the host stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Characteristic {
    /// Handle of the characteristic declaration
    pub start_handle: u16,
    /// Handle of the characteristic value
    pub value_handle: u16,
    /// Last handle belonging to this characteristic
    pub end_handle: u16,
    /// Characteristic properties bitmask
    pub properties: u8,
    /// Value type UUID
    pub uuid: Uuid,
}

impl Characteristic {
    /// Whether the peer allows reading the value
    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.properties & PROPERTY_READ != 0
    }

    /// Whether the peer can notify value changes
    #[must_use]
    pub const fn supports_notify(&self) -> bool {
        self.properties & PROPERTY_NOTIFY != 0
    }

    /// Whether the peer can indicate value changes
    #[must_use]
    pub const fn supports_indicate(&self) -> bool {
        self.properties & PROPERTY_INDICATE != 0
    }
}

/// Descriptor as reported by the host stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Attribute handle
    pub handle: u16,
    /// Descriptor type UUID
    pub uuid: Uuid,
}

impl Descriptor {
    /// Characteristic User Description descriptor
    #[must_use]
    pub fn is_user_description(&self) -> bool {
        self.uuid == Uuid::Uuid16(USER_DESCRIPTION_UUID)
    }

    /// Client Characteristic Configuration descriptor
    #[must_use]
    pub fn is_client_configuration(&self) -> bool {
        self.uuid == Uuid::Uuid16(CLIENT_CHARACTERISTIC_CONFIGURATION_UUID)
    }
}

/// Which bounded buffers of a record lost bytes when they were filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Truncation {
    /// User description was longer than [`MAX_DESCRIPTION_LENGTH`]
    pub description: bool,
    /// Value was longer than [`MAX_VALUE_LENGTH`]
    pub value: bool,
}

impl Truncation {
    /// Whether any buffer was truncated
    #[must_use]
    pub const fn any(&self) -> bool {
        self.description || self.value
    }
}

/// Per-characteristic discovery state
#[derive(Debug, Clone)]
pub struct CharacteristicRecord {
    characteristic: Characteristic,
    descriptors: Vec<Descriptor, DESCRIPTORS_PER_CHARACTERISTIC>,
    description: Vec<u8, MAX_DESCRIPTION_LENGTH>,
    value: Vec<u8, MAX_VALUE_LENGTH>,
    configuration: u16,
    notifications_enabled: bool,
    truncation: Truncation,
}

/// Copy as much of `src` as fits, reporting whether bytes were dropped
fn fill_truncated<const M: usize>(dst: &mut Vec<u8, M>, src: &[u8]) -> bool {
    let kept = src.len().min(M);
    dst.clear();
    // `kept` never exceeds the capacity
    dst.extend_from_slice(&src[..kept]).ok();
    kept < src.len()
}

impl CharacteristicRecord {
    /// Create an empty record for a freshly discovered characteristic
    #[must_use]
    pub const fn new(characteristic: Characteristic) -> Self {
        Self {
            characteristic,
            descriptors: Vec::new(),
            description: Vec::new(),
            value: Vec::new(),
            configuration: 0,
            notifications_enabled: false,
            truncation: Truncation {
                description: false,
                value: false,
            },
        }
    }

    /// Characteristic declaration
    #[must_use]
    pub const fn characteristic(&self) -> &Characteristic {
        &self.characteristic
    }

    /// Value handle, the key notifications are routed by
    #[must_use]
    pub const fn value_handle(&self) -> u16 {
        self.characteristic.value_handle
    }

    /// Value type UUID
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.characteristic.uuid
    }

    /// Properties bitmask
    #[must_use]
    pub const fn properties(&self) -> u8 {
        self.characteristic.properties
    }

    /// Filled descriptor slots, in the order the peer reported them
    #[must_use]
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Descriptor in `slot`, if the peer reported one there
    #[must_use]
    pub fn descriptor(&self, slot: usize) -> Option<&Descriptor> {
        self.descriptors.get(slot)
    }

    /// Slot holding the user description descriptor
    #[must_use]
    pub fn user_description_slot(&self) -> Option<usize> {
        self.descriptors.iter().position(Descriptor::is_user_description)
    }

    /// Slot holding the client configuration descriptor
    #[must_use]
    pub fn client_configuration_slot(&self) -> Option<usize> {
        self.descriptors
            .iter()
            .position(Descriptor::is_client_configuration)
    }

    /// Raw user description bytes
    #[must_use]
    pub fn description(&self) -> &[u8] {
        &self.description
    }

    /// User description as text, when it is valid UTF-8
    #[must_use]
    pub fn description_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.description).ok()
    }

    /// Last known value
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Client configuration value
    #[must_use]
    pub const fn configuration(&self) -> u16 {
        self.configuration
    }

    /// Whether notifications were enabled on the peer
    #[must_use]
    pub const fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    /// Truncation flags
    #[must_use]
    pub const fn truncation(&self) -> Truncation {
        self.truncation
    }

    /// Store the next descriptor in slot order.
    ///
    /// Returns `false` when both slots are already taken; the descriptor is dropped.
    pub(crate) fn push_descriptor(&mut self, descriptor: Descriptor) -> bool {
        self.descriptors.push(descriptor).is_ok()
    }

    /// Store a user description, truncating to [`MAX_DESCRIPTION_LENGTH`].
    ///
    /// Returns `true` when bytes were dropped.
    pub(crate) fn set_description(&mut self, description: &[u8]) -> bool {
        let truncated = fill_truncated(&mut self.description, description);
        self.truncation.description = truncated;
        truncated
    }

    /// Store a value, truncating to [`MAX_VALUE_LENGTH`].
    ///
    /// Returns `true` when bytes were dropped.
    pub(crate) fn set_value(&mut self, value: &[u8]) -> bool {
        let truncated = fill_truncated(&mut self.value, value);
        self.truncation.value = truncated;
        truncated
    }

    /// Decode the client configuration from its little-endian wire form
    pub(crate) fn set_configuration_bytes(&mut self, raw: &[u8]) {
        self.configuration = match raw {
            [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
            [lo] => u16::from(*lo),
            [] => 0,
        };
    }

    /// Record that the notify bit was written to the client configuration
    pub(crate) fn mark_notifications_enabled(&mut self) {
        self.configuration |= CCC_NOTIFY;
        self.notifications_enabled = true;
    }

    /// Whether notification enablement applies to this characteristic
    #[must_use]
    pub fn wants_notifications(&self) -> bool {
        self.characteristic.supports_notify() && self.client_configuration_slot().is_some()
    }
}

/// Errors reported by [`CharacteristicTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Table already holds `N` records
    CapacityExceeded,
}

/// Fixed-capacity, append-only table of discovered characteristics
#[derive(Debug, Clone)]
pub struct CharacteristicTable<const N: usize> {
    records: Vec<CharacteristicRecord, N>,
}

impl<const N: usize> CharacteristicTable<N> {
    /// Create an empty table
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Maximum number of records
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of valid records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no characteristic has been discovered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record and return its index
    ///
    /// # Errors
    /// Returns [`TableError::CapacityExceeded`] when the table already holds `N` records.
    pub fn append(&mut self, record: CharacteristicRecord) -> Result<usize, TableError> {
        let index = self.records.len();
        self.records
            .push(record)
            .map_err(|_| TableError::CapacityExceeded)?;
        Ok(index)
    }

    /// Record at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CharacteristicRecord> {
        self.records.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut CharacteristicRecord> {
        self.records.get_mut(index)
    }

    /// Index of the record whose value handle is `value_handle`
    #[must_use]
    pub fn position_by_value_handle(&self, value_handle: u16) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.value_handle() == value_handle)
    }

    /// Iterate over valid records
    pub fn iter(&self) -> impl Iterator<Item = &CharacteristicRecord> {
        self.records.iter()
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<const N: usize> Default for CharacteristicTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn characteristic(value_handle: u16, properties: u8) -> Characteristic {
        Characteristic {
            start_handle: value_handle - 1,
            value_handle,
            end_handle: value_handle + 2,
            properties,
            uuid: Uuid::Uuid16(0x2A6E),
        }
    }

    #[test]
    fn test_append_until_full() {
        let mut table: CharacteristicTable<2> = CharacteristicTable::new();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 2);

        let first = table.append(CharacteristicRecord::new(characteristic(8, 0)));
        let second = table.append(CharacteristicRecord::new(characteristic(14, 0)));
        let third = table.append(CharacteristicRecord::new(characteristic(20, 0)));

        assert_eq!(first, Ok(0));
        assert_eq!(second, Ok(1));
        assert_eq!(third, Err(TableError::CapacityExceeded));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).unwrap().value_handle(), 14);
        assert!(table.get(2).is_none());
    }

    #[test]
    fn test_clear_empties_table() {
        let mut table: CharacteristicTable<4> = CharacteristicTable::new();
        table
            .append(CharacteristicRecord::new(characteristic(8, 0)))
            .unwrap();
        table.clear();
        assert_eq!(table.len(), 0);
        assert!(table.get(0).is_none());
    }

    #[test]
    fn test_lookup_by_value_handle() {
        let mut table: CharacteristicTable<4> = CharacteristicTable::new();
        table
            .append(CharacteristicRecord::new(characteristic(8, 0)))
            .unwrap();
        table
            .append(CharacteristicRecord::new(characteristic(14, 0)))
            .unwrap();
        assert_eq!(table.position_by_value_handle(14), Some(1));
        assert_eq!(table.position_by_value_handle(9), None);
    }

    #[test]
    fn test_descriptor_slots_are_positional() {
        let mut record = CharacteristicRecord::new(characteristic(8, PROPERTY_NOTIFY));
        let ccc = Descriptor {
            handle: 9,
            uuid: Uuid::Uuid16(CLIENT_CHARACTERISTIC_CONFIGURATION_UUID),
        };
        let cud = Descriptor {
            handle: 10,
            uuid: Uuid::Uuid16(USER_DESCRIPTION_UUID),
        };
        assert!(record.push_descriptor(ccc));
        assert!(record.push_descriptor(cud));
        assert!(!record.push_descriptor(Descriptor {
            handle: 11,
            uuid: Uuid::Uuid16(0x2904),
        }));

        assert_eq!(record.descriptors().len(), 2);
        assert_eq!(record.client_configuration_slot(), Some(0));
        assert_eq!(record.user_description_slot(), Some(1));
        assert!(record.wants_notifications());
    }

    #[test]
    fn test_description_at_limit_is_verbatim() {
        let mut record = CharacteristicRecord::new(characteristic(8, 0));
        let exact = [b'd'; MAX_DESCRIPTION_LENGTH];
        assert!(!record.set_description(&exact));
        assert_eq!(record.description(), &exact[..]);
        assert!(!record.truncation().description);
    }

    #[test]
    fn test_description_over_limit_is_truncated() {
        let mut record = CharacteristicRecord::new(characteristic(8, 0));
        let over = [b'd'; MAX_DESCRIPTION_LENGTH + 1];
        assert!(record.set_description(&over));
        assert_eq!(record.description().len(), MAX_DESCRIPTION_LENGTH);
        assert!(record.truncation().description);
        assert!(!record.truncation().value);
    }

    #[test]
    fn test_value_at_limit_is_verbatim() {
        let mut record = CharacteristicRecord::new(characteristic(8, 0));
        let exact = [0x7E; MAX_VALUE_LENGTH];
        assert!(!record.set_value(&exact));
        assert_eq!(record.value(), &exact[..]);
        assert!(!record.truncation().value);
    }

    #[test]
    fn test_value_truncation_flag_follows_latest_write() {
        let mut record = CharacteristicRecord::new(characteristic(8, 0));
        assert!(record.set_value(&[0xAA; MAX_VALUE_LENGTH + 1]));
        assert!(record.truncation().value);
        assert!(!record.set_value(&[0x01, 0x02]));
        assert_eq!(record.value(), &[0x01, 0x02]);
        assert!(!record.truncation().any());
    }

    #[test]
    fn test_configuration_decoding() {
        let mut record = CharacteristicRecord::new(characteristic(8, 0));
        record.set_configuration_bytes(&[0x02, 0x00]);
        assert_eq!(record.configuration(), CCC_NOTIFY << 1);
        record.set_configuration_bytes(&[]);
        assert_eq!(record.configuration(), 0);
        record.mark_notifications_enabled();
        assert_eq!(record.configuration(), CCC_NOTIFY);
        assert!(record.notifications_enabled());
    }

    #[test]
    fn test_notify_without_configuration_descriptor() {
        let record = CharacteristicRecord::new(characteristic(8, PROPERTY_NOTIFY | PROPERTY_READ));
        assert!(record.characteristic().supports_notify());
        assert!(record.characteristic().is_readable());
        assert!(!record.wants_notifications());
    }
}
