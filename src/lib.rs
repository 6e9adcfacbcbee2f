#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[macro_use]
mod fmt;

mod address;
pub mod advertisement;
mod client;
pub mod constants;
pub mod event;
pub mod host;
mod profile;
mod rendezvous;
pub mod table;
mod uuid;

#[cfg(test)]
mod testing;

pub use address::{AddressParseError, AddressType, BluetoothAddress, PeerAddress};
pub use client::Client;
pub use event::{
    AdvertisingReport, EventHandler, GapEvent, GattEvent, HostEvent, Service, dispatch,
};
pub use host::{GattHost, HostError, ScanFilterPolicy, ScanParameters, ScanType};
pub use profile::{ServiceProfile, ServiceUuid};
pub use rendezvous::Rendezvous;
pub use table::{
    Characteristic, CharacteristicRecord, CharacteristicTable, Descriptor, TableError, Truncation,
};
pub use uuid::{BLUETOOTH_BASE_UUID, Uuid};

/// [`Client`] sized with [`constants::DEFAULT_MAX_CHARACTERISTICS`]
pub type DefaultClient<'r, P, M> = Client<'r, P, M, { constants::DEFAULT_MAX_CHARACTERISTICS }>;

/// Discovery state machine states, in the order a successful cycle visits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClientState {
    /// Host stack not powered
    #[default]
    Off,
    /// Powered, no discovery in progress
    Idle,
    /// Scanning for an advertiser offering the target service
    W4ScanResult,
    /// Connection request issued to the matched advertiser
    W4Connect,
    /// Primary service discovery by UUID in progress
    W4ServiceResult,
    /// Characteristic discovery over the service range in progress
    W4CharacteristicResult,
    /// Descriptor discovery for the current characteristic in progress
    W4CharacteristicDescriptor,
    /// Reading the current characteristic's user description
    W4CharacteristicDescription,
    /// Reading the current characteristic's value
    W4CharacteristicValue,
    /// Reading the current characteristic's client configuration
    W4CharacteristicConfig,
    /// Writing client configurations to enable notifications
    W4EnableNotificationsComplete,
    /// Characteristic table complete, notifications flowing
    W4Ready,
}

impl ClientState {
    /// Whether a discovery cycle is underway (scanning through enabling notifications)
    #[must_use]
    pub const fn is_discovering(&self) -> bool {
        matches!(
            self,
            Self::W4ScanResult
                | Self::W4Connect
                | Self::W4ServiceResult
                | Self::W4CharacteristicResult
                | Self::W4CharacteristicDescriptor
                | Self::W4CharacteristicDescription
                | Self::W4CharacteristicValue
                | Self::W4CharacteristicConfig
                | Self::W4EnableNotificationsComplete
        )
    }

    /// Whether a link to the server exists in this state
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(
            self,
            Self::W4ServiceResult
                | Self::W4CharacteristicResult
                | Self::W4CharacteristicDescriptor
                | Self::W4CharacteristicDescription
                | Self::W4CharacteristicValue
                | Self::W4CharacteristicConfig
                | Self::W4EnableNotificationsComplete
                | Self::W4Ready
        )
    }
}

/// GATT client errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GattClientError {
    /// Advertising report did not match the target service; scanning continues
    NoMatchingPeer,
    /// Connected peer does not expose the target service
    ServiceNotFound,
    /// Peer exposes more characteristics than the table capacity
    CapacityExceeded,
    /// Event cannot be consumed in the current state; dropped
    UnexpectedEvent,
    /// Link went down before or after discovery completed
    LinkLost,
    /// Connection attempt failed with the given HCI status
    ConnectionFailed(u8),
    /// Discovery procedure failed with the given ATT status
    AttError(u8),
    /// Host stack refused an outbound request
    Host(HostError),
    /// Operation not allowed in the current state
    InvalidState,
}

impl GattClientError {
    /// Whether this error aborted the discovery cycle and reset the client to idle
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ServiceNotFound
                | Self::CapacityExceeded
                | Self::LinkLost
                | Self::ConnectionFailed(_)
                | Self::AttError(_)
                | Self::Host(_)
        )
    }
}

impl From<HostError> for GattClientError {
    fn from(e: HostError) -> Self {
        Self::Host(e)
    }
}

impl From<TableError> for GattClientError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::CapacityExceeded => Self::CapacityExceeded,
        }
    }
}

/// Runtime options for a [`Client`]
///
/// # Examples
///
/// ```rust
/// use pipit::{ClientOptions, ScanParameters, ScanType};
///
/// let passive = ClientOptions {
///     scan: ScanParameters {
///         scan_type: ScanType::Passive,
///         ..ScanParameters::default()
///     },
///     ..ClientOptions::default()
/// };
/// assert!(passive.enable_notifications);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClientOptions {
    /// Scan parameters used by `connect_to_server`
    pub scan: ScanParameters,
    /// Write the client configuration of every notifiable characteristic
    pub enable_notifications: bool,
    /// Read each readable characteristic's value during discovery
    pub read_values: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            scan: ScanParameters::default(),
            enable_notifications: true,
            read_values: true,
        }
    }
}
