//! Host Stack Capabilities
//!
//! The discovery state machine never talks to a controller directly. Every
//! outbound request goes through [`GattHost`], implemented by whatever owns the
//! Bluetooth host stack (a bt-hci based host, a vendor SoftDevice binding, or a
//! test double).
//!
//! ## Contract
//!
//! Requests are fire-and-forget: a method returns as soon as the request is
//! queued, and the outcome arrives later as [`crate::event::GapEvent`] or
//! [`crate::event::GattEvent`] values fed back into the client. A method only
//! returns `Err` when the host refuses the request outright. Each GATT
//! procedure produces zero or more result events followed by exactly one
//! `QueryComplete`; writes produce only the `QueryComplete`.

use crate::address::PeerAddress;
use crate::constants::{DEFAULT_SCAN_INTERVAL, DEFAULT_SCAN_WINDOW};
use crate::event::Service;
use crate::table::Characteristic;
use crate::uuid::Uuid;
use bt_hci::param::ConnHandle;

/// Synchronous refusal of an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// Another procedure is still running on the link
    Busy,
    /// The connection handle does not name a live link
    NotConnected,
    /// Host-specific status code
    Rejected(u8),
}

/// LE scan type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanType {
    /// Listen only
    Passive,
    /// Send scan requests to obtain scan responses
    #[default]
    Active,
}

/// LE scan filter policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanFilterPolicy {
    /// Report every advertiser
    #[default]
    AcceptAll,
    /// Report only advertisers on the controller's filter accept list
    FilterAcceptList,
}

/// Parameters passed to [`GattHost::start_scan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanParameters {
    /// Active or passive scanning
    pub scan_type: ScanType,
    /// Which advertisers the controller reports
    pub filter_policy: ScanFilterPolicy,
    /// Scan interval in 0.625 ms units
    pub interval: u16,
    /// Scan window in 0.625 ms units, at most `interval`
    pub window: u16,
}

impl Default for ScanParameters {
    fn default() -> Self {
        Self {
            scan_type: ScanType::default(),
            filter_policy: ScanFilterPolicy::default(),
            interval: DEFAULT_SCAN_INTERVAL,
            window: DEFAULT_SCAN_WINDOW,
        }
    }
}

/// Outbound capabilities the discovery state machine needs from the host stack
pub trait GattHost {
    /// Start LE scanning; advertising reports follow as `GapEvent::AdvertisingReport`
    ///
    /// # Errors
    /// Returns an error if the host refuses to start scanning.
    fn start_scan(&mut self, params: &ScanParameters) -> Result<(), HostError>;

    /// Stop LE scanning
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn stop_scan(&mut self) -> Result<(), HostError>;

    /// Create a connection; completion follows as `GapEvent::ConnectionComplete`
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn connect(&mut self, peer: &PeerAddress) -> Result<(), HostError>;

    /// Abandon a pending connection attempt
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn cancel_connect(&mut self) -> Result<(), HostError>;

    /// Tear down a link; completion follows as `GapEvent::DisconnectionComplete`
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn disconnect(&mut self, conn: ConnHandle) -> Result<(), HostError>;

    /// Discover primary services with the given UUID
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn discover_primary_service(&mut self, conn: ConnHandle, uuid: &Uuid)
    -> Result<(), HostError>;

    /// Discover every characteristic in the service's handle range
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn discover_characteristics(
        &mut self,
        conn: ConnHandle,
        service: &Service,
    ) -> Result<(), HostError>;

    /// Discover the descriptors belonging to a characteristic
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn discover_descriptors(
        &mut self,
        conn: ConnHandle,
        characteristic: &Characteristic,
    ) -> Result<(), HostError>;

    /// Read a characteristic value
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn read_value(&mut self, conn: ConnHandle, value_handle: u16) -> Result<(), HostError>;

    /// Read a descriptor value
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn read_descriptor(&mut self, conn: ConnHandle, handle: u16) -> Result<(), HostError>;

    /// Write a descriptor value
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn write_descriptor(
        &mut self,
        conn: ConnHandle,
        handle: u16,
        value: &[u8],
    ) -> Result<(), HostError>;

    /// Route notifications received on `conn` to the client
    ///
    /// # Errors
    /// Returns an error if the host refuses the request.
    fn register_notification_listener(&mut self, conn: ConnHandle) -> Result<(), HostError>;

    /// Stop routing notifications to the client
    fn unregister_notification_listener(&mut self);
}
