//! Event Dispatch Layer
//!
//! The host stack reports two independent streams of events:
//!
//! * [`GapEvent`] - power state, advertising reports and link lifecycle
//! * [`GattEvent`] - attribute protocol results and notifications
//!
//! Whatever owns the host-stack registration holds a value implementing
//! [`EventHandler`] and feeds both streams into it, one event at a time, in
//! delivery order. Handlers run to completion and never block; any follow-up
//! request is issued through the [`GattHost`] passed alongside the event.

use crate::GattClientError;
use crate::address::{AddressType, BluetoothAddress, PeerAddress};
use crate::host::GattHost;
use crate::table::{Characteristic, Descriptor};
use crate::uuid::Uuid;
use bt_hci::param::{ConnHandle, LeAdvReport};

/// Primary service found on the peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    /// First attribute handle of the service
    pub start_handle: u16,
    /// Last attribute handle of the service
    pub end_handle: u16,
    /// Service UUID
    pub uuid: Uuid,
}

/// Advertising report delivered while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvertisingReport<'a> {
    /// Advertiser identity
    pub peer: PeerAddress,
    /// Received signal strength in dBm
    pub rssi: i8,
    /// Raw advertising data (AD structures)
    pub data: &'a [u8],
}

impl<'a> From<&LeAdvReport<'a>> for AdvertisingReport<'a> {
    fn from(report: &LeAdvReport<'a>) -> Self {
        Self {
            peer: PeerAddress::new(
                BluetoothAddress::from(report.addr),
                AddressType::from(report.addr_kind),
            ),
            rssi: report.rssi,
            data: report.data,
        }
    }
}

/// Link-layer and connection lifecycle events
#[derive(Debug, Clone, Copy)]
pub enum GapEvent<'a> {
    /// Host stack is up and ready
    PoweredOn,
    /// Host stack shut down
    PoweredOff,
    /// Advertisement received while scanning
    AdvertisingReport(AdvertisingReport<'a>),
    /// Outcome of a connection request
    ConnectionComplete {
        /// HCI status, zero on success
        status: u8,
        /// Handle of the new link
        handle: ConnHandle,
        /// Peer identity
        peer: PeerAddress,
    },
    /// A link went down
    DisconnectionComplete {
        /// Handle of the lost link
        handle: ConnHandle,
        /// HCI reason code
        reason: u8,
    },
}

/// Attribute protocol events
#[derive(Debug, Clone, Copy)]
pub enum GattEvent<'a> {
    /// A primary service matched the requested UUID
    ServiceQueryResult(Service),
    /// A characteristic was found in the service range
    CharacteristicQueryResult(Characteristic),
    /// A descriptor was found for the characteristic being explored
    DescriptorQueryResult(Descriptor),
    /// Value read from a characteristic
    CharacteristicValueQueryResult {
        /// Value handle that was read
        value_handle: u16,
        /// Value bytes
        value: &'a [u8],
    },
    /// Value read from a descriptor
    DescriptorValueQueryResult {
        /// Descriptor handle that was read
        handle: u16,
        /// Value bytes
        value: &'a [u8],
    },
    /// The outstanding procedure finished; also acknowledges writes
    QueryComplete {
        /// ATT status, zero on success
        att_status: u8,
    },
    /// Unsolicited value update
    Notification {
        /// Value handle that changed
        value_handle: u16,
        /// New value bytes
        value: &'a [u8],
    },
}

/// Either kind of host event, for owners that funnel both streams through one queue
#[derive(Debug, Clone, Copy)]
pub enum HostEvent<'a> {
    /// Link-layer event
    Gap(GapEvent<'a>),
    /// Attribute protocol event
    Gatt(GattEvent<'a>),
}

impl<'a> From<GapEvent<'a>> for HostEvent<'a> {
    fn from(event: GapEvent<'a>) -> Self {
        Self::Gap(event)
    }
}

impl<'a> From<GattEvent<'a>> for HostEvent<'a> {
    fn from(event: GattEvent<'a>) -> Self {
        Self::Gatt(event)
    }
}

/// Capability set implemented by each concrete service client
pub trait EventHandler<H: GattHost + ?Sized> {
    /// Handle a link-layer or connection lifecycle event
    ///
    /// # Errors
    /// Returns the reason the event could not advance the client. Fatal errors
    /// (see [`GattClientError::is_fatal`]) mean the discovery cycle was aborted.
    fn handle_gap_event(&mut self, host: &mut H, event: &GapEvent<'_>)
    -> Result<(), GattClientError>;

    /// Handle an attribute protocol event
    ///
    /// # Errors
    /// Returns the reason the event could not advance the client. Fatal errors
    /// (see [`GattClientError::is_fatal`]) mean the discovery cycle was aborted.
    fn handle_gatt_event(
        &mut self,
        host: &mut H,
        event: &GattEvent<'_>,
    ) -> Result<(), GattClientError>;
}

/// Route a host event to the matching handler entry point
///
/// # Errors
/// Propagates whatever the handler returns.
pub fn dispatch<H: GattHost + ?Sized>(
    handler: &mut dyn EventHandler<H>,
    host: &mut H,
    event: &HostEvent<'_>,
) -> Result<(), GattClientError> {
    match event {
        HostEvent::Gap(gap) => handler.handle_gap_event(host, gap),
        HostEvent::Gatt(gatt) => handler.handle_gatt_event(host, gatt),
    }
}
