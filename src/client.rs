//! GATT Client - Discovery State Machine
//!
//! Drives one peer service from scan to a fully populated characteristic
//! table:
//!
//! 1. Scan until the profile's predicate accepts an advertiser
//! 2. Connect and discover the primary service by UUID
//! 3. Enumerate every characteristic in the service range
//! 4. Per characteristic: descriptors, user description, value, client configuration
//! 5. Enable notifications on every notifiable characteristic
//! 6. Register the notification listener and set the ready rendezvous
//!
//! ## Event Flow
//!
//! The client is passive. The host stack delivers [`GapEvent`] and
//! [`GattEvent`] values through [`EventHandler`]; each handler inspects the
//! current state, updates the table, issues at most one follow-up request and
//! returns. Events the current state cannot consume are dropped. A
//! disconnection of the live link is honoured in every state.
//!
//! ## Failure
//!
//! Any fatal error (see [`GattClientError::is_fatal`]) tears the link down,
//! clears every per-connection field and returns the client to
//! [`ClientState::Idle`]. Nothing is retried; the caller decides whether to
//! call [`Client::connect_to_server`] again.

use crate::address::PeerAddress;
use crate::constants::{ATT_ATTRIBUTE_NOT_FOUND, ATT_SUCCESS, CCC_NOTIFY, HCI_SUCCESS};
use crate::event::{AdvertisingReport, EventHandler, GapEvent, GattEvent, Service};
use crate::host::{GattHost, HostError};
use crate::profile::ServiceProfile;
use crate::rendezvous::Rendezvous;
use crate::table::{
    Characteristic, CharacteristicRecord, CharacteristicTable, Descriptor, TableError,
};
use crate::{ClientOptions, ClientState, GattClientError};
use bt_hci::param::ConnHandle;
use embassy_sync::blocking_mutex::raw::RawMutex;

/// Client for a single GATT service on a single peer
///
/// `N` is the characteristic table capacity. The ready rendezvous is borrowed
/// so a consumer task can wait on it while the client is owned elsewhere.
pub struct Client<'r, P: ServiceProfile, M: RawMutex, const N: usize> {
    profile: P,
    options: ClientOptions,
    ready: &'r Rendezvous<M>,
    state: ClientState,
    server: Option<PeerAddress>,
    connection: Option<ConnHandle>,
    service: Option<Service>,
    table: CharacteristicTable<N>,
    current_characteristic: usize,
    current_descriptor: usize,
    listener_registered: bool,
    last_error: Option<GattClientError>,
}

impl<'r, P: ServiceProfile, M: RawMutex, const N: usize> Client<'r, P, M, N> {
    /// Create a client in [`ClientState::Off`]
    #[must_use]
    pub const fn new(profile: P, options: ClientOptions, ready: &'r Rendezvous<M>) -> Self {
        Self {
            profile,
            options,
            ready,
            state: ClientState::Off,
            server: None,
            connection: None,
            service: None,
            table: CharacteristicTable::new(),
            current_characteristic: 0,
            current_descriptor: 0,
            listener_registered: false,
            last_error: None,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> ClientState {
        self.state
    }

    /// Whether the characteristic table is complete and notifications are routed
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == ClientState::W4Ready
    }

    /// Service profile
    #[must_use]
    pub const fn profile(&self) -> &P {
        &self.profile
    }

    /// Mutable access to the service profile
    pub fn profile_mut(&mut self) -> &mut P {
        &mut self.profile
    }

    /// Options the client was built with
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Ready rendezvous
    #[must_use]
    pub const fn ready(&self) -> &'r Rendezvous<M> {
        self.ready
    }

    /// Address of the matched server, set once a matching advertisement was seen
    #[must_use]
    pub const fn server_address(&self) -> Option<PeerAddress> {
        self.server
    }

    /// Handle of the live link
    #[must_use]
    pub const fn connection_handle(&self) -> Option<ConnHandle> {
        self.connection
    }

    /// Matched service, set once service discovery succeeded
    #[must_use]
    pub const fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    /// Number of valid entries in the characteristic table
    #[must_use]
    pub fn characteristic_count(&self) -> usize {
        self.table.len()
    }

    /// Characteristic record at `index`
    #[must_use]
    pub fn characteristic(&self, index: usize) -> Option<&CharacteristicRecord> {
        self.table.get(index)
    }

    /// All discovered characteristic records
    #[must_use]
    pub const fn characteristics(&self) -> &CharacteristicTable<N> {
        &self.table
    }

    /// Whether the notification listener is registered with the host
    #[must_use]
    pub const fn is_listener_registered(&self) -> bool {
        self.listener_registered
    }

    /// The error that aborted the last discovery cycle, cleared by the next connect
    #[must_use]
    pub const fn last_error(&self) -> Option<GattClientError> {
        self.last_error
    }

    /// Start a full discovery cycle
    ///
    /// Only valid in [`ClientState::Idle`]. Progress is reported through the
    /// event handlers; wait on [`Client::ready`] to learn when the table is complete.
    ///
    /// # Errors
    /// Returns [`GattClientError::InvalidState`] outside `Idle`, or
    /// [`GattClientError::Host`] if the host refuses to scan (the client stays idle).
    pub fn connect_to_server<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<(), GattClientError> {
        if self.state != ClientState::Idle {
            warn!("[CLIENT] connect requested in {:?}", self.state);
            return Err(GattClientError::InvalidState);
        }
        self.last_error = None;
        self.ready.reset();
        host.start_scan(&self.options.scan)?;
        info!("[CLIENT] scanning for {}", self.profile.service_name());
        self.enter(ClientState::W4ScanResult);
        Ok(())
    }

    /// Tear down any scan, pending connection or link and return to idle
    ///
    /// Idempotent: a no-op when already `Idle` or `Off`.
    pub fn disconnect_from_server<H: GattHost + ?Sized>(&mut self, host: &mut H) {
        if matches!(self.state, ClientState::Off | ClientState::Idle) {
            return;
        }
        info!("[CLIENT] disconnecting from server in {:?}", self.state);
        self.tear_down_link(host);
        self.reset(host, ClientState::Idle);
    }

    fn enter(&mut self, next: ClientState) {
        debug!("[CLIENT] {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Clear every per-connection field; the table storage is kept for reuse
    fn reset<H: GattHost + ?Sized>(&mut self, host: &mut H, next: ClientState) {
        if self.listener_registered {
            host.unregister_notification_listener();
            self.listener_registered = false;
        }
        self.server = None;
        self.connection = None;
        self.service = None;
        self.table.clear();
        self.current_characteristic = 0;
        self.current_descriptor = 0;
        self.ready.reset();
        self.enter(next);
    }

    /// Undo whatever the current state has in flight with the host
    fn tear_down_link<H: GattHost + ?Sized>(&mut self, host: &mut H) {
        let outcome = match (self.state, self.connection) {
            (ClientState::W4ScanResult, _) => host.stop_scan(),
            (ClientState::W4Connect, _) => host.cancel_connect(),
            (_, Some(conn)) => host.disconnect(conn),
            (_, None) => Ok(()),
        };
        if let Err(e) = outcome {
            warn!("[CLIENT] teardown request refused: {:?}", e);
        }
    }

    /// Return to idle without touching the host link, recording `error`
    fn fail<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        error: GattClientError,
    ) -> Result<(), GattClientError> {
        error!("[CLIENT] discovery aborted in {:?}: {:?}", self.state, error);
        self.reset(host, ClientState::Idle);
        self.last_error = Some(error);
        Err(error)
    }

    /// Tear the link down, then fail
    fn abort<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        error: GattClientError,
    ) -> Result<(), GattClientError> {
        self.tear_down_link(host);
        self.fail(host, error)
    }

    /// Abort on a refused request
    fn issued<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        outcome: Result<(), HostError>,
    ) -> Result<(), GattClientError> {
        match outcome {
            Ok(()) => Ok(()),
            Err(e) => self.abort(host, GattClientError::Host(e)),
        }
    }

    fn link(&self) -> Result<ConnHandle, GattClientError> {
        self.connection.ok_or(GattClientError::InvalidState)
    }

    fn current_record(&self) -> Result<&CharacteristicRecord, GattClientError> {
        self.table
            .get(self.current_characteristic)
            .ok_or(GattClientError::InvalidState)
    }

    fn current_record_mut(&mut self) -> Result<&mut CharacteristicRecord, GattClientError> {
        self.table
            .get_mut(self.current_characteristic)
            .ok_or(GattClientError::InvalidState)
    }

    fn unexpected(&self, what: &str) -> Result<(), GattClientError> {
        warn!("[CLIENT] dropping {} in {:?}", what, self.state);
        Err(GattClientError::UnexpectedEvent)
    }

    // GAP

    fn on_advertising_report<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        report: &AdvertisingReport<'_>,
    ) -> Result<(), GattClientError> {
        if self.state != ClientState::W4ScanResult {
            trace!("[CLIENT] advertisement outside scan");
            return Err(GattClientError::UnexpectedEvent);
        }
        if !self.profile.matches_advertisement(report) {
            return Err(GattClientError::NoMatchingPeer);
        }

        info!(
            "[CLIENT] found {} at {} (rssi {})",
            self.profile.service_name(),
            report.peer.addr.format_hex().as_str(),
            report.rssi
        );
        self.server = Some(report.peer);
        let stopped = host.stop_scan();
        self.issued(host, stopped)?;
        self.enter(ClientState::W4Connect);
        let connecting = host.connect(&report.peer);
        self.issued(host, connecting)
    }

    fn on_connection_complete<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        status: u8,
        handle: ConnHandle,
        peer: PeerAddress,
    ) -> Result<(), GattClientError> {
        if self.state != ClientState::W4Connect {
            let ours = self.connection.map(|c| c.raw()) == Some(handle.raw());
            if status == HCI_SUCCESS && !ours {
                // link came up after the attempt was cancelled; nobody owns it
                warn!("[CLIENT] closing orphan link {}", handle.raw());
                if let Err(e) = host.disconnect(handle) {
                    warn!("[CLIENT] teardown request refused: {:?}", e);
                }
            }
            return self.unexpected("connection complete");
        }
        if status != HCI_SUCCESS {
            return self.fail(host, GattClientError::ConnectionFailed(status));
        }

        info!("[CLIENT] connected, handle {}", handle.raw());
        self.connection = Some(handle);
        self.server = Some(peer);
        self.enter(ClientState::W4ServiceResult);
        let uuid = self.profile.target_service_uuid();
        let outcome = host.discover_primary_service(handle, &uuid);
        self.issued(host, outcome)
    }

    /// Only the live link resets the client; without a link, `disconnect_from_server` is the reset path
    fn on_disconnection_complete<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        handle: ConnHandle,
        reason: u8,
    ) -> Result<(), GattClientError> {
        match self.connection {
            Some(live) if live.raw() == handle.raw() => {
                info!(
                    "[CLIENT] link {} lost in {:?}, reason {}",
                    handle.raw(),
                    self.state,
                    reason
                );
                self.fail(host, GattClientError::LinkLost)
            }
            _ => {
                debug!("[CLIENT] ignoring disconnection of stale link {}", handle.raw());
                Ok(())
            }
        }
    }

    // GATT

    fn on_service_event<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &GattEvent<'_>,
    ) -> Result<(), GattClientError> {
        match *event {
            GattEvent::ServiceQueryResult(service) => {
                if service.uuid != self.profile.target_service_uuid() {
                    return self.unexpected("foreign service");
                }
                if self.service.is_none() {
                    debug!(
                        "[CLIENT] service range {}..={}",
                        service.start_handle,
                        service.end_handle
                    );
                    self.service = Some(service);
                }
                Ok(())
            }
            GattEvent::QueryComplete { att_status } => {
                if att_status != ATT_SUCCESS && att_status != ATT_ATTRIBUTE_NOT_FOUND {
                    return self.abort(host, GattClientError::AttError(att_status));
                }
                let Some(service) = self.service else {
                    return self.abort(host, GattClientError::ServiceNotFound);
                };
                let conn = self.link()?;
                self.enter(ClientState::W4CharacteristicResult);
                let outcome = host.discover_characteristics(conn, &service);
                self.issued(host, outcome)
            }
            _ => self.unexpected("gatt event"),
        }
    }

    fn on_characteristic_event<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &GattEvent<'_>,
    ) -> Result<(), GattClientError> {
        match *event {
            GattEvent::CharacteristicQueryResult(characteristic) => {
                self.store_characteristic(host, characteristic)
            }
            GattEvent::QueryComplete { att_status } => {
                if att_status != ATT_SUCCESS && att_status != ATT_ATTRIBUTE_NOT_FOUND {
                    return self.abort(host, GattClientError::AttError(att_status));
                }
                info!("[CLIENT] {} characteristics discovered", self.table.len());
                self.current_characteristic = 0;
                self.explore_characteristic(host)
            }
            _ => self.unexpected("gatt event"),
        }
    }

    fn store_characteristic<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        characteristic: Characteristic,
    ) -> Result<(), GattClientError> {
        match self.table.append(CharacteristicRecord::new(characteristic)) {
            Ok(index) => {
                debug!(
                    "[CLIENT] characteristic {} at value handle {}",
                    index,
                    characteristic.value_handle
                );
                Ok(())
            }
            Err(TableError::CapacityExceeded) => {
                error!(
                    "[CLIENT] peer exposes more than {} characteristics",
                    self.table.capacity()
                );
                self.abort(host, GattClientError::CapacityExceeded)
            }
        }
    }

    fn on_descriptor_event<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &GattEvent<'_>,
    ) -> Result<(), GattClientError> {
        match *event {
            GattEvent::DescriptorQueryResult(descriptor) => self.store_descriptor(descriptor),
            GattEvent::QueryComplete { att_status } => {
                if att_status != ATT_SUCCESS && att_status != ATT_ATTRIBUTE_NOT_FOUND {
                    return self.abort(host, GattClientError::AttError(att_status));
                }
                self.read_description(host)
            }
            _ => self.unexpected("gatt event"),
        }
    }

    fn store_descriptor(&mut self, descriptor: Descriptor) -> Result<(), GattClientError> {
        let index = self.current_characteristic;
        let record = self.current_record_mut()?;
        let stored = record.push_descriptor(descriptor);
        let filled = record.descriptors().len();
        if stored {
            self.current_descriptor = filled - 1;
        } else {
            warn!(
                "[CLIENT] characteristic {} has more than two descriptors, dropping handle {}",
                index,
                descriptor.handle
            );
        }
        Ok(())
    }

    fn on_description_event<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &GattEvent<'_>,
    ) -> Result<(), GattClientError> {
        match *event {
            GattEvent::DescriptorValueQueryResult { handle, value } => {
                let index = self.current_characteristic;
                let slot = self.current_descriptor;
                let record = self.current_record_mut()?;
                if record.descriptor(slot).map(|d| d.handle) != Some(handle) {
                    return self.unexpected("description for another descriptor");
                }
                if record.set_description(value) {
                    warn!(
                        "[CLIENT] description of characteristic {} truncated from {} bytes",
                        index,
                        value.len()
                    );
                }
                Ok(())
            }
            GattEvent::QueryComplete { att_status } => {
                if att_status != ATT_SUCCESS {
                    warn!("[CLIENT] description read failed, status {}", att_status);
                }
                self.read_value(host)
            }
            _ => self.unexpected("gatt event"),
        }
    }

    fn on_value_event<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &GattEvent<'_>,
    ) -> Result<(), GattClientError> {
        match *event {
            GattEvent::CharacteristicValueQueryResult { value_handle, value } => {
                let index = self.current_characteristic;
                let record = self.current_record_mut()?;
                if record.value_handle() != value_handle {
                    return self.unexpected("value for another characteristic");
                }
                if record.set_value(value) {
                    warn!(
                        "[CLIENT] value of characteristic {} truncated from {} bytes",
                        index,
                        value.len()
                    );
                }
                Ok(())
            }
            GattEvent::QueryComplete { att_status } => {
                if att_status != ATT_SUCCESS {
                    warn!("[CLIENT] value read failed, status {}", att_status);
                }
                self.read_config(host)
            }
            _ => self.unexpected("gatt event"),
        }
    }

    fn on_config_event<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &GattEvent<'_>,
    ) -> Result<(), GattClientError> {
        match *event {
            GattEvent::DescriptorValueQueryResult { handle, value } => {
                let slot = self.current_descriptor;
                let record = self.current_record_mut()?;
                if record.descriptor(slot).map(|d| d.handle) != Some(handle) {
                    return self.unexpected("configuration for another descriptor");
                }
                record.set_configuration_bytes(value);
                Ok(())
            }
            GattEvent::QueryComplete { att_status } => {
                if att_status != ATT_SUCCESS {
                    warn!("[CLIENT] configuration read failed, status {}", att_status);
                }
                self.current_characteristic += 1;
                self.explore_characteristic(host)
            }
            _ => self.unexpected("gatt event"),
        }
    }

    fn on_enable_notifications_event<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &GattEvent<'_>,
    ) -> Result<(), GattClientError> {
        match *event {
            GattEvent::QueryComplete { att_status } => {
                if att_status != ATT_SUCCESS {
                    return self.abort(host, GattClientError::AttError(att_status));
                }
                self.current_record_mut()?.mark_notifications_enabled();
                self.current_characteristic += 1;
                self.enable_next_notification(host)
            }
            _ => self.unexpected("gatt event"),
        }
    }

    fn on_ready_event(&mut self, event: &GattEvent<'_>) -> Result<(), GattClientError> {
        match *event {
            GattEvent::Notification { value_handle, value } => {
                self.deliver_notification(value_handle, value)
            }
            _ => self.unexpected("late gatt event"),
        }
    }

    fn deliver_notification(
        &mut self,
        value_handle: u16,
        value: &[u8],
    ) -> Result<(), GattClientError> {
        let Some(index) = self.table.position_by_value_handle(value_handle) else {
            return self.unexpected("notification for unknown handle");
        };
        let Some(record) = self.table.get_mut(index) else {
            return Err(GattClientError::InvalidState);
        };
        if record.set_value(value) {
            warn!("[CLIENT] notification for {} truncated", index);
        }
        trace!("[CLIENT] notification for characteristic {}", index);
        self.profile.on_notification(index, record);
        Ok(())
    }

    // Outbound steps, each entering the state that waits for its answer

    fn explore_characteristic<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<(), GattClientError> {
        if self.current_characteristic >= self.table.len() {
            self.current_characteristic = 0;
            return self.enable_next_notification(host);
        }
        let conn = self.link()?;
        let characteristic = *self.current_record()?.characteristic();
        self.current_descriptor = 0;
        self.enter(ClientState::W4CharacteristicDescriptor);
        let outcome = host.discover_descriptors(conn, &characteristic);
        self.issued(host, outcome)
    }

    fn read_description<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<(), GattClientError> {
        let record = self.current_record()?;
        let Some(slot) = record.user_description_slot() else {
            return self.read_value(host);
        };
        let Some(handle) = record.descriptor(slot).map(|d| d.handle) else {
            return self.read_value(host);
        };
        let conn = self.link()?;
        self.current_descriptor = slot;
        self.enter(ClientState::W4CharacteristicDescription);
        let outcome = host.read_descriptor(conn, handle);
        self.issued(host, outcome)
    }

    fn read_value<H: GattHost + ?Sized>(&mut self, host: &mut H) -> Result<(), GattClientError> {
        let characteristic = *self.current_record()?.characteristic();
        if !self.options.read_values || !characteristic.is_readable() {
            return self.read_config(host);
        }
        let conn = self.link()?;
        self.enter(ClientState::W4CharacteristicValue);
        let outcome = host.read_value(conn, characteristic.value_handle);
        self.issued(host, outcome)
    }

    fn read_config<H: GattHost + ?Sized>(&mut self, host: &mut H) -> Result<(), GattClientError> {
        let record = self.current_record()?;
        let target = record
            .client_configuration_slot()
            .and_then(|slot| record.descriptor(slot).map(|d| (slot, d.handle)));
        let Some((slot, handle)) = target else {
            self.current_characteristic += 1;
            return self.explore_characteristic(host);
        };
        let conn = self.link()?;
        self.current_descriptor = slot;
        self.enter(ClientState::W4CharacteristicConfig);
        let outcome = host.read_descriptor(conn, handle);
        self.issued(host, outcome)
    }

    /// Write the notify bit to the next notifiable characteristic at or after the cursor
    fn enable_next_notification<H: GattHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<(), GattClientError> {
        if !self.options.enable_notifications {
            return self.finish(host);
        }
        let start = self.current_characteristic;
        let next = self
            .table
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, record)| record.wants_notifications())
            .and_then(|(index, record)| {
                let slot = record.client_configuration_slot()?;
                Some((index, slot, record.descriptor(slot)?.handle))
            });
        let Some((index, slot, handle)) = next else {
            return self.finish(host);
        };

        let conn = self.link()?;
        self.current_characteristic = index;
        self.current_descriptor = slot;
        if self.state != ClientState::W4EnableNotificationsComplete {
            self.enter(ClientState::W4EnableNotificationsComplete);
        }
        debug!("[CLIENT] enabling notifications on characteristic {}", index);
        let outcome = host.write_descriptor(conn, handle, &CCC_NOTIFY.to_le_bytes());
        self.issued(host, outcome)
    }

    fn finish<H: GattHost + ?Sized>(&mut self, host: &mut H) -> Result<(), GattClientError> {
        let conn = self.link()?;
        let registered = host.register_notification_listener(conn);
        self.issued(host, registered)?;
        self.listener_registered = true;
        self.current_characteristic = 0;
        self.current_descriptor = 0;
        self.enter(ClientState::W4Ready);
        info!(
            "[CLIENT] {} ready with {} characteristics",
            self.profile.service_name(),
            self.table.len()
        );
        self.ready.set();
        Ok(())
    }
}

impl<H, P, M, const N: usize> EventHandler<H> for Client<'_, P, M, N>
where
    H: GattHost + ?Sized,
    P: ServiceProfile,
    M: RawMutex,
{
    fn handle_gap_event(
        &mut self,
        host: &mut H,
        event: &GapEvent<'_>,
    ) -> Result<(), GattClientError> {
        match *event {
            GapEvent::PoweredOn => {
                if self.state == ClientState::Off {
                    self.enter(ClientState::Idle);
                }
                Ok(())
            }
            GapEvent::PoweredOff => {
                let was_active = self.state > ClientState::Idle;
                if self.state != ClientState::Off {
                    self.reset(host, ClientState::Off);
                }
                if was_active {
                    self.last_error = Some(GattClientError::LinkLost);
                    return Err(GattClientError::LinkLost);
                }
                Ok(())
            }
            GapEvent::AdvertisingReport(ref report) => self.on_advertising_report(host, report),
            GapEvent::ConnectionComplete {
                status,
                handle,
                peer,
            } => self.on_connection_complete(host, status, handle, peer),
            GapEvent::DisconnectionComplete { handle, reason } => {
                self.on_disconnection_complete(host, handle, reason)
            }
        }
    }

    fn handle_gatt_event(
        &mut self,
        host: &mut H,
        event: &GattEvent<'_>,
    ) -> Result<(), GattClientError> {
        if let GattEvent::Notification { value_handle, .. } = *event {
            if !self.listener_registered {
                trace!("[CLIENT] notification for {} before listener", value_handle);
                return Ok(());
            }
        }
        match self.state {
            ClientState::W4ServiceResult => self.on_service_event(host, event),
            ClientState::W4CharacteristicResult => self.on_characteristic_event(host, event),
            ClientState::W4CharacteristicDescriptor => self.on_descriptor_event(host, event),
            ClientState::W4CharacteristicDescription => self.on_description_event(host, event),
            ClientState::W4CharacteristicValue => self.on_value_event(host, event),
            ClientState::W4CharacteristicConfig => self.on_config_event(host, event),
            ClientState::W4EnableNotificationsComplete => {
                self.on_enable_notifications_event(host, event)
            }
            ClientState::W4Ready => self.on_ready_event(event),
            ClientState::Off
            | ClientState::Idle
            | ClientState::W4ScanResult
            | ClientState::W4Connect => self.unexpected("gatt event"),
        }
    }
}
