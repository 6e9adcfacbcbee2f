//! Recording host double for unit tests

use crate::address::PeerAddress;
use crate::event::Service;
use crate::host::{GattHost, HostError, ScanParameters};
use crate::table::Characteristic;
use crate::uuid::Uuid;
use bt_hci::param::ConnHandle;
use heapless::Vec;

/// Outbound request as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    StartScan,
    StopScan,
    Connect(PeerAddress),
    CancelConnect,
    Disconnect(u16),
    DiscoverPrimaryService(Uuid),
    DiscoverCharacteristics(Service),
    DiscoverDescriptors(u16),
    ReadValue(u16),
    ReadDescriptor(u16),
    WriteDescriptor(u16, u16),
    Register(u16),
    Unregister,
}

pub struct MockHost {
    requests: Vec<Request, 64>,
    /// When set, every fallible request is refused with this error
    pub refuse: Option<HostError>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            refuse: None,
        }
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn last(&self) -> Option<Request> {
        self.requests.last().copied()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    fn record(&mut self, request: Request) -> Result<(), HostError> {
        self.requests
            .push(request)
            .expect("mock host request log full");
        match self.refuse {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl GattHost for MockHost {
    fn start_scan(&mut self, _params: &ScanParameters) -> Result<(), HostError> {
        self.record(Request::StartScan)
    }

    fn stop_scan(&mut self) -> Result<(), HostError> {
        self.record(Request::StopScan)
    }

    fn connect(&mut self, peer: &PeerAddress) -> Result<(), HostError> {
        self.record(Request::Connect(*peer))
    }

    fn cancel_connect(&mut self) -> Result<(), HostError> {
        self.record(Request::CancelConnect)
    }

    fn disconnect(&mut self, conn: ConnHandle) -> Result<(), HostError> {
        self.record(Request::Disconnect(conn.raw()))
    }

    fn discover_primary_service(
        &mut self,
        _conn: ConnHandle,
        uuid: &Uuid,
    ) -> Result<(), HostError> {
        self.record(Request::DiscoverPrimaryService(*uuid))
    }

    fn discover_characteristics(
        &mut self,
        _conn: ConnHandle,
        service: &Service,
    ) -> Result<(), HostError> {
        self.record(Request::DiscoverCharacteristics(*service))
    }

    fn discover_descriptors(
        &mut self,
        _conn: ConnHandle,
        characteristic: &Characteristic,
    ) -> Result<(), HostError> {
        self.record(Request::DiscoverDescriptors(characteristic.value_handle))
    }

    fn read_value(&mut self, _conn: ConnHandle, value_handle: u16) -> Result<(), HostError> {
        self.record(Request::ReadValue(value_handle))
    }

    fn read_descriptor(&mut self, _conn: ConnHandle, handle: u16) -> Result<(), HostError> {
        self.record(Request::ReadDescriptor(handle))
    }

    fn write_descriptor(
        &mut self,
        _conn: ConnHandle,
        handle: u16,
        value: &[u8],
    ) -> Result<(), HostError> {
        let decoded = match value {
            [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
            _ => u16::MAX,
        };
        self.record(Request::WriteDescriptor(handle, decoded))
    }

    fn register_notification_listener(&mut self, conn: ConnHandle) -> Result<(), HostError> {
        self.record(Request::Register(conn.raw()))
    }

    fn unregister_notification_listener(&mut self) {
        self.requests
            .push(Request::Unregister)
            .expect("mock host request log full");
    }
}
