//! Service profiles
//!
//! A [`ServiceProfile`] tells the client which service it is after, how to
//! recognise a peer offering it, and what to do with notifications once the
//! service is up. One profile is written per target service and injected into
//! the [`crate::Client`] at construction.

use crate::advertisement::advertises_service;
use crate::event::AdvertisingReport;
use crate::table::CharacteristicRecord;
use crate::uuid::Uuid;

/// Identity of the target service plus the hooks the client calls into
pub trait ServiceProfile {
    /// UUID of the primary service to discover
    fn target_service_uuid(&self) -> Uuid;

    /// Human-readable service name, used in log output
    fn service_name(&self) -> &str {
        "service"
    }

    /// Peer-matching predicate applied to each advertising report while scanning
    ///
    /// The first report for which this returns `true` is connected to. The
    /// default accepts any advertiser listing the target service UUID.
    fn matches_advertisement(&self, report: &AdvertisingReport<'_>) -> bool {
        advertises_service(report.data, &self.target_service_uuid())
    }

    /// Notification listener, called after the record's value buffer was updated
    fn on_notification(&mut self, index: usize, record: &CharacteristicRecord) {
        let _ = (index, record);
    }
}

/// Profile matching a service by UUID alone, with no notification listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceUuid(pub Uuid);

impl ServiceProfile for ServiceUuid {
    fn target_service_uuid(&self) -> Uuid {
        self.0
    }
}
