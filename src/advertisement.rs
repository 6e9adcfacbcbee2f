//! Advertisement data parsing
//!
//! Advertising payloads are a sequence of AD structures, each
//! `[length, ad_type, data...]` where `length` counts the type byte and the
//! data. Parsing stops at the first zero length or at a structure that would
//! run past the end of the payload.

use crate::constants::{
    AD_COMPLETE_16BIT_UUIDS, AD_COMPLETE_128BIT_UUIDS, AD_COMPLETE_LOCAL_NAME,
    AD_INCOMPLETE_16BIT_UUIDS, AD_INCOMPLETE_128BIT_UUIDS, AD_SHORTENED_LOCAL_NAME,
    MAX_LOCAL_NAME_LENGTH,
};
use crate::uuid::Uuid;
use heapless::String;

/// One AD structure borrowed from an advertising payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdStructure<'a> {
    /// AD type
    pub ad_type: u8,
    /// Payload following the type byte
    pub data: &'a [u8],
}

/// Iterator over the AD structures of an advertising payload
#[derive(Debug, Clone)]
pub struct AdStructures<'a> {
    remaining: &'a [u8],
}

impl<'a> AdStructures<'a> {
    /// Walk `data` as a sequence of AD structures
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { remaining: data }
    }
}

impl<'a> Iterator for AdStructures<'a> {
    type Item = AdStructure<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, rest) = self.remaining.split_first()?;
        let len = usize::from(len);
        if len == 0 || len > rest.len() {
            self.remaining = &[];
            return None;
        }
        let (structure, tail) = rest.split_at(len);
        self.remaining = tail;
        Some(AdStructure {
            ad_type: structure[0],
            data: &structure[1..],
        })
    }
}

/// Check whether an advertising payload lists `service` among its service UUIDs
///
/// Both complete and incomplete lists are searched, in 16-bit and 128-bit form.
#[must_use]
pub fn advertises_service(data: &[u8], service: &Uuid) -> bool {
    AdStructures::new(data).any(|ad| {
        let width = match ad.ad_type {
            AD_INCOMPLETE_16BIT_UUIDS | AD_COMPLETE_16BIT_UUIDS => 2,
            AD_INCOMPLETE_128BIT_UUIDS | AD_COMPLETE_128BIT_UUIDS => 16,
            _ => return false,
        };
        ad.data
            .chunks_exact(width)
            .filter_map(Uuid::from_le_bytes)
            .any(|uuid| uuid == *service)
    })
}

/// Extract the complete or shortened local name, truncated to the buffer size
///
/// Bytes that are not valid UTF-8 end the name.
#[must_use]
pub fn local_name(data: &[u8]) -> Option<String<MAX_LOCAL_NAME_LENGTH>> {
    let ad = AdStructures::new(data)
        .find(|ad| matches!(ad.ad_type, AD_COMPLETE_LOCAL_NAME | AD_SHORTENED_LOCAL_NAME))?;
    let valid = match core::str::from_utf8(ad.data) {
        Ok(name) => name,
        Err(e) => core::str::from_utf8(&ad.data[..e.valid_up_to()]).unwrap_or_default(),
    };
    let mut name = String::new();
    for c in valid.chars() {
        if name.push(c).is_err() {
            break;
        }
    }
    Some(name)
}
