// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The `api` module contains the value types shared by the BTP, PTS and stack layers.

pub(crate) mod bdaddr;
pub mod bleuuid;

use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_cr as serde;
use std::collections::BTreeMap;

use crate::{Error, Result};

pub use self::bdaddr::{AddrType, BDAddr, ParseBDAddrError};
pub use self::bleuuid::ServiceUuid;

/// Longest payload a single AD structure can carry.
pub const MAX_AD_DATA_LEN: usize = u8::MAX as usize - 1;

/// Advertising data types, as assigned in the Bluetooth SIG "Assigned Numbers" document.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_cr")
)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum AdType {
    Flags = 0x01,
    Uuid16Some = 0x02,
    NameShort = 0x08,
    NameFull = 0x09,
    Uuid16SvcData = 0x16,
    Appearance = 0x19,
    Rsi = 0x2E,
}

impl AdType {
    pub fn num(&self) -> u8 {
        *self as u8
    }
}

bitflags! {
    /// Audio context types, as used in PACS and in the ASCS announcement.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Context: u16 {
        const UNSPECIFIED = 0x0001;
        const CONVERSATIONAL = 0x0002;
        const MEDIA = 0x0004;
        const GAME = 0x0008;
        const INSTRUCTIONAL = 0x0010;
        const VOICE_ASSISTANTS = 0x0020;
        const LIVE = 0x0040;
        const SOUND_EFFECTS = 0x0080;
        const NOTIFICATIONS = 0x0100;
        const RINGTONE = 0x0200;
        const ALERTS = 0x0400;
        const EMERGENCY_ALARM = 0x0800;
    }
}

/// Advertising (or scan response) data, keyed by AD type.
///
/// Every AD type maps to an ordered list of entries. Entries under the same type are emitted as
/// separate AD structures in insertion order, which is how several service data entries end up
/// in one advertisement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvertisingData {
    entries: BTreeMap<AdType, Vec<Vec<u8>>>,
}

impl AdvertisingData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every entry stored under `ad_type` with `data`.
    pub fn set(&mut self, ad_type: AdType, data: Vec<u8>) {
        self.entries.insert(ad_type, vec![data]);
    }

    /// Appends `data` after the entries already stored under `ad_type`.
    pub fn append(&mut self, ad_type: AdType, data: Vec<u8>) {
        self.entries.entry(ad_type).or_default().push(data);
    }

    pub fn get(&self, ad_type: AdType) -> &[Vec<u8>] {
        self.entries
            .get(&ad_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AdType, &[u8])> {
        self.entries
            .iter()
            .flat_map(|(ad_type, list)| list.iter().map(move |data| (*ad_type, data.as_slice())))
    }

    /// Serializes the data as a sequence of `length | type | data` AD structures.
    ///
    /// The length octet covers the type and the data, so an entry can carry at most
    /// [`MAX_AD_DATA_LEN`] bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        for (ad_type, data) in self.iter() {
            let len = u8::try_from(data.len() + 1).map_err(|_| Error::AdDataTooLong {
                ad_type: ad_type.num(),
                len: data.len(),
            })?;
            bytes.push(len);
            bytes.push(ad_type.num());
            bytes.extend_from_slice(data);
        }
        Ok(bytes)
    }
}
