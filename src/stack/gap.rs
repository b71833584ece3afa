// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

use crate::api::{AddrType, AdvertisingData, BDAddr};
use crate::btp::ControllerInfo;
use crate::{Error, Result};

/// GAP state of the IUT, as far as the test cases track it.
#[derive(Debug, Clone, Default)]
pub struct Gap {
    pub name: String,
    /// Advertising data used the next time advertising is enabled.
    pub ad: AdvertisingData,
    /// Scan response data used the next time advertising is enabled.
    pub sd: AdvertisingData,
    iut_addr: Option<(BDAddr, AddrType)>,
    connectable: bool,
    extended_advertising: bool,
    advertising: bool,
    connected: Option<BDAddr>,
}

impl Gap {
    pub fn new(name: &str) -> Self {
        Gap {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    /// Records what the controller reported about itself.
    pub fn set_ctrl_info(&mut self, info: &ControllerInfo) {
        self.iut_addr_set(info.address, info.address_type);
    }

    pub fn iut_addr_set(&mut self, addr: BDAddr, addr_type: AddrType) {
        self.iut_addr = Some((addr, addr_type));
    }

    pub fn iut_addr(&self) -> Option<(BDAddr, AddrType)> {
        self.iut_addr
    }

    /// The IUT address formatted for the PTS pixit table.
    pub fn iut_addr_get_str(&self) -> Result<String> {
        self.iut_addr
            .map(|(addr, _)| addr.to_pixit_string())
            .ok_or(Error::IutAddressUnknown)
    }

    pub fn set_connectable(&mut self) {
        self.connectable = true;
    }

    pub fn is_connectable(&self) -> bool {
        self.connectable
    }

    pub fn set_extended_advertising(&mut self) {
        self.extended_advertising = true;
    }

    pub fn is_extended_advertising(&self) -> bool {
        self.extended_advertising
    }

    pub fn set_advertising(&mut self, advertising: bool) {
        self.advertising = advertising;
    }

    pub fn is_advertising(&self) -> bool {
        self.advertising
    }

    pub fn set_connected(&mut self, peer: Option<BDAddr>) {
        self.connected = peer;
        if peer.is_some() {
            // Connectable advertising stops once a central connects.
            self.advertising = false;
        }
    }

    pub fn connected(&self) -> Option<BDAddr> {
        self.connected
    }
}
