// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The BTP (Bluetooth Test Protocol) capability set of the Implementation Under Test.
//!
//! Framing, response correlation and timeouts belong to the transport that implements [`Btp`].
//! This module only names the commands the PBP test cases issue and the data they return.

use async_trait::async_trait;
use std::fmt::{self, Display, Formatter};

use crate::api::{AddrType, AdvertisingData, BDAddr};
use crate::Result;

/// BTP services that can be registered on the IUT, with their BTP service IDs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Service {
    Gap = 1,
    Gatt = 2,
    Ascs = 13,
    Bap = 14,
    Cas = 21,
    Cap = 26,
    Pbp = 30,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::Gap => "gap",
            Service::Gatt => "gatt",
            Service::Ascs => "ascs",
            Service::Bap => "bap",
            Service::Cas => "cas",
            Service::Cap => "cap",
            Service::Pbp => "pbp",
        }
    }
}

impl Display for Service {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reply to the GAP "Read Controller Information" command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerInfo {
    pub address: BDAddr,
    pub address_type: AddrType,
    pub supported_settings: u32,
    pub current_settings: u32,
    pub name: String,
}

/// Commands sent to the IUT over BTP. Every call resolves once the IUT has answered.
#[async_trait]
pub trait Btp: Send + Sync {
    /// Registers a BTP service on the IUT (`core_reg_svc_*`).
    async fn core_reg_svc(&self, service: Service) -> Result<()>;

    async fn gap_read_ctrl_info(&self) -> Result<ControllerInfo>;

    /// Tells the IUT which peer address the PTS dongle uses.
    async fn set_pts_addr(&self, addr: BDAddr, addr_type: AddrType) -> Result<()>;

    /// Makes the IUT connectable.
    async fn gap_set_conn(&self) -> Result<()>;

    async fn gap_set_extended_advertising_on(&self) -> Result<()>;

    /// Starts advertising with the given advertising and scan response data.
    async fn gap_adv_ind_on(&self, ad: &AdvertisingData, sd: &AdvertisingData) -> Result<()>;

    async fn gap_conn(&self, addr: BDAddr, addr_type: AddrType) -> Result<()>;

    async fn gap_disconn(&self, addr: BDAddr, addr_type: AddrType) -> Result<()>;

    /// Computes the Resolvable Set Identifier of the IUT's coordinated set member.
    ///
    /// The RSI is derived from a fresh random value, so it may change between calls.
    async fn cas_get_member_rsi(&self) -> Result<[u8; 6]>;
}
