// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Recording stand-ins for the BTP and PTS collaborators.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::api::{AddrType, AdvertisingData, BDAddr};
use crate::btp::{Btp, ControllerInfo, Service};
use crate::pts::PtsClient;
use crate::{Error, Result};

pub(crate) const IUT_ADDR: &str = "C0:DE:C0:FF:EE:01";
pub(crate) const PTS_ADDR: &str = "00:1B:DC:07:32:E6";

#[derive(Debug, Default)]
pub(crate) struct MockBtp {
    pub calls: Mutex<Vec<String>>,
    pub advertised: Mutex<Vec<AdvertisingData>>,
    rsi_counter: Mutex<u8>,
    fail_on: Option<&'static str>,
}

impl MockBtp {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose `command` always fails.
    pub fn failing_on(command: &'static str) -> Self {
        MockBtp {
            fail_on: Some(command),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, command: &'static str, call: String) -> Result<()> {
        if self.fail_on == Some(command) {
            return Err(Error::Btp {
                command,
                reason: "status error".into(),
            });
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl Btp for MockBtp {
    async fn core_reg_svc(&self, service: Service) -> Result<()> {
        self.record("core_reg_svc", format!("core_reg_svc_{}", service))
    }

    async fn gap_read_ctrl_info(&self) -> Result<ControllerInfo> {
        self.record("gap_read_ctrl_info", "gap_read_ctrl_info".into())?;
        Ok(ControllerInfo {
            address: IUT_ADDR.parse()?,
            address_type: AddrType::LePublic,
            supported_settings: 0,
            current_settings: 0,
            name: "Zephyr".into(),
        })
    }

    async fn set_pts_addr(&self, addr: BDAddr, addr_type: AddrType) -> Result<()> {
        self.record(
            "set_pts_addr",
            format!("set_pts_addr {} {}", addr, addr_type.num()),
        )
    }

    async fn gap_set_conn(&self) -> Result<()> {
        self.record("gap_set_conn", "gap_set_conn".into())
    }

    async fn gap_set_extended_advertising_on(&self) -> Result<()> {
        self.record(
            "gap_set_extended_advertising_on",
            "gap_set_extended_advertising_on".into(),
        )
    }

    async fn gap_adv_ind_on(&self, ad: &AdvertisingData, _sd: &AdvertisingData) -> Result<()> {
        self.record("gap_adv_ind_on", "gap_adv_ind_on".into())?;
        self.advertised.lock().unwrap().push(ad.clone());
        Ok(())
    }

    async fn gap_conn(&self, addr: BDAddr, _addr_type: AddrType) -> Result<()> {
        self.record("gap_conn", format!("gap_conn {}", addr))
    }

    async fn gap_disconn(&self, addr: BDAddr, _addr_type: AddrType) -> Result<()> {
        self.record("gap_disconn", format!("gap_disconn {}", addr))
    }

    async fn cas_get_member_rsi(&self) -> Result<[u8; 6]> {
        self.record("cas_get_member_rsi", "cas_get_member_rsi".into())?;
        let mut counter = self.rsi_counter.lock().unwrap();
        *counter += 1;
        Ok([0x10, 0x20, 0x30, 0x40, 0x50, *counter])
    }
}

#[derive(Debug)]
pub(crate) struct MockPts {
    addr: BDAddr,
    test_cases: Vec<String>,
    pub pixits: Mutex<Vec<(String, String, String)>>,
    pub updates: Mutex<Vec<(String, String, String)>>,
    fail_on: Option<&'static str>,
}

impl MockPts {
    pub fn new(addr: BDAddr, test_cases: Vec<&str>) -> Self {
        MockPts {
            addr,
            test_cases: test_cases.into_iter().map(String::from).collect(),
            pixits: Mutex::new(vec![]),
            updates: Mutex::new(vec![]),
            fail_on: None,
        }
    }

    pub fn with_test_cases(test_cases: Vec<&str>) -> Self {
        Self::new(PTS_ADDR.parse().unwrap(), test_cases)
    }

    /// A PTS instance whose `request` always fails.
    pub fn failing_on(request: &'static str, test_cases: Vec<&str>) -> Self {
        MockPts {
            fail_on: Some(request),
            ..Self::with_test_cases(test_cases)
        }
    }

    fn check(&self, request: &'static str) -> Result<()> {
        if self.fail_on == Some(request) {
            return Err(Error::Pts(format!("{} rejected", request)));
        }
        Ok(())
    }
}

#[async_trait]
impl PtsClient for MockPts {
    fn bd_addr(&self) -> BDAddr {
        self.addr
    }

    async fn set_pixit(&self, project: &str, param: &str, value: &str) -> Result<()> {
        self.check("set_pixit")?;
        self.pixits
            .lock()
            .unwrap()
            .push((project.into(), param.into(), value.into()));
        Ok(())
    }

    async fn update_pixit_param(&self, project: &str, param: &str, value: &str) -> Result<()> {
        self.check("update_pixit_param")?;
        self.updates
            .lock()
            .unwrap()
            .push((project.into(), param.into(), value.into()));
        Ok(())
    }

    async fn get_test_case_list(&self, _project: &str) -> Result<Vec<String>> {
        self.check("get_test_case_list")?;
        Ok(self.test_cases.clone())
    }
}
