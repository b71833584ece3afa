// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Public Broadcast Profile test cases.

pub mod wid;

use byteorder::{ByteOrder, LittleEndian};
use futures::future::{ready, FutureExt};
use log::{debug, info};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_cr as serde;
use std::sync::Arc;

use crate::api::{AdType, AddrType, AdvertisingData, Context, ServiceUuid};
use crate::btp::Service;
use crate::pts::{self, PtsClient};
use crate::stack::Stack;
use crate::testcase::{Session, TestCase, TestFunc, WidHandler};
use crate::Result;

pub use self::wid::PbpWidHandler;

/// Project name of the profile in PTS.
pub const PROJECT: &str = "PBP";

/// Contexts the IUT announces it can render.
pub const SINK_CONTEXTS: Context = Context::LIVE
    .union(Context::CONVERSATIONAL)
    .union(Context::MEDIA)
    .union(Context::RINGTONE);

/// Contexts the IUT announces it can capture.
pub const SOURCE_CONTEXTS: Context = Context::LIVE.union(Context::CONVERSATIONAL);

/// PBP pixit values written to PTS before the test cases run.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_cr")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbpPixits {
    /// `TSPX_time_guard`, in milliseconds.
    pub time_guard: u32,
    /// `TSPX_use_implicit_send`.
    pub use_implicit_send: bool,
}

impl Default for PbpPixits {
    fn default() -> Self {
        PbpPixits {
            time_guard: 180_000,
            use_implicit_send: true,
        }
    }
}

impl PbpPixits {
    /// The pixits as PTS parameter name and value pairs.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let implicit_send = if self.use_implicit_send { "TRUE" } else { "FALSE" };
        vec![
            ("TSPX_time_guard", self.time_guard.to_string()),
            ("TSPX_use_implicit_send", implicit_send.to_string()),
        ]
    }
}

/// Writes the default PBP pixits to the first PTS instance.
pub async fn set_pixits(ptses: &[Arc<dyn PtsClient>]) -> Result<()> {
    set_pixits_with(ptses, &PbpPixits::default()).await
}

/// Writes `pixits` to the first PTS instance. Further instances are left untouched.
pub async fn set_pixits_with(ptses: &[Arc<dyn PtsClient>], pixits: &PbpPixits) -> Result<()> {
    let pts = pts::first(ptses)?;
    for (param, value) in pixits.params() {
        debug!("Setting pixit {} {} = {}", PROJECT, param, value);
        pts.set_pixit(PROJECT, param, &value).await?;
    }
    Ok(())
}

/// CAP General/Targeted Announcement service data.
pub fn cas_announcement(targeted: bool) -> [u8; 3] {
    let mut buf = [0u8; 3];
    LittleEndian::write_u16(&mut buf[0..2], ServiceUuid::Cas.short());
    buf[2] = u8::from(targeted);
    buf
}

/// BAP General/Targeted Announcement service data.
pub fn ascs_announcement(targeted: bool) -> [u8; 8] {
    let mut buf = [0u8; 8];
    LittleEndian::write_u16(&mut buf[0..2], ServiceUuid::Ascs.short());
    buf[2] = u8::from(targeted);
    LittleEndian::write_u16(&mut buf[3..5], SINK_CONTEXTS.bits());
    LittleEndian::write_u16(&mut buf[5..7], SOURCE_CONTEXTS.bits());
    // Metadata length, no metadata follows.
    buf[7] = 0;
    buf
}

/// Fills `adv_data` with the CAP and BAP announcements and a freshly generated RSI, and makes it
/// the advertising data of the IUT.
///
/// The CAP announcement starts the UUID16 service data list and the BAP announcement is appended
/// after it; the RSI replaces any previous one. Calling this twice on the same data therefore
/// does not accumulate announcements.
///
/// GAP has to be initialised. On error neither `adv_data` nor the IUT has been touched.
pub async fn announcements(
    session: &Session,
    adv_data: &mut AdvertisingData,
    rsp_data: &mut AdvertisingData,
    targeted: bool,
) -> Result<()> {
    session.stack().gap()?;

    let rsi = session.btp().cas_get_member_rsi().await?;
    debug!(
        "{} announcement with RSI {:02x?}",
        if targeted { "Targeted" } else { "General" },
        rsi
    );

    adv_data.set(AdType::Uuid16SvcData, cas_announcement(targeted).to_vec());
    adv_data.append(AdType::Uuid16SvcData, ascs_announcement(targeted).to_vec());
    adv_data.set(AdType::Rsi, rsi.to_vec());

    let mut stack = session.stack();
    let gap = stack.gap_mut()?;
    gap.ad = adv_data.clone();
    gap.sd = rsp_data.clone();
    Ok(())
}

fn core_reg_svc(name: &'static str, service: Service) -> TestFunc {
    TestFunc::new(name, move |s| s.btp().core_reg_svc(service))
}

fn stack_init(name: &'static str, init: fn(&mut Stack) -> Result<()>) -> TestFunc {
    TestFunc::new(name, move |s| ready(init(&mut s.stack())).boxed())
}

async fn gap_read_ctrl_info(s: &Session) -> Result<()> {
    let info = s.btp().gap_read_ctrl_info().await?;
    s.stack().gap_mut()?.set_ctrl_info(&info);
    Ok(())
}

async fn gap_set_conn(s: &Session) -> Result<()> {
    s.btp().gap_set_conn().await?;
    s.stack().gap_mut()?.set_connectable();
    Ok(())
}

async fn gap_set_extended_advertising_on(s: &Session) -> Result<()> {
    s.btp().gap_set_extended_advertising_on().await?;
    s.stack().gap_mut()?.set_extended_advertising();
    Ok(())
}

fn publish_iut_addr(s: &Session) -> Result<()> {
    let addr = s.stack().gap()?.iut_addr_get_str()?;
    s.iut_addr().set(addr);
    Ok(())
}

async fn update_iut_addr_pixit(s: &Session) -> Result<()> {
    let addr = s.stack().gap()?.iut_addr_get_str()?;
    s.pts()?
        .update_pixit_param(PROJECT, "TSPX_bd_addr_iut", &addr)
        .await
}

/// The precondition steps shared by every PBP test case.
///
/// Services are registered over BTP before the matching stack module is initialised, all
/// modules are up before advertising is enabled, and the IUT address is published last. The
/// two publishing steps read the address when they run, since it is only known once the
/// controller information has been read.
pub fn preconditions(pts: &dyn PtsClient) -> Vec<TestFunc> {
    let pts_bd_addr = pts.bd_addr();
    let iut_device_name = pts::get_unique_name(pts);

    vec![
        core_reg_svc("core_reg_svc_gap", Service::Gap),
        TestFunc::new("gap_init", move |s| {
            s.stack().gap_init(&iut_device_name);
            ready(Ok(())).boxed()
        }),
        TestFunc::new("gap_read_ctrl_info", |s| gap_read_ctrl_info(s).boxed()),
        core_reg_svc("core_reg_svc_gatt", Service::Gatt),
        TestFunc::new("set_pts_addr", move |s| {
            s.btp().set_pts_addr(pts_bd_addr, AddrType::LePublic)
        }),
        stack_init("gatt_init", Stack::gatt_init),
        TestFunc::new("gap_set_conn", |s| gap_set_conn(s).boxed()),
        core_reg_svc("core_reg_svc_ascs", Service::Ascs),
        core_reg_svc("core_reg_svc_bap", Service::Bap),
        stack_init("ascs_init", Stack::ascs_init),
        stack_init("bap_init", Stack::bap_init),
        stack_init("cap_init", Stack::cap_init),
        core_reg_svc("core_reg_svc_cap", Service::Cap),
        core_reg_svc("core_reg_svc_cas", Service::Cas),
        core_reg_svc("core_reg_svc_pbp", Service::Pbp),
        stack_init("pbp_init", Stack::pbp_init),
        TestFunc::new("gap_set_extended_advertising_on", |s| {
            gap_set_extended_advertising_on(s).boxed()
        }),
        // Lets the second lower tester continue with its preconditions.
        TestFunc::new("publish_iut_addr", |s| ready(publish_iut_addr(s)).boxed()),
        TestFunc::new("update_pixit_param", |s| update_iut_addr_pixit(s).boxed()),
    ]
}

/// Builds the PBP test cases offered by the first PTS instance.
///
/// Every test case references the same precondition list and WID handler.
pub async fn test_cases(ptses: &[Arc<dyn PtsClient>]) -> Result<Vec<TestCase>> {
    let pts = pts::first(ptses)?;
    let pre_conditions = Arc::new(preconditions(pts.as_ref()));
    let generic_wid_hdl: Arc<dyn WidHandler> = Arc::new(PbpWidHandler);

    let test_case_name_list = pts.get_test_case_list(PROJECT).await?;
    info!(
        "{} test cases in the {} catalogue",
        test_case_name_list.len(),
        PROJECT
    );

    Ok(test_case_name_list
        .iter()
        .map(|tc_name| {
            TestCase::new(
                PROJECT,
                tc_name,
                pre_conditions.clone(),
                generic_wid_hdl.clone(),
            )
        })
        .collect())
}
