// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Answers to the WID prompts PTS raises during PBP test cases.

use async_trait::async_trait;
use log::{debug, warn};

use super::announcements;
use crate::api::{AddrType, AdvertisingData};
use crate::testcase::{Session, WidHandler};
use crate::Result;

/// "Please advertise with a General/Targeted Announcement."
pub const WID_START_ANNOUNCEMENT: u32 = 100;
/// "Please initiate a GATT connection to the PTS."
pub const WID_CONNECT: u32 = 20100;
/// "Please initiate a GATT disconnection to the PTS."
pub const WID_DISCONNECT: u32 = 20115;

/// The WID handler shared by all PBP test cases.
#[derive(Debug, Default, Clone, Copy)]
pub struct PbpWidHandler;

#[async_trait]
impl WidHandler for PbpWidHandler {
    async fn handle_wid(
        &self,
        session: &Session,
        wid: u32,
        description: &str,
        test_case_name: &str,
    ) -> Result<bool> {
        debug!("{}: wid {}: {}", test_case_name, wid, description);
        match wid {
            WID_START_ANNOUNCEMENT => hdl_wid_start_announcement(session, description).await,
            WID_CONNECT => hdl_wid_connect(session).await,
            WID_DISCONNECT => hdl_wid_disconnect(session).await,
            _ => {
                warn!("wid nb: {}, not implemented!", wid);
                Ok(false)
            }
        }
    }
}

async fn hdl_wid_start_announcement(session: &Session, description: &str) -> Result<bool> {
    let targeted = description.contains("Targeted");
    let mut ad = AdvertisingData::new();
    let mut sd = AdvertisingData::new();
    announcements(session, &mut ad, &mut sd, targeted).await?;

    session.btp().gap_adv_ind_on(&ad, &sd).await?;
    session.stack().gap_mut()?.set_advertising(true);
    Ok(true)
}

async fn hdl_wid_connect(session: &Session) -> Result<bool> {
    let pts_addr = session.pts()?.bd_addr();
    session.btp().gap_conn(pts_addr, AddrType::LePublic).await?;
    session.stack().gap_mut()?.set_connected(Some(pts_addr));
    Ok(true)
}

async fn hdl_wid_disconnect(session: &Session) -> Result<bool> {
    let connected = session.stack().gap()?.connected();
    let peer = match connected {
        Some(peer) => peer,
        None => session.pts()?.bd_addr(),
    };
    session.btp().gap_disconn(peer, AddrType::LePublic).await?;
    session.stack().gap_mut()?.set_connected(None);
    Ok(true)
}
