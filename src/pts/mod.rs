// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! The capability set of a PTS (Profile Tuning Suite) instance.

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::BDAddr;
use crate::{Error, Result};

/// A remote PTS instance driven by the automation client.
#[async_trait]
pub trait PtsClient: Send + Sync {
    /// Address of the PTS dongle.
    fn bd_addr(&self) -> BDAddr;

    /// Sets a pixit value in the project's workspace before any test case runs.
    async fn set_pixit(&self, project: &str, param: &str, value: &str) -> Result<()>;

    /// Changes a pixit value of the project while test cases are being run.
    async fn update_pixit_param(&self, project: &str, param: &str, value: &str) -> Result<()>;

    /// Names of the test cases PTS offers for `project`, in catalogue order.
    async fn get_test_case_list(&self, project: &str) -> Result<Vec<String>>;
}

/// The instance carrying the profile configuration, i.e. the first one.
pub fn first(ptses: &[Arc<dyn PtsClient>]) -> Result<&Arc<dyn PtsClient>> {
    ptses.first().ok_or(Error::NoPtsInstance)
}

/// Device name the IUT advertises while tested against `pts`.
///
/// The name ends with the last three bytes of the PTS address, so testers sharing the air do not
/// pick up each other's IUT.
pub fn get_unique_name(pts: &dyn PtsClient) -> String {
    let addr = pts.bd_addr().into_inner();
    let suffix: String = addr[3..].iter().map(|b| format!("{:02X}", b)).collect();
    format!("Tester_{}", suffix)
}
