// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! autopts-pbp defines the Public Broadcast Profile (PBP) test cases run by the PTS automation
//! framework.
//!
//! The crate does not talk to the Implementation Under Test or to the PTS tool itself. Both are
//! reached through the [`btp::Btp`] and [`pts::PtsClient`] traits, which the surrounding
//! framework implements. What lives here is the profile glue:
//!
//! - pushing the PBP pixit values into PTS ([`pbp::set_pixits`]),
//! - packing the CAP/BAP announcements and the Resolvable Set Identifier into the GAP
//!   advertising data ([`pbp::announcements`]),
//! - building the list of test cases that share a single precondition sequence
//!   ([`pbp::test_cases`]).
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use autopts_pbp::btp::Btp;
//! use autopts_pbp::pbp;
//! use autopts_pbp::pts::PtsClient;
//! use autopts_pbp::testcase::Session;
//!
//! # async fn run(btp: Arc<dyn Btp>, pts: Arc<dyn PtsClient>) -> autopts_pbp::Result<()> {
//! let ptses = vec![pts];
//! pbp::set_pixits(&ptses).await?;
//!
//! let session = Session::new(btp, ptses.clone());
//! for test_case in pbp::test_cases(&ptses).await? {
//!     test_case.run_preconditions(&session).await?;
//!     // Hand over to the PTS runner, which feeds WIDs to `test_case.handle_wid`.
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod btp;
pub mod common;
pub mod pbp;
pub mod pts;
pub mod stack;
pub mod testcase;

use std::result;
use std::time::Duration;

use crate::api::ParseBDAddrError;

/// The main error type returned by most methods in autopts-pbp.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No PTS instance available")]
    NoPtsInstance,

    #[error("Stack module not initialized: {0}")]
    NotInitialized(&'static str),

    #[error("IUT address is not known yet")]
    IutAddressUnknown,

    #[error("BTP command {command} failed: {reason}")]
    Btp {
        command: &'static str,
        reason: String,
    },

    #[error("PTS request failed: {0}")]
    Pts(String),

    #[error("Timed out after {0:?}")]
    TimedOut(Duration),

    #[error("AD structure of type {ad_type:#04x} too long: {len} bytes")]
    AdDataTooLong { ad_type: u8, len: usize },

    #[error("Invalid Bluetooth address: {0}")]
    InvalidBDAddr(#[from] ParseBDAddrError),

    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Convenience type for a result using the autopts-pbp [`Error`] type.
pub type Result<T> = result::Result<T, Error>;
