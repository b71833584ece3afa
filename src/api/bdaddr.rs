// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Bluetooth device addresses as exchanged with PTS and over BTP.

use std::fmt::{self, Debug, Display, Formatter, LowerHex, UpperHex};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_cr as serde;

/// Stores the 6 byte address used to identify Bluetooth devices.
///
/// `address[0]` is the most significant byte, i.e. the order in which the address is printed.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_cr")
)]
#[derive(Copy, Clone, Hash, Eq, PartialEq, Default)]
pub struct BDAddr {
    address: [u8; 6],
}

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ParseBDAddrError {
    #[error("Bluetooth address has to be 6 bytes long")]
    IncorrectByteCount,
    #[error("Invalid digit in address: {0}")]
    InvalidDigit(#[from] std::num::ParseIntError),
}

/// Kind of a Bluetooth LE address, numbered as on the BTP wire.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_cr")
)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum AddrType {
    #[default]
    LePublic,
    LeRandom,
}

impl AddrType {
    pub fn num(&self) -> u8 {
        match *self {
            AddrType::LePublic => 0,
            AddrType::LeRandom => 1,
        }
    }
}

impl Display for BDAddr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        <Self as UpperHex>::fmt(self, f)
    }
}

impl LowerHex for BDAddr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let a = &self.address;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a[0], a[1], a[2], a[3], a[4], a[5]
        )
    }
}

impl UpperHex for BDAddr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let a = &self.address;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a[0], a[1], a[2], a[3], a[4], a[5]
        )
    }
}

impl Debug for BDAddr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl From<[u8; 6]> for BDAddr {
    /// Build an address from an array, most significant byte first.
    ///
    /// # Example
    ///
    /// ```
    /// # use autopts_pbp::api::BDAddr;
    /// let addr: BDAddr = [0x00, 0x1B, 0xDC, 0x07, 0x32, 0xE6].into();
    /// assert_eq!("00:1B:DC:07:32:E6", addr.to_string());
    /// ```
    fn from(address: [u8; 6]) -> Self {
        Self { address }
    }
}

impl FromStr for BDAddr {
    type Err = ParseBDAddrError;

    /// Parses a Bluetooth address of the form `aa:bb:cc:dd:ee:ff` or of form `aabbccddeeff`, the
    /// latter being how PTS reports its own address and stores `TSPX_bd_addr_iut`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| *c != ':').collect();
        if s.contains(':') && s.split(':').any(|part| part.len() != 2) {
            return Err(ParseBDAddrError::IncorrectByteCount);
        }
        if digits.len() != 12 || !digits.is_ascii() {
            return Err(ParseBDAddrError::IncorrectByteCount);
        }

        let mut address = [0; 6];
        for (i, byte) in address.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&digits[2 * i..2 * i + 2], 16)?;
        }
        Ok(Self { address })
    }
}

impl BDAddr {
    /// Destruct the address into the underlying array.
    pub fn into_inner(self) -> [u8; 6] {
        self.address
    }

    /// The address as PTS expects it in pixit tables: upper-case hex, no delimiters.
    pub fn to_pixit_string(&self) -> String {
        self.address.iter().map(|b| format!("{:02X}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: BDAddr = BDAddr {
        address: [0x00, 0x1b, 0xdc, 0x07, 0x32, 0xe6],
    };

    #[test]
    fn parse_addr() {
        let result: Result<BDAddr, _> = "00:1b:dc:07:32:e6".parse();
        assert_eq!(result, Ok(ADDR));
        let result: Result<BDAddr, _> = "001BDC0732E6".parse();
        assert_eq!(result, Ok(ADDR));
        let result: Result<BDAddr, _> = "00:1B:DC".parse();
        assert_eq!(result, Err(ParseBDAddrError::IncorrectByteCount));
        let result: Result<BDAddr, _> = "001:B:DC:07:32:E6".parse();
        assert_eq!(result, Err(ParseBDAddrError::IncorrectByteCount));
        let result: Result<BDAddr, _> = "00:1B:DC:07:32:ZZ".parse();
        assert!(matches!(result, Err(ParseBDAddrError::InvalidDigit(_))));
    }

    #[test]
    fn display_addr() {
        assert_eq!(format!("{}", ADDR), "00:1B:DC:07:32:E6");
        assert_eq!(format!("{:x}", ADDR), "00:1b:dc:07:32:e6");
        assert_eq!(ADDR.to_pixit_string(), "001BDC0732E6");
    }

    #[test]
    fn addr_type_numbers() {
        assert_eq!(AddrType::LePublic.num(), 0);
        assert_eq!(AddrType::LeRandom.num(), 1);
    }
}
