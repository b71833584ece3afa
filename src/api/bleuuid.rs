// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Bluetooth SIG 16-bit service UUIDs used by the LE Audio profiles.

/// LE Audio services advertised in service data by the audio profiles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(u16)]
pub enum ServiceUuid {
    /// Audio Stream Control Service.
    Ascs = 0x184E,
    /// Broadcast Audio Scan Service.
    Bass = 0x184F,
    /// Published Audio Capabilities Service.
    Pacs = 0x1850,
    /// Broadcast Audio Announcement Service.
    Baas = 0x1852,
    /// Common Audio Service.
    Cas = 0x1853,
}

impl ServiceUuid {
    /// The assigned 16-bit UUID, as written into service data.
    pub const fn short(self) -> u16 {
        self as u16
    }
}
