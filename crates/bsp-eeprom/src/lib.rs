//! bsp-eeprom: the board ID EEPROM (AT24 on I2C0 at 0x50)
//!
//! The at24 driver exposes the chip as a flat file. The header written at
//! the factory is a packed structure:
//!
//! | offset | size | field        |
//! |--------|------|--------------|
//! | 0      | 4    | magic `AA 55 33 EE` |
//! | 4      | 8    | board name   |
//! | 12     | 4    | version      |
//! | 16     | 12   | serial       |
//! | 28     | 6    | pin options  |
//! | 34     | 2    | DC spec      |
//! | 36     | 24   | 4 MAC addresses |
//! | 60     | 2    | CRC          |

use bsp_core::{BspError, Result};
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub use bsp_core::features::DEFAULT_EEPROM_PATH;

pub const EEPROM_MAGIC: [u8; 4] = [0xAA, 0x55, 0x33, 0xEE];
pub const EEPROM_HEADER_LEN: usize = 62;

/// A six byte Ethernet address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddr(pub [u8; 6]);

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

/// Decoded board ID header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEeprom {
    pub board_name: [u8; 8],
    pub version: [u8; 4],
    pub serial: [u8; 12],
    pub pin_options: [u8; 6],
    pub dc_spec: [u8; 2],
    pub macs: [MacAddr; 4],
    pub crc: [u8; 2],
}

fn field<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

impl BoardEeprom {
    /// Decode the header from the start of an EEPROM image
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < EEPROM_HEADER_LEN {
            return Err(BspError::Eeprom(format!(
                "Failed to read EEPROM data: got {} of {} bytes",
                bytes.len(),
                EEPROM_HEADER_LEN
            )));
        }
        if bytes[..4] != EEPROM_MAGIC {
            return Err(BspError::Eeprom(
                "Invalid EEPROM header. This may not be a BBB EEPROM.".to_string(),
            ));
        }

        Ok(Self {
            board_name: field(bytes, 4),
            version: field(bytes, 12),
            serial: field(bytes, 16),
            pin_options: field(bytes, 28),
            dc_spec: field(bytes, 34),
            macs: [
                MacAddr(field(bytes, 36)),
                MacAddr(field(bytes, 42)),
                MacAddr(field(bytes, 48)),
                MacAddr(field(bytes, 54)),
            ],
            crc: field(bytes, 60),
        })
    }

    /// Read and decode the header from the at24 sysfs file
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            BspError::Eeprom(format!(
                "Failed to open EEPROM device: {}\n\
                 Make sure the EEPROM device is available at {}\n\
                 You may need to run: modprobe at24",
                e,
                path.display()
            ))
        })?;

        let mut bytes = Vec::with_capacity(EEPROM_HEADER_LEN);
        file.by_ref()
            .take(EEPROM_HEADER_LEN as u64)
            .read_to_end(&mut bytes)
            .map_err(|e| BspError::Eeprom(format!("Failed to read EEPROM data: {}", e)))?;
        debug!("read {} bytes from {}", bytes.len(), path.display());

        Self::parse(&bytes)
    }

    /// Board name with erased (0xFF) and padding (0x00) bytes dropped
    pub fn board_name(&self) -> String {
        String::from_utf8_lossy(&self.board_name_bytes()).into_owned()
    }

    /// Raw board name bytes with 0x00/0xFF dropped
    pub fn board_name_bytes(&self) -> Vec<u8> {
        self.board_name
            .iter()
            .copied()
            .filter(|&b| b != 0xFF && b != 0x00)
            .collect()
    }

    /// Serial number; bytes that are not valid UTF-8 become U+FFFD
    pub fn serial(&self) -> String {
        String::from_utf8_lossy(&self.serial).into_owned()
    }

    /// Revision as `major.minor`, taken from the last two version bytes
    pub fn version(&self) -> String {
        format!("{}.{}", self.version[2], self.version[3])
    }

    /// The lines printed by the reader tool
    pub fn report(&self) -> String {
        let mut lines = vec![
            format!("Board Name: {}", self.board_name()),
            format!("Serial Number: {}", self.serial()),
            format!("Version: {}", self.version()),
        ];
        for (i, mac) in self.macs.iter().enumerate() {
            lines.push(format!("MAC Address {}: {}", i + 1, mac));
        }
        lines.push(String::new());
        lines.push("EEPROM read successfully!".to_string());
        lines.join("\n")
    }
}
