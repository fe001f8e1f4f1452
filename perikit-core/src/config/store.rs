//! Persisted peripheral configuration
//!
//! A board stores one [`PeripheralConfig`] blob in flash or EEPROM. The
//! blob layout is:
//!
//! ```text
//! [magic: u32 LE][version: u8][postcard body ...][crc32: u32 LE]
//! ```
//!
//! The CRC covers everything before it.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::*;

/// Blob magic ("PKCF")
pub const CONFIG_MAGIC: u32 = 0x504B4346;

/// Current blob layout version
pub const CONFIG_VERSION: u8 = 1;

/// Magic and version
#[cfg(feature = "serde")]
const HEADER_LEN: usize = 5;

/// Trailing CRC
#[cfg(feature = "serde")]
const CRC_LEN: usize = 4;

/// Configuration load/store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Body did not fit the output buffer
    Serialize,
    /// Body bytes are malformed or truncated
    Deserialize,
    /// Blob does not start with [`CONFIG_MAGIC`]
    BadMagic,
    /// Blob was written by an incompatible layout version
    UnsupportedVersion(u8),
    /// Stored CRC does not match the contents
    CrcMismatch,
    /// Decoded values fail validation
    Invalid,
}

/// Everything needed to construct the drivers on one board
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeripheralConfig {
    /// Board label
    pub label: String<MAX_LABEL_LEN>,
    /// Distance sensor envelope
    pub range: RangeFinderConfig,
    /// Push button wiring and timing
    pub button: ButtonConfig,
    /// Moisture sensor calibration
    pub moisture: MoistureCalibration,
    /// Relay contact type
    pub relay: RelayType,
    /// LED wiring
    pub led: LedConfig,
}

impl PeripheralConfig {
    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.range.is_valid() {
            return Err(ConfigError::Invalid);
        }
        if !self.moisture.is_valid() {
            return Err(ConfigError::Invalid);
        }
        if !(0.0..=1.0).contains(&self.led.max_brightness) {
            return Err(ConfigError::Invalid);
        }
        if self.button.long_press_ms <= self.button.debounce_ms {
            return Err(ConfigError::Invalid);
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl PeripheralConfig {
    /// Serialize into `buf`, returning the number of bytes written
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, ConfigError> {
        if buf.len() < HEADER_LEN + CRC_LEN {
            return Err(ConfigError::Serialize);
        }

        buf[..4].copy_from_slice(&CONFIG_MAGIC.to_le_bytes());
        buf[4] = CONFIG_VERSION;

        let body_end = buf.len() - CRC_LEN;
        let body_len = postcard::to_slice(self, &mut buf[HEADER_LEN..body_end])
            .map_err(|_| ConfigError::Serialize)?
            .len();

        let crc_at = HEADER_LEN + body_len;
        let crc = crc32(&buf[..crc_at]);
        buf[crc_at..crc_at + CRC_LEN].copy_from_slice(&crc.to_le_bytes());

        Ok(crc_at + CRC_LEN)
    }

    /// Parse and validate a blob produced by [`PeripheralConfig::encode`]
    ///
    /// Trailing bytes after the CRC (erased flash) are not allowed; pass
    /// exactly the length `encode` returned.
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() < HEADER_LEN + CRC_LEN {
            return Err(ConfigError::Deserialize);
        }

        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != CONFIG_MAGIC {
            return Err(ConfigError::BadMagic);
        }
        if bytes[4] != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(bytes[4]));
        }

        let crc_at = bytes.len() - CRC_LEN;
        let stored = u32::from_le_bytes([
            bytes[crc_at],
            bytes[crc_at + 1],
            bytes[crc_at + 2],
            bytes[crc_at + 3],
        ]);
        if stored != crc32(&bytes[..crc_at]) {
            return Err(ConfigError::CrcMismatch);
        }

        let config: Self =
            postcard::from_bytes(&bytes[HEADER_LEN..crc_at]).map_err(|_| ConfigError::Deserialize)?;
        config.validate()?;
        Ok(config)
    }
}

/// CRC32 of `data` (IEEE 802.3)
pub fn crc32(data: &[u8]) -> u32 {
    !crc32_update(0xFFFF_FFFF, data)
}

/// Bitwise CRC32 update step (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}
