//! 16 KiB read-only ROM image mapped at 0xC100-0xFFFF (spec §4.2, §6).

use std::path::{Path, PathBuf};

use crate::error::CoreError;

pub const ROM_SIZE: usize = 0x4000;
pub const ROM_BASE: u16 = 0xC000;

pub struct Rom {
    bytes: Box<[u8; ROM_SIZE]>,
}

impl Rom {
    /// Build a ROM from an in-memory image (used by tests).
    pub fn from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        if data.len() < ROM_SIZE {
            return Err(CoreError::RomTruncated {
                path: PathBuf::from("<memory>"),
                expected: ROM_SIZE,
                actual: data.len(),
            });
        }
        let mut bytes = Box::new([0u8; ROM_SIZE]);
        bytes.copy_from_slice(&data[..ROM_SIZE]);
        Ok(Self { bytes })
    }

    /// Load a 16 KiB raw binary ROM image from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::RomMissing {
                path: path.to_path_buf(),
            });
        }
        let data = std::fs::read(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if data.len() < ROM_SIZE {
            return Err(CoreError::RomTruncated {
                path: path.to_path_buf(),
                expected: ROM_SIZE,
                actual: data.len(),
            });
        }
        Self::from_bytes(&data)
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr - ROM_BASE) as usize]
    }

    /// ROM is immutable; writes are silently dropped.
    #[inline]
    pub fn write(&self, _addr: u16, _value: u8) {}
}
