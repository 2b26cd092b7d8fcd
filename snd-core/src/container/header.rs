use std::io::Read;

use crate::container::record::ENTRY_SIZE;
use crate::error::ErrorKind;
use crate::util::endian::{be_u32, le_u32};

pub const MAGIC: &[u8; 11] = b"ElecbyteSnd";
pub const HEADER_LEN: usize = 24;
/// The record table always starts here.
pub const TABLE_OFFSET: u32 = 512;
pub const SIZE_LIMIT: u64 = u32::MAX as u64;
pub const EXTENSION: &str = "snd";

pub const VERSION_1: u32 = 0x0100_0100;
pub const VERSION_2: u32 = 0x0001_0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub signature: [u8; 11],
    /// Big-endian on disk; decoded but not enforced.
    pub version: u32,
    pub record_count: u32,
    pub table_off: u32,
    pub file_size: u64,
}

impl Header {
    /// Decode and validate the fixed header region.
    ///
    /// Short reads are not I/O errors here: a file too short for the
    /// signature fails the signature check, one too short for the table
    /// offset is corrupted.
    pub fn read_from(mut r: impl Read, file_size: u64) -> std::io::Result<Result<Self, ErrorKind>> {
        let mut buf = [0u8; HEADER_LEN];
        let mut got = 0;
        while got < HEADER_LEN {
            match r.read(&mut buf[got..])? {
                0 => break,
                n => got += n,
            }
        }
        Ok(Self::parse(&buf[..got], file_size))
    }

    pub fn parse(buf: &[u8], file_size: u64) -> Result<Self, ErrorKind> {
        let signature: [u8; 11] = buf
            .get(..MAGIC.len())
            .and_then(|s| s.try_into().ok())
            .ok_or(ErrorKind::InvalidSndSignature)?;
        if &signature != MAGIC {
            return Err(ErrorKind::InvalidSndSignature);
        }
        let (Some(version), Some(record_count), Some(table_off)) =
            (be_u32(buf, 12), le_u32(buf, 16), le_u32(buf, 20))
        else {
            return Err(ErrorKind::CorruptedSndFile);
        };
        if table_off != TABLE_OFFSET {
            return Err(ErrorKind::CorruptedSndFile);
        }
        Ok(Self {
            signature,
            version,
            record_count,
            table_off,
            file_size,
        })
    }

    /// Upper bound on records the file can physically hold. The declared
    /// count is only advisory.
    pub fn max_records(&self) -> u32 {
        let room = self.file_size.saturating_sub(u64::from(self.table_off)) / ENTRY_SIZE as u64;
        self.record_count.min(u32::try_from(room).unwrap_or(u32::MAX))
    }

    pub fn signature_str(&self) -> &str {
        std::str::from_utf8(&self.signature).unwrap_or("")
    }
}
