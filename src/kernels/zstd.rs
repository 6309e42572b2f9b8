//! This module contains the Zstandard adapter for the Codec contract.
//!
//! Compression is single-shot through `zstd::bulk`, with no dictionary and no
//! streaming state, so one window never primes the next. This module is a
//! safe, panic-free wrapper around the `zstd` crate.

use crate::error::{CompressibilityError, Result};
use crate::kernels::{Codec, CodecKind, CompressedSize};

pub const DEFAULT_LEVEL: i32 = 3;

#[derive(Debug, Clone, Copy)]
pub struct ZstdCodec {
    level: i32,
}

impl ZstdCodec {
    pub fn new(level: Option<i32>) -> Result<Self> {
        let level = level.unwrap_or(DEFAULT_LEVEL);
        let range = ::zstd::compression_level_range();
        if !range.contains(&level) {
            return Err(CompressibilityError::InvalidConfig(format!(
                "zstd compression level must be in {}..={}, got {}",
                range.start(),
                range.end(),
                level
            )));
        }
        Ok(Self { level })
    }

    /// Compresses a byte slice into one complete Zstandard frame.
    pub fn encode(&self, input_bytes: &[u8]) -> Result<Vec<u8>> {
        ::zstd::bulk::compress(input_bytes, self.level).map_err(|e| {
            CompressibilityError::CodecFailure {
                codec: CodecKind::Zstd.to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl Codec for ZstdCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Zstd
    }

    fn compress_size(&self, raw_bytes: &[u8]) -> Result<CompressedSize> {
        let compressed = self.encode(raw_bytes)?;
        Ok(CompressedSize {
            raw_len: raw_bytes.len(),
            compressed_len: compressed.len(),
        })
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
