//! The gzip/DEFLATE adapter, the default codec.
//!
//! A thin, panic-free wrapper around `flate2`. Each call builds a fresh
//! encoder with a zeroed header timestamp, so output length depends only on
//! the input bytes and the level.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{CompressibilityError, Result};
use crate::kernels::{Codec, CodecKind, CompressedSize};

/// Matches the level Python's `gzip.compress` uses by default.
pub const DEFAULT_LEVEL: u32 = 9;

#[derive(Debug, Clone, Copy)]
pub struct GzipCodec {
    level: Compression,
}

impl GzipCodec {
    pub fn new(level: Option<i32>) -> Result<Self> {
        let level = match level {
            None => DEFAULT_LEVEL,
            Some(l) if (0..=9).contains(&l) => l as u32,
            Some(l) => {
                return Err(CompressibilityError::InvalidConfig(format!(
                    "gzip compression level must be in 0..=9, got {}",
                    l
                )))
            }
        };
        Ok(Self {
            level: Compression::new(level),
        })
    }

    /// Compresses `input_bytes` into a complete gzip member.
    pub fn encode(&self, input_bytes: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(input_bytes.len() / 2), self.level);
        encoder
            .write_all(input_bytes)
            .map_err(|e| codec_failure(e.to_string()))?;
        encoder.finish().map_err(|e| codec_failure(e.to_string()))
    }
}

impl Codec for GzipCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::GzipDeflate
    }

    fn compress_size(&self, raw_bytes: &[u8]) -> Result<CompressedSize> {
        let compressed = self.encode(raw_bytes)?;
        Ok(CompressedSize {
            raw_len: raw_bytes.len(),
            compressed_len: compressed.len(),
        })
    }
}

fn codec_failure(message: String) -> CompressibilityError {
    CompressibilityError::CodecFailure {
        codec: CodecKind::GzipDeflate.to_string(),
        message,
    }
}
