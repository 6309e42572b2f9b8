//! The Codec Adapter: lossless byte compressors behind one size-reporting interface.
//!
//! Every codec here runs single-shot over one buffer, with no dictionary or
//! state carried between calls, so the same input always yields the same
//! compressed length and one codec instance can be shared by every worker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CompressibilityError, Result};

pub mod bytecast;
pub mod gzip;
pub mod zstd;

pub use bytecast::ByteOrder;

//==================================================================================
// 1. The Codec Contract
//==================================================================================

/// Exact raw and compressed byte counts for one buffer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressedSize {
    pub raw_len: usize,
    pub compressed_len: usize,
}

impl CompressedSize {
    /// `compressed_len / raw_len`. Callers must not pass an empty buffer.
    pub fn ratio(&self) -> f64 {
        self.compressed_len as f64 / self.raw_len as f64
    }
}

/// A lossless compressor that only needs to report how small it made the input.
pub trait Codec: Send + Sync {
    /// The configuration identifier of this codec.
    fn kind(&self) -> CodecKind;

    fn compress_size(&self, raw_bytes: &[u8]) -> Result<CompressedSize>;
}

//==================================================================================
// 2. Codec Registry
//==================================================================================

/// The enumerated set of configurable codecs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum CodecKind {
    /// **Default:** gzip framing around DEFLATE.
    #[default]
    GzipDeflate,
    Zstd,
}

impl CodecKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodecKind::GzipDeflate => "gzip-deflate",
            CodecKind::Zstd => "zstd",
        }
    }

    /// Builds a ready-to-share codec. `level` of `None` picks the codec's default.
    pub fn build(self, level: Option<i32>) -> Result<Box<dyn Codec>> {
        let codec: Box<dyn Codec> = match self {
            CodecKind::GzipDeflate => Box::new(gzip::GzipCodec::new(level)?),
            CodecKind::Zstd => Box::new(zstd::ZstdCodec::new(level)?),
        };
        Ok(codec)
    }
}

impl FromStr for CodecKind {
    type Err = CompressibilityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gzip-deflate" | "gzip" => Ok(CodecKind::GzipDeflate),
            "zstd" => Ok(CodecKind::Zstd),
            _ => Err(CompressibilityError::UnsupportedCodec(s.to_string())),
        }
    }
}

impl TryFrom<String> for CodecKind {
    type Error = CompressibilityError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CodecKind> for String {
    fn from(kind: CodecKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_identifiers_parse() {
        assert_eq!("gzip-deflate".parse::<CodecKind>().unwrap(), CodecKind::GzipDeflate);
        assert_eq!("gzip".parse::<CodecKind>().unwrap(), CodecKind::GzipDeflate);
        assert_eq!("ZSTD".parse::<CodecKind>().unwrap(), CodecKind::Zstd);
        assert_eq!(CodecKind::default().to_string(), "gzip-deflate");
    }

    #[test]
    fn test_unknown_codec_is_unsupported() {
        let result = "lz4".parse::<CodecKind>();
        assert!(matches!(result, Err(CompressibilityError::UnsupportedCodec(ref id)) if id == "lz4"));
    }

    #[test]
    fn test_built_codecs_report_their_kind() {
        for kind in [CodecKind::GzipDeflate, CodecKind::Zstd] {
            let codec = kind.build(None).unwrap();
            assert_eq!(codec.kind(), kind);

            let size = codec.compress_size(&[7u8; 4096]).unwrap();
            assert_eq!(size.raw_len, 4096);
            assert!(size.ratio() < 0.1);
        }
    }
}
