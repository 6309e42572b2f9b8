//! This module contains the pure, stateless kernel that turns a window of
//! samples into its canonical byte form.
//!
//! Every element is converted to a 32-bit float and written with a fixed byte
//! order, row after row, with no padding, header or length prefix. The byte
//! order is fixed for a whole run so that ratios stay comparable across
//! windows. When the requested order matches the target, the float buffer is
//! reinterpreted in place with `bytemuck` instead of being re-encoded.

use ndarray::ArrayView2;
use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

/// Byte order of the serialized 32-bit floats.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// **Default:** matches `numpy.ndarray.tobytes()` on every mainstream platform.
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    fn is_native(self) -> bool {
        match self {
            ByteOrder::Little => cfg!(target_endian = "little"),
            ByteOrder::Big => cfg!(target_endian = "big"),
        }
    }
}

/// Number of bytes one element occupies in the canonical form.
pub const BYTES_PER_SAMPLE: usize = std::mem::size_of::<f32>();

//==================================================================================
// 1. Public API
//==================================================================================

/// Serializes `rows` (row-major) into `output_buf`, replacing its contents.
pub fn encode_rows<T>(rows: ArrayView2<'_, T>, order: ByteOrder, output_buf: &mut Vec<u8>)
where
    T: AsPrimitive<f32>,
{
    output_buf.clear();
    output_buf.reserve(rows.len() * BYTES_PER_SAMPLE);

    let values: Vec<f32> = rows.iter().map(|&v| v.as_()).collect();

    if order.is_native() {
        output_buf.extend_from_slice(bytemuck::cast_slice::<f32, u8>(&values));
        return;
    }

    for value in values {
        let bytes = match order {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        };
        output_buf.extend_from_slice(&bytes);
    }
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
