// In: src/window_pipeline/estimator.rs

//! The Compressibility Estimator: one window in, one ratio out.
//!
//! Scoring reads a contiguous row range from the shared `SampleArray`,
//! serializes it with the `bytecast` kernel and hands the bytes to a codec.
//! Nothing is shared between calls except read-only state, so any worker may
//! score any window.

use num_traits::AsPrimitive;

use crate::error::{CompressibilityError, Result};
use crate::kernels::{bytecast, ByteOrder, Codec};
use crate::types::SampleArray;
use crate::window_pipeline::planner::Window;

/// Anything the scheduler can fan windows out to.
///
/// `scratch` is a per-worker buffer the scorer may reuse between windows.
pub trait WindowScorer: Sync {
    fn score_window(&self, window: &Window, scratch: &mut Vec<u8>) -> Result<f64>;
}

/// Scores windows of one recording with one codec and one byte order.
pub struct CompressibilityEstimator<'a, 'c, T> {
    samples: SampleArray<'a, T>,
    codec: &'c dyn Codec,
    byte_order: ByteOrder,
}

impl<'a, 'c, T> CompressibilityEstimator<'a, 'c, T>
where
    T: AsPrimitive<f32>,
{
    pub fn new(samples: SampleArray<'a, T>, codec: &'c dyn Codec, byte_order: ByteOrder) -> Self {
        Self {
            samples,
            codec,
            byte_order,
        }
    }

    /// Ratio of the half-open range `[start, end)`.
    pub fn score_range(&self, start: usize, end: usize, scratch: &mut Vec<u8>) -> Result<f64> {
        if end <= start {
            return Err(CompressibilityError::EmptyWindow { start, end });
        }
        let rows = self.samples.window(start, end).ok_or(
            CompressibilityError::IntervalOutOfBounds {
                start,
                end,
                len: self.samples.len(),
            },
        )?;

        bytecast::encode_rows(rows, self.byte_order, scratch);
        // Zero-channel recordings serialize to nothing.
        if scratch.is_empty() {
            return Err(CompressibilityError::EmptyWindow { start, end });
        }

        let size = self.codec.compress_size(scratch)?;
        Ok(size.ratio())
    }
}

impl<'a, 'c, T> WindowScorer for CompressibilityEstimator<'a, 'c, T>
where
    T: AsPrimitive<f32> + Sync,
{
    fn score_window(&self, window: &Window, scratch: &mut Vec<u8>) -> Result<f64> {
        self.score_range(window.start, window.end, scratch)
    }
}

/// Scores a single `[start, end)` range without building an estimator first.
pub fn score<T>(
    samples: &SampleArray<'_, T>,
    start: usize,
    end: usize,
    codec: &dyn Codec,
    byte_order: ByteOrder,
) -> Result<f64>
where
    T: AsPrimitive<f32>,
{
    CompressibilityEstimator::new(*samples, codec, byte_order).score_range(
        start,
        end,
        &mut Vec::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::CodecKind;
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_samples(len: usize, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| f32::from_bits(rng.random::<u32>())).collect()
    }

    #[test]
    fn test_structured_window_scores_below_random_window() {
        let codec = CodecKind::GzipDeflate.build(None).unwrap();
        let zeros = vec![0.0f32; 1000];
        let noise = random_samples(1000, 7);

        let zero_samples = SampleArray::from_slice(&zeros);
        let noise_samples = SampleArray::from_slice(&noise);

        let zero_ratio = score(&zero_samples, 0, 1000, codec.as_ref(), ByteOrder::Little).unwrap();
        let noise_ratio =
            score(&noise_samples, 0, 1000, codec.as_ref(), ByteOrder::Little).unwrap();

        assert!(zero_ratio < 0.05, "all-zero ratio was {zero_ratio}");
        assert!(noise_ratio > 0.9, "random ratio was {noise_ratio}");
        assert!(zero_ratio < noise_ratio);
    }

    #[test]
    fn test_codec_may_be_dropped_before_the_samples() {
        let signal = vec![0.5f32; 100];
        let samples = SampleArray::from_slice(&signal);

        let ratio = {
            let codec = CodecKind::Zstd.build(None).unwrap();
            let estimator = CompressibilityEstimator::new(samples, codec.as_ref(), ByteOrder::Little);
            estimator.score_range(0, 100, &mut Vec::new()).unwrap()
        };

        assert!(ratio < 1.0);
        assert_eq!(samples.len(), 100);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let codec = CodecKind::GzipDeflate.build(None).unwrap();
        let signal: Vec<f64> = (0..5000).map(|i| (i as f64 * 0.01).sin()).collect();
        let samples = SampleArray::from_slice(&signal);

        let first = score(&samples, 1000, 3000, codec.as_ref(), ByteOrder::Little).unwrap();
        let second = score(&samples, 1000, 3000, codec.as_ref(), ByteOrder::Little).unwrap();

        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_ratio_uses_f32_byte_length() {
        let codec = CodecKind::GzipDeflate.build(None).unwrap();
        let signal: Vec<i64> = (0..256).collect();
        let samples = SampleArray::from_slice(&signal);

        let ratio = score(&samples, 0, 256, codec.as_ref(), ByteOrder::Little).unwrap();

        let mut raw = Vec::new();
        bytecast::encode_rows(samples.window(0, 256).unwrap(), ByteOrder::Little, &mut raw);
        assert_eq!(raw.len(), 256 * 4);
        let expected = codec.compress_size(&raw).unwrap().compressed_len as f64 / 1024.0;
        assert_eq!(ratio, expected);
    }

    #[test]
    fn test_degenerate_window_is_an_error() {
        let codec = CodecKind::GzipDeflate.build(None).unwrap();
        let signal = vec![1.0f32; 10];
        let samples = SampleArray::from_slice(&signal);

        assert!(matches!(
            score(&samples, 5, 5, codec.as_ref(), ByteOrder::Little),
            Err(CompressibilityError::EmptyWindow { start: 5, end: 5 })
        ));
        assert!(matches!(
            score(&samples, 6, 2, codec.as_ref(), ByteOrder::Little),
            Err(CompressibilityError::EmptyWindow { .. })
        ));
    }

    #[test]
    fn test_zero_channel_window_is_an_error() {
        let data = Array2::<f32>::zeros((10, 0));
        let codec = CodecKind::Zstd.build(None).unwrap();
        let samples = SampleArray::from_view(data.view());

        assert!(matches!(
            score(&samples, 0, 5, codec.as_ref(), ByteOrder::Little),
            Err(CompressibilityError::EmptyWindow { .. })
        ));
    }

    #[test]
    fn test_window_past_the_end_is_an_error() {
        let codec = CodecKind::GzipDeflate.build(None).unwrap();
        let signal = vec![1.0f32; 10];
        let samples = SampleArray::from_slice(&signal);

        assert!(matches!(
            score(&samples, 5, 11, codec.as_ref(), ByteOrder::Little),
            Err(CompressibilityError::IntervalOutOfBounds { len: 10, .. })
        ));
    }
}
