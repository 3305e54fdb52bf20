//! DetectionPipeline for combining inference with decoding.

use thiserror::Error;
use tracing::debug;

use crate::decoding::{DetectError, Detection, DetectorConfig, FrameSize, LabelTable, detect_frame};

use super::TensorSource;

/// Error for a single frame of a [`DetectionPipeline`].
#[derive(Debug, Error)]
pub enum FrameError<E>
where
    E: std::error::Error + 'static,
{
    /// The inference source failed.
    #[error("inference failed: {0}")]
    Inference(#[source] E),
    /// Decoding or suppression failed.
    #[error(transparent)]
    Detect(#[from] DetectError),
}

/// Bundles a [`TensorSource`] with the detector configuration and labels.
///
/// The pipeline keeps no per-frame state: a failed frame leaves it ready for
/// the next one.
pub struct DetectionPipeline<S: TensorSource> {
    source: S,
    config: DetectorConfig,
    labels: LabelTable,
}

impl<S: TensorSource> DetectionPipeline<S> {
    /// Create a new pipeline, validating the configuration up front.
    pub fn new(source: S, config: DetectorConfig, labels: LabelTable) -> Result<Self, DetectError> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            labels,
        })
    }

    /// Process a single frame and return the final detections.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, FrameError<S::Error>> {
        let tensors = self
            .source
            .infer(input, width, height)
            .map_err(FrameError::Inference)?;
        let frame = FrameSize::new(width, height);
        let detections = detect_frame(&tensors, frame, &self.config, &self.labels)?;
        debug!(count = detections.len(), width, height, "processed frame");
        Ok(detections)
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
