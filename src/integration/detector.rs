//! Trait for model inference backends.

use crate::decoding::RawTensors;

/// Trait for model inference backends.
///
/// Implement this trait to connect any YOLOv2-style network to the decoder.
/// The source only runs the forward pass; decoding and suppression happen in
/// [`DetectionPipeline`](super::DetectionPipeline).
///
/// # Example
///
/// ```ignore
/// use yolo_decode_rs::{RawTensors, TensorSource};
///
/// struct MyNetwork {
///     // Your model here
/// }
///
/// impl TensorSource for MyNetwork {
///     type Error = std::io::Error;
///
///     fn infer(&mut self, input: &[u8], width: u32, height: u32) -> Result<RawTensors, Self::Error> {
///         // Run the forward pass and split the head into fields
///         Ok(RawTensors::zeros(5, 10, 13, 13))
///     }
/// }
/// ```
pub trait TensorSource {
    /// Error type for inference failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run the forward pass on raw image data.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn infer(&mut self, input: &[u8], width: u32, height: u32) -> Result<RawTensors, Self::Error>;
}

/// Helper trait for converting model-specific outputs to [`RawTensors`].
pub trait IntoRawTensors {
    /// Error raised when the output cannot be split into fields.
    type Error;

    fn into_raw_tensors(self) -> Result<RawTensors, Self::Error>;
}

impl IntoRawTensors for RawTensors {
    type Error = std::convert::Infallible;

    fn into_raw_tensors(self) -> Result<RawTensors, Self::Error> {
        Ok(self)
    }
}

impl IntoRawTensors for ndarray::Array4<f32> {
    type Error = crate::decoding::DetectError;

    /// Interprets the array as a packed `(B, 5 + C, Gh, Gw)` head.
    fn into_raw_tensors(self) -> Result<RawTensors, Self::Error> {
        RawTensors::from_packed(self.view())
    }
}
