//! Burn inference backend for YOLOv2-style networks.
//!
//! This module provides a `BurnDetector` that implements `TensorSource`
//! for running detection networks built with the Burn framework.
//!
//! # Example
//!
//! ```ignore
//! use yolo_decode_rs::integration::{BurnDetector, BurnModel};
//! use burn::backend::NdArray;
//!
//! // Implement BurnModel for your detection network
//! struct MyYoloV2 { /* ... */ }
//!
//! impl BurnModel<NdArray> for MyYoloV2 {
//!     fn forward(&self, input: burn::tensor::Tensor<NdArray, 4>) -> burn::tensor::Tensor<NdArray, 4> {
//!         // Run inference, return the activated (B, 5 + C, Gh, Gw) head
//!     }
//! }
//!
//! let model = MyYoloV2::load("yolov2_final.model");
//! let detector = BurnDetector::new(model, Default::default());
//! ```

use burn::prelude::*;
use burn::tensor::Tensor;
use ndarray::{Array3, Array4};
use thiserror::Error;

use super::TensorSource;
use crate::decoding::{DetectError, RawTensors};

/// Error type for Burn inference failures.
#[derive(Debug, Error)]
pub enum BurnDetectorError {
    /// Input image has invalid dimensions.
    #[error("invalid input dimensions: expected {expected:?}, got {got:?}")]
    InvalidInputDimensions {
        expected: (u32, u32, u32),
        got: (u32, u32, u32),
    },
    /// Preprocessing failed.
    #[error("preprocessing error: {0}")]
    Preprocessing(String),
    /// The network output could not be read back.
    #[error("postprocessing error: {0}")]
    Postprocessing(String),
    /// The network output does not have a packed head layout.
    #[error(transparent)]
    Head(#[from] DetectError),
}

/// Trait for Burn-based YOLOv2-style networks.
///
/// Implement this trait for your specific model architecture.
pub trait BurnModel<B: Backend>: Send + Sync {
    /// Run forward pass on the input tensor.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape [1, channels, height, width], values in [0, 1]
    ///
    /// # Returns
    /// The activated head of shape [B, 5 + C, Gh, Gw], channels ordered
    /// `x, y, w, h, conf, p_0 .. p_{C-1}`.
    fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4>;

    /// Get the expected input size (channels, height, width).
    fn input_size(&self) -> (u32, u32, u32) {
        (3, 416, 416) // Default YOLOv2 input size
    }
}

/// Burn-based network implementing `TensorSource`.
pub struct BurnDetector<B: Backend, M: BurnModel<B>> {
    model: M,
    device: B::Device,
}

impl<B: Backend, M: BurnModel<B>> BurnDetector<B, M> {
    /// Create a new Burn detector with the given model and device.
    pub fn new(model: M, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Convert interleaved RGB bytes (HWC) to a normalized [1, C, H, W] tensor.
    pub fn preprocess(
        &self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Tensor<B, 4>, BurnDetectorError> {
        let (channels, target_h, target_w) = self.model.input_size();
        let expected_len = (width * height * channels) as usize;

        if input.len() != expected_len {
            let row_len = (width * channels).max(1);
            return Err(BurnDetectorError::InvalidInputDimensions {
                expected: (channels, height, width),
                got: (channels, input.len() as u32 / row_len, width),
            });
        }

        if height != target_h || width != target_w {
            return Err(BurnDetectorError::Preprocessing(format!(
                "input size {}x{} doesn't match model size {}x{}; resize frames before inference",
                width, height, target_w, target_h
            )));
        }

        let hwc = Array3::from_shape_vec(
            (height as usize, width as usize, channels as usize),
            input.to_vec(),
        )
        .map_err(|e| BurnDetectorError::Preprocessing(e.to_string()))?;

        // HWC -> CHW, normalized to [0, 1]
        let data: Vec<f32> = hwc
            .permuted_axes([2, 0, 1])
            .iter()
            .map(|&x| x as f32 / 255.0)
            .collect();

        let tensor = Tensor::<B, 1>::from_floats(data.as_slice(), &self.device).reshape([
            1,
            channels as usize,
            height as usize,
            width as usize,
        ]);

        Ok(tensor)
    }

    /// Read the network head back into host memory and split it into fields.
    fn postprocess(&self, head: Tensor<B, 4>) -> Result<RawTensors, BurnDetectorError> {
        let [num_anchor_boxes, channels, grid_h, grid_w] = head.dims();
        let values: Vec<f32> = head
            .into_data()
            .convert::<f32>()
            .to_vec()
            .map_err(|e| BurnDetectorError::Postprocessing(format!("{e:?}")))?;

        let packed = Array4::from_shape_vec((num_anchor_boxes, channels, grid_h, grid_w), values)
            .map_err(|e| BurnDetectorError::Postprocessing(e.to_string()))?;

        Ok(RawTensors::from_packed(packed.view())?)
    }
}

impl<B: Backend, M: BurnModel<B>> TensorSource for BurnDetector<B, M> {
    type Error = BurnDetectorError;

    fn infer(&mut self, input: &[u8], width: u32, height: u32) -> Result<RawTensors, Self::Error> {
        let tensor = self.preprocess(input, width, height)?;
        let head = self.model.forward(tensor);
        self.postprocess(head)
    }
}
