//! Integration module for connecting model inference backends with the decoder.
//!
//! This module provides traits and utilities for plugging various inference
//! backends (Burn, ONNX Runtime, etc.) into the per-frame detection pipeline.

mod builder;
mod detector;
mod pipeline;

pub use builder::RawTensorsBuilder;
pub use detector::{IntoRawTensors, TensorSource};
pub use pipeline::{DetectionPipeline, FrameError};

#[cfg(feature = "burn-backend")]
mod burn_backend;

#[cfg(feature = "burn-backend")]
pub use burn_backend::{BurnDetector, BurnDetectorError, BurnModel};
