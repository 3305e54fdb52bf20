//! Decoding and non-maximum suppression for YOLOv2-style detection grids.
//!
//! A network produces, per frame, dense tensors of box offsets, sizes,
//! objectness and class probabilities for every anchor of every grid cell.
//! [`detect_frame`] turns those into a short list of labeled, de-duplicated
//! [`Detection`]s in absolute pixel coordinates.

pub mod decoding;
pub mod integration;

pub use decoding::{
    BoundingBox, DetectError, Detection, DetectorConfig, FrameSize, LabelTable, NmsPolicy,
    RawPrediction, RawTensors, decode, detect_frame, detect_frames, suppress,
};
pub use integration::{
    DetectionPipeline, FrameError, IntoRawTensors, RawTensorsBuilder, TensorSource,
};
