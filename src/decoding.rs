mod bbox;
mod config;
mod decoder;
mod detection;
mod error;
mod frame;
mod labels;
mod nms;
mod tensors;

pub use bbox::BoundingBox;
pub use config::{DetectorConfig, FrameSize, NmsPolicy};
pub use decoder::{best_class, decode, decode_box};
pub use detection::Detection;
pub use error::{DetectError, Result};
pub use frame::{detect_frame, detect_frames};
pub use labels::LabelTable;
pub use nms::suppress;
pub use tensors::{BOX_CHANNELS, RawPrediction, RawTensors};
