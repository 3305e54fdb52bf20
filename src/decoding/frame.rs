//! Per-frame orchestration: decode, then suppress.

use tracing::warn;

use crate::decoding::config::{DetectorConfig, FrameSize};
use crate::decoding::decoder::decode;
use crate::decoding::detection::Detection;
use crate::decoding::error::Result;
use crate::decoding::labels::LabelTable;
use crate::decoding::nms::suppress;
use crate::decoding::tensors::RawTensors;

/// Turn one frame's raw tensors into final detections.
///
/// Pure and reentrant: nothing is carried between calls, so frames may be
/// processed on separate threads.
pub fn detect_frame(
    tensors: &RawTensors,
    frame: FrameSize,
    config: &DetectorConfig,
    labels: &LabelTable,
) -> Result<Vec<Detection>> {
    config.validate()?;
    tensors.validate_against(config.num_anchor_boxes, config.num_classes)?;

    let candidates = decode(tensors, frame, config.detection_threshold, labels)?;
    let kept = suppress(candidates, config.iou_threshold, config.nms_policy);
    Ok(kept)
}

/// Run [`detect_frame`] over a batch of frames.
///
/// Results are returned in input order; a failed frame does not affect the
/// others. With the `rayon` feature, frames are processed in parallel.
pub fn detect_frames(
    frames: &[RawTensors],
    frame: FrameSize,
    config: &DetectorConfig,
    labels: &LabelTable,
) -> Vec<Result<Vec<Detection>>> {
    let run = |(index, tensors): (usize, &RawTensors)| {
        let result = detect_frame(tensors, frame, config, labels);
        if let Err(err) = &result {
            warn!(frame = index, error = %err, "frame detection failed");
        }
        result
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        frames.par_iter().enumerate().map(run).collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        frames.iter().enumerate().map(run).collect()
    }
}
