//! Grid decoding: raw tensors to candidate detections.

use ndarray::ArrayView1;
use tracing::{debug, trace};

use crate::decoding::bbox::BoundingBox;
use crate::decoding::config::FrameSize;
use crate::decoding::detection::Detection;
use crate::decoding::error::Result;
use crate::decoding::labels::LabelTable;
use crate::decoding::tensors::{RawPrediction, RawTensors};

/// Index and value of the largest class probability.
///
/// Ties resolve to the lowest index; NaN never wins.
pub fn best_class(class_probs: ArrayView1<'_, f32>) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &p) in class_probs.iter().enumerate() {
        match best {
            Some((_, best_p)) if p > best_p => best = Some((idx, p)),
            None if !p.is_nan() => best = Some((idx, p)),
            _ => {}
        }
    }
    best
}

/// Absolute-pixel box for the prediction in cell `(row, col)`, clipped to
/// the frame. Returns `None` when clipping collapses the box.
pub fn decode_box(
    pred: &RawPrediction<'_>,
    row: usize,
    col: usize,
    grid: (usize, usize),
    frame: FrameSize,
) -> Option<BoundingBox> {
    let (grid_h, grid_w) = grid;
    let frame_w = frame.width as f32;
    let frame_h = frame.height as f32;

    let bbox = BoundingBox::new(
        (col as f32 + pred.tx) / grid_w as f32 * frame_w,
        (row as f32 + pred.ty) / grid_h as f32 * frame_h,
        pred.tw * frame_w,
        pred.th * frame_h,
    )
    .clip(frame_w, frame_h);

    if bbox.is_degenerate() {
        None
    } else {
        Some(bbox)
    }
}

/// Decode every anchor of every cell into candidate detections.
///
/// Cells are visited anchor-major, then row, then column. A candidate is
/// emitted when `objectness * best_prob > detection_threshold`.
pub fn decode(
    tensors: &RawTensors,
    frame: FrameSize,
    detection_threshold: f32,
    labels: &LabelTable,
) -> Result<Vec<Detection>> {
    tensors.validate()?;

    let num_anchor_boxes = tensors.num_anchor_boxes();
    let grid = tensors.grid_size();
    let (grid_h, grid_w) = grid;

    let mut candidates = Vec::new();
    let mut degenerate = 0usize;

    for anchor in 0..num_anchor_boxes {
        for row in 0..grid_h {
            for col in 0..grid_w {
                let pred = tensors.prediction(anchor, row, col);

                let Some(bbox) = decode_box(&pred, row, col, grid, frame) else {
                    degenerate += 1;
                    trace!(anchor, row, col, "dropping degenerate box");
                    continue;
                };

                let Some((class_id, best_prob)) = best_class(pred.class_probs) else {
                    continue;
                };

                let score = pred.objectness * best_prob;
                if score > detection_threshold {
                    let label = labels.lookup(class_id)?;
                    candidates.push(Detection {
                        label: label.to_string(),
                        class_id,
                        class_probs: pred.class_probs.to_vec(),
                        objectness: pred.objectness,
                        score,
                        bbox,
                    });
                }
            }
        }
    }

    debug!(
        candidates = candidates.len(),
        degenerate,
        grid_h,
        grid_w,
        "decoded frame"
    );

    Ok(candidates)
}
