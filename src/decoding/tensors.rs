//! Raw per-cell, per-anchor network outputs.

use ndarray::{Array3, Array4, ArrayView1, ArrayView4, Axis, s};

use crate::decoding::error::{DetectError, Result};

/// Number of non-class channels in a packed head: x, y, w, h, objectness.
pub const BOX_CHANNELS: usize = 5;

/// Prediction of a single anchor box in a single grid cell.
#[derive(Debug, Clone)]
pub struct RawPrediction<'a> {
    /// Offset within the cell along x
    pub tx: f32,
    /// Offset within the cell along y
    pub ty: f32,
    /// Width relative to the frame
    pub tw: f32,
    /// Height relative to the frame
    pub th: f32,
    /// Confidence that some object is present
    pub objectness: f32,
    /// Per-class probabilities, index-aligned with the label table
    pub class_probs: ArrayView1<'a, f32>,
}

/// Dense raw tensors for one frame.
///
/// `x`, `y`, `w`, `h` and `conf` are indexed `[anchor, row, col]`;
/// `prob` is indexed `[anchor, class, row, col]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawTensors {
    /// Offset within the cell along x
    pub x: Array3<f32>,
    /// Offset within the cell along y
    pub y: Array3<f32>,
    /// Width relative to the frame
    pub w: Array3<f32>,
    /// Height relative to the frame
    pub h: Array3<f32>,
    /// Objectness per anchor box
    pub conf: Array3<f32>,
    /// Class probabilities per anchor box
    pub prob: Array4<f32>,
}

impl RawTensors {
    /// Create tensors from individual fields.
    ///
    /// Shapes are not checked here; see [`RawTensors::validate`].
    pub fn new(
        x: Array3<f32>,
        y: Array3<f32>,
        w: Array3<f32>,
        h: Array3<f32>,
        conf: Array3<f32>,
        prob: Array4<f32>,
    ) -> Self {
        Self {
            x,
            y,
            w,
            h,
            conf,
            prob,
        }
    }

    /// All-zero tensors of shape `(num_anchor_boxes, num_classes, grid_h, grid_w)`.
    pub fn zeros(
        num_anchor_boxes: usize,
        num_classes: usize,
        grid_h: usize,
        grid_w: usize,
    ) -> Self {
        let dim = (num_anchor_boxes, grid_h, grid_w);
        Self {
            x: Array3::zeros(dim),
            y: Array3::zeros(dim),
            w: Array3::zeros(dim),
            h: Array3::zeros(dim),
            conf: Array3::zeros(dim),
            prob: Array4::zeros((num_anchor_boxes, num_classes, grid_h, grid_w)),
        }
    }

    /// Split a packed head of shape `(B, 5 + C, Gh, Gw)`.
    ///
    /// Channel order is `x, y, w, h, conf, p_0 .. p_{C-1}`, already activated.
    pub fn from_packed(head: ArrayView4<'_, f32>) -> Result<Self> {
        let (num_anchor_boxes, channels, grid_h, grid_w) = head.dim();
        if channels <= BOX_CHANNELS {
            return Err(DetectError::ShapeMismatch {
                field: "head",
                expected: vec![num_anchor_boxes, BOX_CHANNELS + 1, grid_h, grid_w],
                actual: head.shape().to_vec(),
            });
        }

        let channel = |c: usize| -> Array3<f32> { head.index_axis(Axis(1), c).to_owned() };

        Ok(Self {
            x: channel(0),
            y: channel(1),
            w: channel(2),
            h: channel(3),
            conf: channel(4),
            prob: head.slice(s![.., BOX_CHANNELS.., .., ..]).to_owned(),
        })
    }

    /// Number of anchor boxes per cell.
    pub fn num_anchor_boxes(&self) -> usize {
        self.conf.dim().0
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.prob.dim().1
    }

    /// Grid dimensions `(grid_h, grid_w)`.
    pub fn grid_size(&self) -> (usize, usize) {
        let (_, grid_h, grid_w) = self.conf.dim();
        (grid_h, grid_w)
    }

    /// Check that every field agrees on `(B, Gh, Gw)` and that `prob` is
    /// `(B, C, Gh, Gw)`.
    pub fn validate(&self) -> Result<()> {
        let expected = self.conf.dim();
        let fields = [
            ("x", &self.x),
            ("y", &self.y),
            ("w", &self.w),
            ("h", &self.h),
        ];
        for (field, array) in fields {
            if array.dim() != expected {
                return Err(shape_mismatch(field, expected, array.shape()));
            }
        }

        let (num_anchor_boxes, grid_h, grid_w) = expected;
        let (prob_b, num_classes, prob_h, prob_w) = self.prob.dim();
        if (prob_b, prob_h, prob_w) != expected {
            return Err(DetectError::ShapeMismatch {
                field: "prob",
                expected: vec![num_anchor_boxes, num_classes, grid_h, grid_w],
                actual: vec![prob_b, num_classes, prob_h, prob_w],
            });
        }
        Ok(())
    }

    /// Check shapes and that `B` and `C` match the expected counts.
    pub fn validate_against(&self, num_anchor_boxes: usize, num_classes: usize) -> Result<()> {
        self.validate()?;
        if self.num_anchor_boxes() != num_anchor_boxes || self.num_classes() != num_classes {
            let (grid_h, grid_w) = self.grid_size();
            return Err(DetectError::ShapeMismatch {
                field: "prob",
                expected: vec![num_anchor_boxes, num_classes, grid_h, grid_w],
                actual: self.prob.shape().to_vec(),
            });
        }
        Ok(())
    }

    /// View of the prediction at `(anchor, row, col)`.
    ///
    /// # Panics
    /// If the index is out of bounds or the tensors have not been validated.
    pub fn prediction(&self, anchor: usize, row: usize, col: usize) -> RawPrediction<'_> {
        let idx = [anchor, row, col];
        RawPrediction {
            tx: self.x[idx],
            ty: self.y[idx],
            tw: self.w[idx],
            th: self.h[idx],
            objectness: self.conf[idx],
            class_probs: self.prob.slice(s![anchor, .., row, col]),
        }
    }
}

fn shape_mismatch(
    field: &'static str,
    expected: (usize, usize, usize),
    actual: &[usize],
) -> DetectError {
    let (b, gh, gw) = expected;
    DetectError::ShapeMismatch {
        field,
        expected: vec![b, gh, gw],
        actual: actual.to_vec(),
    }
}
