//! Builder for assembling raw tensors cell by cell.

use crate::decoding::{DetectError, RawTensors, Result};

/// One cell's prediction as plain values.
#[derive(Debug, Clone, Default)]
struct CellValues {
    anchor: usize,
    row: usize,
    col: usize,
    xywh: [f32; 4],
    objectness: f32,
    class_probs: Vec<f32>,
}

/// Builder for [`RawTensors`] from sparse per-cell predictions.
///
/// Cells that are never set stay zero, which decodes to a degenerate box.
#[derive(Debug, Clone)]
pub struct RawTensorsBuilder {
    num_anchor_boxes: usize,
    num_classes: usize,
    grid_h: usize,
    grid_w: usize,
    cells: Vec<CellValues>,
}

impl RawTensorsBuilder {
    /// Create a builder for a `(num_anchor_boxes, grid_h, grid_w)` grid with
    /// `num_classes` classes.
    pub fn new(
        num_anchor_boxes: usize,
        num_classes: usize,
        grid_h: usize,
        grid_w: usize,
    ) -> Self {
        Self {
            num_anchor_boxes,
            num_classes,
            grid_h,
            grid_w,
            cells: Vec::new(),
        }
    }

    /// Set the prediction of anchor `anchor` in cell `(row, col)`.
    ///
    /// `xywh` is `[tx, ty, tw, th]`.
    pub fn cell(
        mut self,
        anchor: usize,
        row: usize,
        col: usize,
        xywh: [f32; 4],
        objectness: f32,
        class_probs: &[f32],
    ) -> Self {
        self.cells.push(CellValues {
            anchor,
            row,
            col,
            xywh,
            objectness,
            class_probs: class_probs.to_vec(),
        });
        self
    }

    /// Build the tensors, rejecting cells outside the grid or with the wrong
    /// number of class probabilities.
    pub fn build(self) -> Result<RawTensors> {
        let mut tensors = RawTensors::zeros(
            self.num_anchor_boxes,
            self.num_classes,
            self.grid_h,
            self.grid_w,
        );

        for cell in self.cells {
            if cell.anchor >= self.num_anchor_boxes
                || cell.row >= self.grid_h
                || cell.col >= self.grid_w
            {
                return Err(DetectError::ShapeMismatch {
                    field: "cell",
                    expected: vec![self.num_anchor_boxes, self.grid_h, self.grid_w],
                    actual: vec![cell.anchor, cell.row, cell.col],
                });
            }
            if cell.class_probs.len() != self.num_classes {
                return Err(DetectError::ShapeMismatch {
                    field: "class_probs",
                    expected: vec![self.num_classes],
                    actual: vec![cell.class_probs.len()],
                });
            }

            let idx = [cell.anchor, cell.row, cell.col];
            let [tx, ty, tw, th] = cell.xywh;
            tensors.x[idx] = tx;
            tensors.y[idx] = ty;
            tensors.w[idx] = tw;
            tensors.h[idx] = th;
            tensors.conf[idx] = cell.objectness;
            for (class, p) in cell.class_probs.into_iter().enumerate() {
                tensors.prob[[cell.anchor, class, cell.row, cell.col]] = p;
            }
        }

        Ok(tensors)
    }
}
