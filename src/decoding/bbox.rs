/// Axis-aligned bounding box in absolute pixel units.
///
/// Stored in center/size form, which is what the network predicts:
/// - CXCYWH: Center X, Center Y, Width, Height
///
/// Corner form (left, top, right, bottom) is derived on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Center x coordinate
    pub center_x: f32,
    /// Center y coordinate
    pub center_y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl BoundingBox {
    /// Create a new box from its center and dimensions.
    #[inline]
    pub fn new(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            center_x,
            center_y,
            width,
            height,
        }
    }

    /// Create a box from corner coordinates (left, top, right, bottom).
    #[inline]
    pub fn from_corners(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            center_x: (left + right) / 2.0,
            center_y: (top + bottom) / 2.0,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Convert to corner form: `[left, top, right, bottom]`.
    #[inline]
    pub fn to_corners(&self) -> [f32; 4] {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        [
            self.center_x - half_w,
            self.center_y - half_h,
            self.center_x + half_w,
            self.center_y + half_h,
        ]
    }

    /// Integer pixel corners `([left, top], [right, bottom])` for drawing.
    ///
    /// Coordinates are truncated toward zero.
    pub fn pixel_corners(&self) -> ([i32; 2], [i32; 2]) {
        let [left, top, right, bottom] = self.to_corners();
        ([left as i32, top as i32], [right as i32, bottom as i32])
    }

    /// Area computed from the corner rectangle.
    #[inline]
    pub fn area(&self) -> f32 {
        let [left, top, right, bottom] = self.to_corners();
        (right - left).max(0.0) * (bottom - top).max(0.0)
    }

    /// Whether the box has collapsed to zero (or negative) extent.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Clamp the box into `[0, frame_width] x [0, frame_height]`.
    ///
    /// Center and size are rebuilt from the clamped corners. Extents never go
    /// negative; a box lying entirely outside the frame collapses to zero
    /// width or height and reports [`is_degenerate`](Self::is_degenerate).
    pub fn clip(&self, frame_width: f32, frame_height: f32) -> Self {
        let [left, top, right, bottom] = self.to_corners();
        // max/min rather than clamp: NaN coordinates must not panic
        let left = left.max(0.0).min(frame_width);
        let top = top.max(0.0).min(frame_height);
        let right = right.max(left).min(frame_width);
        let bottom = bottom.max(top).min(frame_height);
        Self::from_corners(left, top, right, bottom)
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    ///
    /// Returns 0 when the boxes do not overlap or the union has no area.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let [a_left, a_top, a_right, a_bottom] = self.to_corners();
        let [b_left, b_top, b_right, b_bottom] = other.to_corners();

        let x1 = a_left.max(b_left);
        let y1 = a_top.max(b_top);
        let x2 = a_right.min(b_right);
        let y2 = a_bottom.min(b_bottom);

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            (inter_area / union_area).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
