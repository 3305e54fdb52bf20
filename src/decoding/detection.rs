//! Decoded detection.

use crate::decoding::bbox::BoundingBox;

/// A labeled, scored box produced by the decoder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detection {
    /// Name of the best class
    pub label: String,
    /// Index of the best class
    pub class_id: usize,
    /// Full class-probability vector of the cell
    pub class_probs: Vec<f32>,
    /// Objectness of the anchor box
    pub objectness: f32,
    /// `objectness * class_probs[class_id]`
    pub score: f32,
    /// Box in absolute pixels, clipped to the frame
    pub bbox: BoundingBox,
}

impl Detection {
    /// Overlay text such as `"dog(72%)"`.
    pub fn caption(&self) -> String {
        format!("{}({:2}%)", self.label, (self.score * 100.0) as i32)
    }
}
