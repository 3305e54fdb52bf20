//! Detector configuration.

use crate::decoding::error::{DetectError, Result};

/// How non-maximum suppression treats detections of different classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NmsPolicy {
    /// Any detection may suppress any other, regardless of label.
    #[default]
    Global,
    /// A detection only suppresses detections with the same class.
    PerLabel,
}

/// Frame geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameSize {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

impl FrameSize {
    /// Create a frame size from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self::new(416, 416)
    }
}

/// Configuration for decoding and suppression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// Minimum score (exclusive) for a candidate to be kept
    pub detection_threshold: f32,
    /// Overlap above which the lower-scored detection is suppressed
    pub iou_threshold: f32,
    pub num_classes: usize,
    pub num_anchor_boxes: usize,
    pub nms_policy: NmsPolicy,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            detection_threshold: 0.5,
            iou_threshold: 0.3,
            num_classes: 10,
            num_anchor_boxes: 5,
            nms_policy: NmsPolicy::Global,
        }
    }
}

impl DetectorConfig {
    pub fn new(num_classes: usize, num_anchor_boxes: usize) -> Self {
        Self {
            num_classes,
            num_anchor_boxes,
            ..Self::default()
        }
    }

    pub fn with_detection_threshold(mut self, threshold: f32) -> Self {
        self.detection_threshold = threshold;
        self
    }

    pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
        self.iou_threshold = threshold;
        self
    }

    pub fn with_nms_policy(mut self, policy: NmsPolicy) -> Self {
        self.nms_policy = policy;
        self
    }

    /// Check that thresholds lie in (0, 1) and counts are non-zero.
    pub fn validate(&self) -> Result<()> {
        if !(self.detection_threshold > 0.0 && self.detection_threshold < 1.0) {
            return Err(DetectError::InvalidConfig(
                "detection_threshold must be in (0, 1)",
            ));
        }
        if !(self.iou_threshold > 0.0 && self.iou_threshold < 1.0) {
            return Err(DetectError::InvalidConfig(
                "iou_threshold must be in (0, 1)",
            ));
        }
        if self.num_classes == 0 {
            return Err(DetectError::InvalidConfig("num_classes must be at least 1"));
        }
        if self.num_anchor_boxes == 0 {
            return Err(DetectError::InvalidConfig(
                "num_anchor_boxes must be at least 1",
            ));
        }
        Ok(())
    }
}
