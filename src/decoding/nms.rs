//! Greedy non-maximum suppression.

use tracing::debug;

use crate::decoding::config::NmsPolicy;
use crate::decoding::detection::Detection;

/// Remove detections overlapping a higher-scored one by more than
/// `iou_threshold`.
///
/// Detections are stably sorted by descending score, so equal scores keep
/// their input order. The result is in descending score order.
pub fn suppress(
    mut detections: Vec<Detection>,
    iou_threshold: f32,
    policy: NmsPolicy,
) -> Vec<Detection> {
    let total = detections.len();
    detections.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut suppressed = vec![false; total];
    for i in 0..total {
        if suppressed[i] {
            continue;
        }
        let kept = &detections[i];
        for j in (i + 1)..total {
            if suppressed[j] {
                continue;
            }
            let other = &detections[j];
            if policy == NmsPolicy::PerLabel && other.class_id != kept.class_id {
                continue;
            }
            if kept.bbox.iou(&other.bbox) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    let kept: Vec<Detection> = detections
        .into_iter()
        .zip(suppressed)
        .filter_map(|(det, s)| if s { None } else { Some(det) })
        .collect();

    debug!(
        before = total,
        after = kept.len(),
        ?policy,
        "suppressed overlaps"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding::bbox::BoundingBox;

    fn det(class_id: usize, score: f32, bbox: BoundingBox) -> Detection {
        Detection {
            label: format!("class-{class_id}"),
            class_id,
            class_probs: vec![],
            objectness: score,
            score,
            bbox,
        }
    }

    #[test]
    fn test_identical_boxes_keep_best() {
        let bbox = BoundingBox::new(100.0, 100.0, 40.0, 40.0);
        let dets = vec![det(0, 0.6, bbox), det(0, 0.9, bbox)];

        let kept = suppress(dets, 0.3, NmsPolicy::Global);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 0.9);
    }

    #[test]
    fn test_disjoint_boxes_survive() {
        let a = BoundingBox::new(50.0, 50.0, 20.0, 20.0);
        let b = BoundingBox::new(300.0, 300.0, 20.0, 20.0);

        for threshold in [0.0, 0.3, 0.99] {
            let dets = vec![det(0, 0.9, a), det(0, 0.6, b)];
            let kept = suppress(dets, threshold, NmsPolicy::Global);
            assert_eq!(kept.len(), 2);
        }
    }

    #[test]
    fn test_sorted_descending() {
        let dets = vec![
            det(0, 0.55, BoundingBox::new(20.0, 20.0, 10.0, 10.0)),
            det(0, 0.95, BoundingBox::new(200.0, 20.0, 10.0, 10.0)),
            det(0, 0.75, BoundingBox::new(20.0, 200.0, 10.0, 10.0)),
        ];
        let scores: Vec<f32> = suppress(dets, 0.3, NmsPolicy::Global)
            .iter()
            .map(|d| d.score)
            .collect();
        assert_eq!(scores, vec![0.95, 0.75, 0.55]);
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let bbox = BoundingBox::new(100.0, 100.0, 40.0, 40.0);
        let dets = vec![det(3, 0.8, bbox), det(1, 0.8, bbox)];
        let kept = suppress(dets, 0.3, NmsPolicy::Global);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].class_id, 3);
    }

    #[test]
    fn test_suppressed_box_does_not_suppress() {
        // b overlaps a and c, but a and c do not overlap each other
        let a = BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::from_corners(4.0, 0.0, 14.0, 10.0);
        let c = BoundingBox::from_corners(8.0, 0.0, 18.0, 10.0);
        let dets = vec![det(0, 0.9, a), det(0, 0.8, b), det(0, 0.7, c)];

        let kept = suppress(dets, 0.3, NmsPolicy::Global);
        let scores: Vec<f32> = kept.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.9, 0.7]);
    }

    #[test]
    fn test_global_policy_crosses_labels() {
        let bbox = BoundingBox::new(100.0, 100.0, 40.0, 40.0);
        let dets = vec![det(0, 0.9, bbox), det(1, 0.8, bbox)];
        assert_eq!(suppress(dets, 0.3, NmsPolicy::Global).len(), 1);
    }

    #[test]
    fn test_per_label_policy_keeps_other_classes() {
        let bbox = BoundingBox::new(100.0, 100.0, 40.0, 40.0);
        let dets = vec![det(0, 0.9, bbox), det(1, 0.8, bbox), det(0, 0.7, bbox)];

        let kept = suppress(dets, 0.3, NmsPolicy::PerLabel);
        let classes: Vec<usize> = kept.iter().map(|d| d.class_id).collect();
        assert_eq!(classes, vec![0, 1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(suppress(vec![], 0.3, NmsPolicy::Global).is_empty());
    }
}
