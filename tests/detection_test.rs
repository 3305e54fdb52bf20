use yolo_decode_rs::{
    BoundingBox, DetectError, Detection, DetectorConfig, FrameSize, LabelTable, NmsPolicy,
    RawTensorsBuilder, decode, detect_frame, suppress,
};

fn labels() -> LabelTable {
    LabelTable::new(["person", "car"])
}

fn candidate(label: &str, class_id: usize, score: f32, bbox: BoundingBox) -> Detection {
    Detection {
        label: label.to_string(),
        class_id,
        class_probs: vec![],
        objectness: score,
        score,
        bbox,
    }
}

#[test]
fn test_single_cell_scenario() {
    // 2x2 grid, 1 anchor, 2 classes, 416x416 frame
    let tensors = RawTensorsBuilder::new(1, 2, 2, 2)
        .cell(0, 0, 0, [0.5, 0.5, 0.2, 0.2], 0.9, &[0.8, 0.2])
        .build()
        .unwrap();

    let dets = decode(&tensors, FrameSize::new(416, 416), 0.5, &labels()).unwrap();
    assert_eq!(dets.len(), 1);

    let det = &dets[0];
    assert_eq!(det.label, "person");
    assert!((det.score - 0.72).abs() < 1e-5);
    assert!((det.objectness - 0.9).abs() < 1e-6);
    assert!((det.bbox.center_x - 104.0).abs() < 1e-3);
    assert!((det.bbox.center_y - 104.0).abs() < 1e-3);
    assert_eq!(det.caption(), "person(72%)");
}

#[test]
fn test_identical_boxes_keep_higher_score() {
    let bbox = BoundingBox::new(200.0, 200.0, 80.0, 60.0);
    let kept = suppress(
        vec![candidate("car", 1, 0.6, bbox), candidate("car", 1, 0.9, bbox)],
        0.3,
        NmsPolicy::Global,
    );
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].score, 0.9);
}

#[test]
fn test_disjoint_boxes_both_survive() {
    let a = BoundingBox::new(50.0, 50.0, 40.0, 40.0);
    let b = BoundingBox::new(350.0, 350.0, 40.0, 40.0);
    assert_eq!(a.iou(&b), 0.0);

    for threshold in [0.01, 0.3, 0.5, 0.99] {
        let kept = suppress(
            vec![candidate("car", 1, 0.9, a), candidate("car", 1, 0.6, b)],
            threshold,
            NmsPolicy::Global,
        );
        assert_eq!(kept.len(), 2);
    }
}

#[test]
fn test_nms_policy_on_overlapping_classes() {
    // A person and a car predicted at the same place
    let tensors = RawTensorsBuilder::new(2, 2, 2, 2)
        .cell(0, 1, 1, [0.5, 0.5, 0.3, 0.3], 0.95, &[0.9, 0.1])
        .cell(1, 1, 1, [0.5, 0.5, 0.3, 0.3], 0.85, &[0.2, 0.8])
        .build()
        .unwrap();
    let frame = FrameSize::new(416, 416);

    let global = DetectorConfig::new(2, 2);
    let dets = detect_frame(&tensors, frame, &global, &labels()).unwrap();
    assert_eq!(dets.len(), 1);
    assert_eq!(dets[0].label, "person");

    let per_label = DetectorConfig::new(2, 2).with_nms_policy(NmsPolicy::PerLabel);
    let dets = detect_frame(&tensors, frame, &per_label, &labels()).unwrap();
    let found: Vec<&str> = dets.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(found, vec!["person", "car"]);
}

#[test]
fn test_detect_frame_is_deterministic() {
    let tensors = RawTensorsBuilder::new(2, 2, 3, 3)
        .cell(0, 0, 0, [0.5, 0.5, 0.2, 0.2], 0.9, &[0.8, 0.2])
        .cell(1, 0, 0, [0.6, 0.4, 0.25, 0.2], 0.8, &[0.7, 0.3])
        .cell(0, 2, 1, [0.1, 0.9, 0.3, 0.1], 0.99, &[0.1, 0.9])
        .build()
        .unwrap();
    let config = DetectorConfig::new(2, 2);

    let first = detect_frame(&tensors, FrameSize::default(), &config, &labels()).unwrap();
    for _ in 0..5 {
        let again = detect_frame(&tensors, FrameSize::default(), &config, &labels()).unwrap();
        assert_eq!(first, again);
    }
    assert_eq!(first.len(), 2);
}

#[test]
fn test_errors_are_per_frame() {
    let config = DetectorConfig::new(2, 1);
    let good = RawTensorsBuilder::new(1, 2, 2, 2)
        .cell(0, 0, 0, [0.5, 0.5, 0.2, 0.2], 0.9, &[0.1, 0.9])
        .build()
        .unwrap();

    let short = LabelTable::new(["person"]);
    let err = detect_frame(&good, FrameSize::default(), &config, &short).unwrap_err();
    assert!(matches!(
        err,
        DetectError::LabelTableTooSmall { class_id: 1, len: 1 }
    ));

    let mut broken = good.clone();
    broken.conf = ndarray::Array3::zeros((1, 3, 3));
    let err = detect_frame(&broken, FrameSize::default(), &config, &labels()).unwrap_err();
    assert!(matches!(err, DetectError::ShapeMismatch { .. }));

    // The same inputs still decode afterwards
    let dets = detect_frame(&good, FrameSize::default(), &config, &labels()).unwrap();
    assert_eq!(dets.len(), 1);
    assert_eq!(dets[0].label, "car");
}

#[test]
fn test_render_corners_inside_frame() {
    let tensors = RawTensorsBuilder::new(1, 2, 2, 2)
        .cell(0, 1, 1, [0.9, 0.9, 0.6, 0.6], 0.9, &[0.8, 0.2])
        .build()
        .unwrap();
    let dets = decode(&tensors, FrameSize::new(416, 416), 0.5, &labels()).unwrap();
    assert_eq!(dets.len(), 1);

    let ([left, top], [right, bottom]) = dets[0].bbox.pixel_corners();
    assert!(left >= 0 && top >= 0);
    assert!((415..=416).contains(&right));
    assert!((415..=416).contains(&bottom));
    assert!(right > left && bottom > top);
}
