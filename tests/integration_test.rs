// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Integration tests for the overlay library

use std::collections::HashSet;

use ultralytics_pose_overlay::topology::{ANATOMICAL_EDGE_COUNT, FACE_EDGE_COUNT};
use ultralytics_pose_overlay::{
    BoundingBox, Detection, DrawCommand, Focus, HoverState, ImagePair, KEYPOINT_COUNT,
    RenderOptions, Viewport, build_topology, color_of, name_of, name_to_index, render,
    render_with_topology,
};

fn detection(pose_index: usize, invalid: &[usize]) -> Detection {
    let coords = vec![0.5_f32; KEYPOINT_COUNT];
    Detection::new(
        pose_index,
        BoundingBox::new(0.2, 0.2, 0.6, 0.6),
        &coords,
        &coords,
        invalid.iter().copied().collect::<HashSet<_>>(),
    )
    .unwrap()
}

#[test]
fn test_registry_bijection() {
    for index in 0..KEYPOINT_COUNT {
        let name = name_of(index).unwrap();
        assert_eq!(name_to_index(name).unwrap(), index);
        // Every canonical index also has a color.
        color_of(index).unwrap();
    }
    assert!(name_of(KEYPOINT_COUNT).is_err());
}

#[test]
fn test_topology_counts() {
    let anatomical = build_topology(false).unwrap();
    assert_eq!(anatomical.len(), ANATOMICAL_EDGE_COUNT);
    assert!(!anatomical.iter().any(|e| (23..=90).contains(&e.a)));

    let full = build_topology(true).unwrap();
    assert_eq!(full.len(), ANATOMICAL_EDGE_COUNT + FACE_EDGE_COUNT);
}

#[test]
fn test_invalid_joint_removes_touching_edges() {
    let list = render_with_topology(
        &[detection(0, &[5])],
        Focus::Idle,
        (800, 600),
        1.0,
        &RenderOptions::new(),
    )
    .unwrap();

    let edges = build_topology(true).unwrap();
    let qualifying = edges.iter().filter(|e| e.a != 5 && e.b != 5).count();
    let drawn = list
        .commands
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
        .count();
    assert_eq!(drawn, qualifying);

    // No circle is emitted for the invalid joint either: every marker
    // sits at the shared position, so just count them.
    let markers = list
        .commands
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Circle { .. }))
        .count();
    assert_eq!(markers, KEYPOINT_COUNT - 1);
}

#[test]
fn test_render_is_referentially_transparent() {
    let detections = vec![detection(0, &[]), detection(1, &[40, 41])];
    let edges = build_topology(true).unwrap();
    let hover = Focus::Joint { pose: 0, joint: 16 };
    let opts = RenderOptions::new();
    let first = render(&detections, &edges, hover, (1200, 800), 2.0, &opts);
    let second = render(&detections, &edges, hover, (1200, 800), 2.0, &opts);
    assert_eq!(first, second);
}

#[test]
fn test_hover_scenario_joint_to_idle() {
    let mut hover = HoverState::new();
    hover.on_joint_enter(2, 10);
    assert_eq!(hover.focus(), Focus::Joint { pose: 2, joint: 10 });
    hover.on_joint_leave(2, 10);
    assert_eq!(hover.focus(), Focus::Idle);
}

#[test]
fn test_marker_pixel_position_stable_across_zoom() {
    let detections = vec![detection(0, &[])];
    let opts = RenderOptions::new().with_bbox(false);
    for zoom in [1.0_f32, 4.0] {
        let list =
            render_with_topology(&detections, Focus::Idle, (800, 600), zoom, &opts).unwrap();
        for cmd in &list.commands {
            if let DrawCommand::Circle { center, radius, .. } = cmd {
                assert!((center.0 - 400.0).abs() < f32::EPSILON);
                assert!((center.1 - 300.0).abs() < f32::EPSILON);
                assert!((radius - opts.base_radius * zoom).abs() < 1e-5);
            }
        }
    }
}

#[test]
fn test_preview_height_from_aspect() {
    let image = ImagePair {
        thumbnail_url: "thumb.jpg".to_string(),
        full_resolution_url: "full.jpg".to_string(),
        pixel_width: 1200,
        pixel_height: 800,
    };
    let viewport = Viewport::preview(300.0);
    let (width, height) = viewport.display_size(&image);
    assert!((width - 300.0).abs() < f32::EPSILON);
    assert!((height - 200.0).abs() < f32::EPSILON);
}

#[test]
fn test_image_change_resets_hover() {
    let mut hover = HoverState::new();
    hover.on_pose_enter(0);
    hover.on_joint_enter(0, 91);
    // Selecting a new image forces Idle unconditionally.
    hover.reset();
    assert_eq!(hover.focus(), Focus::Idle);
}

#[test]
fn test_schema_mismatch_reported_but_siblings_render() {
    let short = [0.5_f32; 21];
    let bad = Detection::new(
        0,
        BoundingBox::new(0.0, 0.0, 1.0, 1.0),
        &short,
        &short,
        HashSet::new(),
    )
    .unwrap();
    let list = render_with_topology(
        &[bad, detection(1, &[])],
        Focus::Idle,
        (640, 480),
        1.0,
        &RenderOptions::new(),
    )
    .unwrap();
    assert_eq!(list.skipped.len(), 1);
    assert_eq!(list.skipped[0].pose_index, 0);
    assert_eq!(list.skipped[0].actual, 21);
    let markers = list
        .commands
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Circle { .. }))
        .count();
    assert_eq!(markers, KEYPOINT_COUNT);
}

#[test]
fn test_focused_joint_label() {
    let list = render_with_topology(
        &[detection(0, &[])],
        Focus::Joint { pose: 0, joint: 0 },
        (100, 100),
        1.0,
        &RenderOptions::new(),
    )
    .unwrap();
    let label = list.commands.iter().find_map(|cmd| match cmd {
        DrawCommand::Label { text, .. } => Some(text.as_str()),
        _ => None,
    });
    assert_eq!(label, Some("nose(0)"));
}
