// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton topology for the whole-body layout.
//!
//! Anatomical links are authored by joint name and resolved against the
//! registry when the topology is first built; the face mesh is generated
//! over the local 68-point face space and offset into canonical indices.

use std::sync::OnceLock;

use crate::error::Result;
use crate::schema::name_to_index;
use crate::visualizer::color::{
    Color, PALETTE_CENTER, PALETTE_FACE_MESH, PALETTE_FOREFINGER, PALETTE_LEFT, PALETTE_MIDDLE,
    PALETTE_RIGHT, PALETTE_RING,
};

/// One drawable skeleton connector between two canonical joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Canonical index of the first endpoint.
    pub a: usize,
    /// Canonical index of the second endpoint.
    pub b: usize,
    /// Stroke color.
    pub color: Color,
}

/// Number of anatomical (body, feet, hands) links.
pub const ANATOMICAL_EDGE_COUNT: usize = SKELETON_LINKS.len();

/// Number of generated face-mesh edges.
pub const FACE_EDGE_COUNT: usize = 63;

/// Canonical index of `face-0`; local face indices are offset by this.
const FACE_OFFSET: usize = 23;

/// Anatomical skeleton links authored by joint name, with a pose-palette
/// color index per link. Unresolvable names fail the topology build.
const SKELETON_LINKS: [(&str, &str, usize); 65] = [
    // legs
    ("left_ankle", "left_knee", PALETTE_LEFT),
    ("left_knee", "left_hip", PALETTE_LEFT),
    ("right_ankle", "right_knee", PALETTE_RIGHT),
    ("right_knee", "right_hip", PALETTE_RIGHT),
    // torso
    ("left_hip", "right_hip", PALETTE_CENTER),
    ("left_shoulder", "left_hip", PALETTE_CENTER),
    ("right_shoulder", "right_hip", PALETTE_CENTER),
    ("left_shoulder", "right_shoulder", PALETTE_CENTER),
    // arms
    ("left_shoulder", "left_elbow", PALETTE_LEFT),
    ("right_shoulder", "right_elbow", PALETTE_RIGHT),
    ("left_elbow", "left_wrist", PALETTE_LEFT),
    ("right_elbow", "right_wrist", PALETTE_RIGHT),
    // head
    ("left_eye", "right_eye", PALETTE_CENTER),
    ("nose", "left_eye", PALETTE_CENTER),
    ("nose", "right_eye", PALETTE_CENTER),
    ("left_eye", "left_ear", PALETTE_CENTER),
    ("right_eye", "right_ear", PALETTE_CENTER),
    ("left_ear", "left_shoulder", PALETTE_CENTER),
    ("right_ear", "right_shoulder", PALETTE_CENTER),
    // feet
    ("left_ankle", "left_big_toe", PALETTE_LEFT),
    ("left_ankle", "left_small_toe", PALETTE_LEFT),
    ("left_ankle", "left_heel", PALETTE_LEFT),
    ("right_ankle", "right_big_toe", PALETTE_RIGHT),
    ("right_ankle", "right_small_toe", PALETTE_RIGHT),
    ("right_ankle", "right_heel", PALETTE_RIGHT),
    // left hand
    ("left_hand_root", "left_thumb1", PALETTE_RIGHT),
    ("left_thumb1", "left_thumb2", PALETTE_RIGHT),
    ("left_thumb2", "left_thumb3", PALETTE_RIGHT),
    ("left_thumb3", "left_thumb4", PALETTE_RIGHT),
    ("left_hand_root", "left_forefinger1", PALETTE_FOREFINGER),
    ("left_forefinger1", "left_forefinger2", PALETTE_FOREFINGER),
    ("left_forefinger2", "left_forefinger3", PALETTE_FOREFINGER),
    ("left_forefinger3", "left_forefinger4", PALETTE_FOREFINGER),
    ("left_hand_root", "left_middle_finger1", PALETTE_MIDDLE),
    ("left_middle_finger1", "left_middle_finger2", PALETTE_MIDDLE),
    ("left_middle_finger2", "left_middle_finger3", PALETTE_MIDDLE),
    ("left_middle_finger3", "left_middle_finger4", PALETTE_MIDDLE),
    ("left_hand_root", "left_ring_finger1", PALETTE_RING),
    ("left_ring_finger1", "left_ring_finger2", PALETTE_RING),
    ("left_ring_finger2", "left_ring_finger3", PALETTE_RING),
    ("left_ring_finger3", "left_ring_finger4", PALETTE_RING),
    ("left_hand_root", "left_pinky_finger1", PALETTE_LEFT),
    ("left_pinky_finger1", "left_pinky_finger2", PALETTE_LEFT),
    ("left_pinky_finger2", "left_pinky_finger3", PALETTE_LEFT),
    ("left_pinky_finger3", "left_pinky_finger4", PALETTE_LEFT),
    // right hand
    ("right_hand_root", "right_thumb1", PALETTE_RIGHT),
    ("right_thumb1", "right_thumb2", PALETTE_RIGHT),
    ("right_thumb2", "right_thumb3", PALETTE_RIGHT),
    ("right_thumb3", "right_thumb4", PALETTE_RIGHT),
    ("right_hand_root", "right_forefinger1", PALETTE_FOREFINGER),
    ("right_forefinger1", "right_forefinger2", PALETTE_FOREFINGER),
    ("right_forefinger2", "right_forefinger3", PALETTE_FOREFINGER),
    ("right_forefinger3", "right_forefinger4", PALETTE_FOREFINGER),
    ("right_hand_root", "right_middle_finger1", PALETTE_MIDDLE),
    ("right_middle_finger1", "right_middle_finger2", PALETTE_MIDDLE),
    ("right_middle_finger2", "right_middle_finger3", PALETTE_MIDDLE),
    ("right_middle_finger3", "right_middle_finger4", PALETTE_MIDDLE),
    ("right_hand_root", "right_ring_finger1", PALETTE_RING),
    ("right_ring_finger1", "right_ring_finger2", PALETTE_RING),
    ("right_ring_finger2", "right_ring_finger3", PALETTE_RING),
    ("right_ring_finger3", "right_ring_finger4", PALETTE_RING),
    ("right_hand_root", "right_pinky_finger1", PALETTE_LEFT),
    ("right_pinky_finger1", "right_pinky_finger2", PALETTE_LEFT),
    ("right_pinky_finger2", "right_pinky_finger3", PALETTE_LEFT),
    ("right_pinky_finger3", "right_pinky_finger4", PALETTE_LEFT),
];

/// Build the full edge list for the skeleton overlay.
///
/// The result is deterministic: anatomical links in authored order,
/// followed by the generated face mesh when `include_face_mesh` is set.
///
/// # Errors
///
/// Returns [`crate::OverlayError::UnknownJointName`] if an authored link
/// references a name absent from the registry. This is an integrity
/// check on the authored table, not a runtime condition.
pub fn build_topology(include_face_mesh: bool) -> Result<Vec<Edge>> {
    let mut edges = Vec::with_capacity(
        ANATOMICAL_EDGE_COUNT + if include_face_mesh { FACE_EDGE_COUNT } else { 0 },
    );
    for &(a, b, color) in &SKELETON_LINKS {
        edges.push(Edge {
            a: name_to_index(a)?,
            b: name_to_index(b)?,
            color: Color::from_pose_index(color),
        });
    }
    if include_face_mesh {
        edges.extend(face_mesh_edges());
    }
    Ok(edges)
}

/// Memoized accessor for the edge list.
///
/// The two variants (with and without the face mesh) are each built once
/// per process and shared across all detections.
///
/// # Errors
///
/// Propagates [`crate::OverlayError::UnknownJointName`] from the first
/// build; see [`build_topology`].
pub fn topology(include_face_mesh: bool) -> Result<&'static [Edge]> {
    static ANATOMICAL: OnceLock<Vec<Edge>> = OnceLock::new();
    static WITH_FACE_MESH: OnceLock<Vec<Edge>> = OnceLock::new();

    let cell = if include_face_mesh {
        &WITH_FACE_MESH
    } else {
        &ANATOMICAL
    };
    if let Some(edges) = cell.get() {
        return Ok(edges.as_slice());
    }
    let built = build_topology(include_face_mesh)?;
    Ok(cell.get_or_init(|| built))
}

/// Generate the 68-point face mesh over canonical indices.
///
/// Open chains connect i to i+1 over the jaw line, both eyebrows, the
/// nose bridge, and the nostrils; the eyes and both lip contours close
/// back to their first point.
fn face_mesh_edges() -> Vec<Edge> {
    let color = Color::from_pose_index(PALETTE_FACE_MESH);
    let mut edges = Vec::with_capacity(FACE_EDGE_COUNT);
    let mut chain = |start: usize, end: usize, close: bool| {
        for i in start..end {
            edges.push(Edge {
                a: FACE_OFFSET + i,
                b: FACE_OFFSET + i + 1,
                color,
            });
        }
        if close {
            edges.push(Edge {
                a: FACE_OFFSET + end,
                b: FACE_OFFSET + start,
                color,
            });
        }
    };
    chain(0, 16, false); // jaw line
    chain(17, 21, false); // right eyebrow
    chain(22, 26, false); // left eyebrow
    chain(27, 30, false); // nose bridge
    chain(31, 35, false); // nostrils
    chain(36, 41, true); // right eye
    chain(42, 47, true); // left eye
    chain(48, 59, true); // outer lip
    chain(60, 67, true); // inner lip
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KEYPOINT_COUNT;

    #[test]
    fn test_anatomical_only() {
        let edges = build_topology(false).unwrap();
        assert_eq!(edges.len(), ANATOMICAL_EDGE_COUNT);
        assert!(edges.iter().all(|e| e.a < 23 || e.a >= 91));
    }

    #[test]
    fn test_face_mesh_count() {
        let edges = build_topology(true).unwrap();
        assert_eq!(edges.len(), ANATOMICAL_EDGE_COUNT + FACE_EDGE_COUNT);
        // 16 jaw + 4 + 4 brows + 3 bridge + 4 nostrils + 6 + 6 eyes + 12 + 8 lips
        assert_eq!(FACE_EDGE_COUNT, 16 + 4 + 4 + 3 + 4 + 6 + 6 + 12 + 8);
    }

    #[test]
    fn test_edges_valid() {
        for edge in build_topology(true).unwrap() {
            assert_ne!(edge.a, edge.b);
            assert!(edge.a < KEYPOINT_COUNT);
            assert!(edge.b < KEYPOINT_COUNT);
        }
    }

    #[test]
    fn test_face_edges_span_face_range() {
        let edges = build_topology(true).unwrap();
        let face = &edges[ANATOMICAL_EDGE_COUNT..];
        assert!(face.iter().all(|e| (23..=90).contains(&e.a)));
        assert!(face.iter().all(|e| (23..=90).contains(&e.b)));
        // Eye loops close back to their first point.
        assert!(face.contains(&Edge {
            a: 23 + 41,
            b: 23 + 36,
            color: Color::from_pose_index(PALETTE_FACE_MESH),
        }));
    }

    #[test]
    fn test_deterministic_and_memoized() {
        assert_eq!(build_topology(true).unwrap(), build_topology(true).unwrap());
        let a = topology(false).unwrap();
        let b = topology(false).unwrap();
        assert_eq!(a.as_ptr(), b.as_ptr());
        assert_eq!(a.len(), ANATOMICAL_EDGE_COUNT);
    }
}
