// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Canonical whole-body keypoint registry.
//!
//! Fixed name/index/color tables for the 133-point whole-body layout:
//! indices 0-4 head, 5-16 body limbs, 17-22 feet, 23-90 face
//! (`face-0`..`face-67`), 91-111 left hand, 112-132 right hand.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{OverlayError, Result};
use crate::visualizer::color::{
    Color, PALETTE_CENTER, PALETTE_FOREFINGER, PALETTE_LEFT, PALETTE_MIDDLE, PALETTE_NEUTRAL,
    PALETTE_RIGHT, PALETTE_RING,
};

/// Fixed number of canonical whole-body keypoints.
pub const KEYPOINT_COUNT: usize = 133;

/// Canonical joint names, indexed by canonical joint index.
pub const KEYPOINT_NAMES: [&str; KEYPOINT_COUNT] = [
    // 0-4: head
    "nose",
    "left_eye",
    "right_eye",
    "left_ear",
    "right_ear",
    // 5-16: body limbs
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
    // 17-22: feet
    "left_big_toe",
    "left_small_toe",
    "left_heel",
    "right_big_toe",
    "right_small_toe",
    "right_heel",
    // 23-90: face
    "face-0", "face-1", "face-2", "face-3", "face-4", "face-5", "face-6", "face-7", "face-8",
    "face-9", "face-10", "face-11", "face-12", "face-13", "face-14", "face-15", "face-16",
    "face-17", "face-18", "face-19", "face-20", "face-21", "face-22", "face-23", "face-24",
    "face-25", "face-26", "face-27", "face-28", "face-29", "face-30", "face-31", "face-32",
    "face-33", "face-34", "face-35", "face-36", "face-37", "face-38", "face-39", "face-40",
    "face-41", "face-42", "face-43", "face-44", "face-45", "face-46", "face-47", "face-48",
    "face-49", "face-50", "face-51", "face-52", "face-53", "face-54", "face-55", "face-56",
    "face-57", "face-58", "face-59", "face-60", "face-61", "face-62", "face-63", "face-64",
    "face-65", "face-66", "face-67",
    // 91-111: left hand (root + 4 joints per finger)
    "left_hand_root",
    "left_thumb1", "left_thumb2", "left_thumb3", "left_thumb4",
    "left_forefinger1", "left_forefinger2", "left_forefinger3", "left_forefinger4",
    "left_middle_finger1", "left_middle_finger2", "left_middle_finger3", "left_middle_finger4",
    "left_ring_finger1", "left_ring_finger2", "left_ring_finger3", "left_ring_finger4",
    "left_pinky_finger1", "left_pinky_finger2", "left_pinky_finger3", "left_pinky_finger4",
    // 112-132: right hand (same layout)
    "right_hand_root",
    "right_thumb1", "right_thumb2", "right_thumb3", "right_thumb4",
    "right_forefinger1", "right_forefinger2", "right_forefinger3", "right_forefinger4",
    "right_middle_finger1", "right_middle_finger2", "right_middle_finger3", "right_middle_finger4",
    "right_ring_finger1", "right_ring_finger2", "right_ring_finger3", "right_ring_finger4",
    "right_pinky_finger1", "right_pinky_finger2", "right_pinky_finger3", "right_pinky_finger4",
];

/// Keypoint color indices mapping to `POSE_COLORS`.
///
/// Left-side limbs are green, right-side limbs and feet orange, central
/// and face points neutral families, and each of the five fingers keeps
/// one fixed color across both hands.
pub const KPT_COLOR_INDICES: [usize; KEYPOINT_COUNT] = {
    let mut indices = [PALETTE_NEUTRAL; KEYPOINT_COUNT];
    // 0-4: head
    let mut i = 0;
    while i < 5 {
        indices[i] = PALETTE_CENTER;
        i += 1;
    }
    // 5-16: limbs alternate left/right
    while i < 17 {
        indices[i] = if i % 2 == 1 { PALETTE_LEFT } else { PALETTE_RIGHT };
        i += 1;
    }
    // 17-22: feet
    while i < 23 {
        indices[i] = PALETTE_RIGHT;
        i += 1;
    }
    // 23-90: face stays neutral
    // 91-132: hands, root neutral then five fingers of four joints each
    let fingers = [
        PALETTE_RIGHT,
        PALETTE_FOREFINGER,
        PALETTE_MIDDLE,
        PALETTE_RING,
        PALETTE_LEFT,
    ];
    let mut hand = 0;
    while hand < 2 {
        let root = 91 + hand * 21;
        indices[root] = PALETTE_NEUTRAL;
        let mut finger = 0;
        while finger < 5 {
            let mut joint = 0;
            while joint < 4 {
                indices[root + 1 + finger * 4 + joint] = fingers[finger];
                joint += 1;
            }
            finger += 1;
        }
        hand += 1;
    }
    indices
};

/// Look up the canonical index for a joint name.
///
/// # Arguments
///
/// * `name` - Canonical joint name, e.g. `"left_wrist"` or `"face-30"`.
///
/// # Errors
///
/// Returns [`OverlayError::UnknownJointName`] if the name is not in the
/// registry.
pub fn name_to_index(name: &str) -> Result<usize> {
    static INDEX: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();
    let index = INDEX.get_or_init(|| {
        KEYPOINT_NAMES
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, i))
            .collect()
    });
    index
        .get(name)
        .copied()
        .ok_or_else(|| OverlayError::UnknownJointName(name.to_string()))
}

/// Look up the canonical name for a joint index.
///
/// # Errors
///
/// Returns [`OverlayError::IndexOutOfRange`] if `index` is not in
/// `0..KEYPOINT_COUNT`.
pub fn name_of(index: usize) -> Result<&'static str> {
    KEYPOINT_NAMES
        .get(index)
        .copied()
        .ok_or(OverlayError::IndexOutOfRange(index))
}

/// Look up the marker color for a joint index.
///
/// # Errors
///
/// Returns [`OverlayError::IndexOutOfRange`] if `index` is not in
/// `0..KEYPOINT_COUNT`.
pub fn color_of(index: usize) -> Result<Color> {
    KPT_COLOR_INDICES
        .get(index)
        .map(|&c| Color::from_pose_index(c))
        .ok_or(OverlayError::IndexOutOfRange(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_index_round_trip() {
        for i in 0..KEYPOINT_COUNT {
            let name = name_of(i).unwrap();
            assert_eq!(name_to_index(name).unwrap(), i, "round trip failed at {i}");
        }
    }

    #[test]
    fn test_names_unique() {
        let mut seen = std::collections::HashSet::new();
        for name in KEYPOINT_NAMES {
            assert!(seen.insert(name), "duplicate joint name {name}");
        }
    }

    #[test]
    fn test_layout_anchors() {
        assert_eq!(name_to_index("nose").unwrap(), 0);
        assert_eq!(name_to_index("right_ankle").unwrap(), 16);
        assert_eq!(name_to_index("right_heel").unwrap(), 22);
        assert_eq!(name_to_index("face-0").unwrap(), 23);
        assert_eq!(name_to_index("face-67").unwrap(), 90);
        assert_eq!(name_to_index("left_hand_root").unwrap(), 91);
        assert_eq!(name_to_index("right_hand_root").unwrap(), 112);
        assert_eq!(name_to_index("right_pinky_finger4").unwrap(), 132);
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            name_to_index("left_flipper"),
            Err(OverlayError::UnknownJointName(_))
        ));
    }

    #[test]
    fn test_color_groups() {
        // Limbs: left green, right orange.
        assert_eq!(color_of(5).unwrap(), Color::GREEN);
        assert_eq!(color_of(6).unwrap(), Color(255, 128, 0));
        // Face points are neutral.
        assert_eq!(color_of(23).unwrap(), Color::WHITE);
        assert_eq!(color_of(90).unwrap(), Color::WHITE);
        // Each finger shares its color across both hands.
        for offset in 0..4 {
            assert_eq!(
                color_of(96 + offset).unwrap(),
                color_of(117 + offset).unwrap()
            );
        }
        assert!(matches!(
            color_of(KEYPOINT_COUNT),
            Err(OverlayError::IndexOutOfRange(_))
        ));
    }
}
