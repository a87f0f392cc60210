// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Detection data for a single image.
//!
//! Detections arrive pre-computed from the gallery collaborator, one per
//! detected person, with normalized coordinates that are independent of
//! the displayed resolution. They are immutable once constructed and
//! discarded wholesale when the image selection changes.

use std::collections::HashSet;

use ndarray::Array2;

use crate::error::{OverlayError, Result};
use crate::schema::KEYPOINT_COUNT;

/// Normalized bounding box with origin and size in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Left edge, fraction of image width.
    pub x: f32,
    /// Top edge, fraction of image height.
    pub y: f32,
    /// Width, fraction of image width.
    pub w: f32,
    /// Height, fraction of image height.
    pub h: f32,
}

impl BoundingBox {
    /// Create a new bounding box from normalized `(x, y, w, h)`.
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether a normalized point lies inside this box.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

/// One person's pose annotation for a single image.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Index of this pose within its image.
    pub pose_index: usize,
    /// Normalized bounding box.
    pub bbox: BoundingBox,
    /// Keypoint coordinates with shape (K, 2), normalized to `[0, 1]`.
    pub keypoints: Array2<f32>,
    /// Canonical indices of joints the detector marked invalid.
    pub invalid: HashSet<usize>,
}

impl Detection {
    /// Create a detection from per-axis coordinate slices.
    ///
    /// # Arguments
    ///
    /// * `pose_index` - Index of this pose within its image.
    /// * `bbox` - Normalized bounding box.
    /// * `xs` - Normalized x coordinates, one per joint.
    /// * `ys` - Normalized y coordinates, one per joint.
    /// * `invalid` - Canonical indices of invalid joints.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::AnnotationError`] if `xs` and `ys`
    /// disagree in length. The joint count itself is not checked here;
    /// a count other than the registry's is caught per pose at render
    /// time as a schema mismatch.
    pub fn new(
        pose_index: usize,
        bbox: BoundingBox,
        xs: &[f32],
        ys: &[f32],
        invalid: HashSet<usize>,
    ) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(OverlayError::AnnotationError(format!(
                "pose {pose_index}: {} x coordinates but {} y coordinates",
                xs.len(),
                ys.len()
            )));
        }
        let keypoints = Array2::from_shape_fn((xs.len(), 2), |(i, axis)| {
            if axis == 0 { xs[i] } else { ys[i] }
        });
        Ok(Self {
            pose_index,
            bbox,
            keypoints,
            invalid,
        })
    }

    /// Number of joints this detection carries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keypoints.shape()[0]
    }

    /// Whether the detection carries no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}

/// Read-only view of one [`Detection`] with per-joint queries.
///
/// Construction checks the detection against the registry's fixed joint
/// count, so downstream joint queries over `0..KEYPOINT_COUNT` cannot
/// go out of bounds.
#[derive(Debug, Clone, Copy)]
pub struct Pose<'a> {
    detection: &'a Detection,
}

impl<'a> Pose<'a> {
    /// Wrap a detection, verifying its joint count.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::SchemaMismatch`] if the detection does
    /// not carry exactly [`KEYPOINT_COUNT`] joints.
    pub fn new(detection: &'a Detection) -> Result<Self> {
        if detection.len() != KEYPOINT_COUNT {
            return Err(OverlayError::SchemaMismatch {
                pose_index: detection.pose_index,
                expected: KEYPOINT_COUNT,
                actual: detection.len(),
            });
        }
        Ok(Self { detection })
    }

    /// The wrapped detection.
    #[must_use]
    pub const fn detection(&self) -> &'a Detection {
        self.detection
    }

    /// Normalized position of a joint.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::IndexOutOfRange`] if `index` is not in
    /// `0..KEYPOINT_COUNT`.
    pub fn position(&self, index: usize) -> Result<(f32, f32)> {
        if index >= KEYPOINT_COUNT {
            return Err(OverlayError::IndexOutOfRange(index));
        }
        Ok(self.xy(index))
    }

    /// Whether a joint is valid for this detection.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::IndexOutOfRange`] if `index` is not in
    /// `0..KEYPOINT_COUNT`.
    pub fn is_valid(&self, index: usize) -> Result<bool> {
        if index >= KEYPOINT_COUNT {
            return Err(OverlayError::IndexOutOfRange(index));
        }
        Ok(self.valid(index))
    }

    /// Position lookup for indices already known to be canonical.
    pub(crate) fn xy(&self, index: usize) -> (f32, f32) {
        (
            self.detection.keypoints[[index, 0]],
            self.detection.keypoints[[index, 1]],
        )
    }

    /// Validity lookup for indices already known to be canonical.
    pub(crate) fn valid(&self, index: usize) -> bool {
        !self.detection.invalid.contains(&index)
    }
}

/// Thumbnail and full-resolution sources for one reviewed image.
///
/// Both URLs must depict the same content at the same aspect ratio;
/// normalized detection coordinates apply to either.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePair {
    /// Reduced-size source used by the preview grid.
    pub thumbnail_url: String,
    /// Full-resolution source used by the detail view.
    pub full_resolution_url: String,
    /// Pixel width of the full-resolution image.
    pub pixel_width: u32,
    /// Pixel height of the full-resolution image.
    pub pixel_height: u32,
}

impl ImagePair {
    /// Height over width of the depicted content.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.pixel_height as f32 / self.pixel_width as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_detection() -> Detection {
        let coords: Vec<f32> = (0..KEYPOINT_COUNT).map(|i| i as f32 / 200.0).collect();
        Detection::new(
            0,
            BoundingBox::new(0.1, 0.2, 0.5, 0.6),
            &coords,
            &coords,
            HashSet::from([5]),
        )
        .unwrap()
    }

    #[test]
    fn test_pose_queries() {
        let det = full_detection();
        let pose = Pose::new(&det).unwrap();
        assert_eq!(pose.position(0).unwrap(), (0.0, 0.0));
        assert!((pose.position(10).unwrap().0 - 0.05).abs() < 1e-6);
        assert!(!pose.is_valid(5).unwrap());
        assert!(pose.is_valid(6).unwrap());
    }

    #[test]
    fn test_index_out_of_range() {
        let det = full_detection();
        let pose = Pose::new(&det).unwrap();
        assert!(matches!(
            pose.position(KEYPOINT_COUNT),
            Err(OverlayError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            pose.is_valid(500),
            Err(OverlayError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn test_schema_mismatch() {
        let coords = [0.5_f32; 17];
        let det = Detection::new(
            3,
            BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            &coords,
            &coords,
            HashSet::new(),
        )
        .unwrap();
        match Pose::new(&det) {
            Err(OverlayError::SchemaMismatch {
                pose_index,
                expected,
                actual,
            }) => {
                assert_eq!(pose_index, 3);
                assert_eq!(expected, KEYPOINT_COUNT);
                assert_eq!(actual, 17);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_coordinate_length_disagreement() {
        let xs = [0.5_f32; 133];
        let ys = [0.5_f32; 132];
        assert!(matches!(
            Detection::new(0, BoundingBox::new(0.0, 0.0, 1.0, 1.0), &xs, &ys, HashSet::new()),
            Err(OverlayError::AnnotationError(_))
        ));
    }

    #[test]
    fn test_bbox_contains() {
        let bbox = BoundingBox::new(0.25, 0.25, 0.5, 0.5);
        assert!(bbox.contains(0.5, 0.5));
        assert!(!bbox.contains(0.1, 0.5));
    }

    #[test]
    fn test_aspect_ratio() {
        let pair = ImagePair {
            thumbnail_url: "thumb.jpg".to_string(),
            full_resolution_url: "full.jpg".to_string(),
            pixel_width: 1200,
            pixel_height: 800,
        };
        assert!((pair.aspect_ratio() - 800.0 / 1200.0).abs() < f32::EPSILON);
    }
}
