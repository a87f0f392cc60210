// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Loading pose annotations and review images from disk.
//!
//! Annotation files carry one JSON array of poses in the form the
//! dataset backend exports:
//!
//! ```json
//! [
//!   {
//!     "pose_index": 0,
//!     "bbox": [0.1, 0.2, 0.3, 0.4],
//!     "kpts_x": [0.5, ...],
//!     "kpts_y": [0.5, ...],
//!     "invalid_kpts_idx": [5, 70]
//!   }
//! ]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::DynamicImage;
use serde::Deserialize;

use crate::detection::{BoundingBox, Detection};
use crate::error::{OverlayError, Result};

/// One pose as serialized by the dataset backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPose {
    /// Index of this pose within its image.
    pub pose_index: usize,
    /// Normalized bounding box as `[x, y, w, h]`.
    pub bbox: [f32; 4],
    /// Normalized x coordinates, one per joint.
    pub kpts_x: Vec<f32>,
    /// Normalized y coordinates, one per joint.
    pub kpts_y: Vec<f32>,
    /// Canonical indices of invalid joints.
    #[serde(default)]
    pub invalid_kpts_idx: Vec<usize>,
}

impl RawPose {
    /// Convert into an immutable [`Detection`].
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::AnnotationError`] if the coordinate
    /// arrays disagree in length.
    pub fn into_detection(self) -> Result<Detection> {
        Detection::new(
            self.pose_index,
            BoundingBox::new(self.bbox[0], self.bbox[1], self.bbox[2], self.bbox[3]),
            &self.kpts_x,
            &self.kpts_y,
            self.invalid_kpts_idx.into_iter().collect(),
        )
    }
}

/// Load the detections for one image from an annotation file.
///
/// Joint counts are not validated here; a pose with the wrong count is
/// reported per pose at render time and does not block its siblings.
///
/// # Errors
///
/// Returns [`OverlayError::AnnotationError`] if the file is not valid
/// JSON of the expected shape or a pose's coordinate arrays disagree in
/// length, or an IO error if the file cannot be read.
pub fn load_detections<P: AsRef<Path>>(path: P) -> Result<Vec<Detection>> {
    let file = File::open(path.as_ref())?;
    let raw: Vec<RawPose> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| OverlayError::AnnotationError(e.to_string()))?;
    raw.into_iter().map(RawPose::into_detection).collect()
}

/// Load image helper to bypass zune-jpeg stride issues
pub fn load_image(path: &str) -> image::ImageResult<DynamicImage> {
    let path_obj = Path::new(path);
    let ext = path_obj
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    if let Some("jpg") | Some("jpeg") = ext.as_deref() {
        if let Ok(file) = File::open(path) {
            let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
            if let Ok(pixels) = decoder.decode() {
                if let Some(metadata) = decoder.info() {
                    let width = metadata.width as u32;
                    let height = metadata.height as u32;
                    match metadata.pixel_format {
                        jpeg_decoder::PixelFormat::RGB24 => {
                            if let Some(buffer) =
                                image::ImageBuffer::from_raw(width, height, pixels)
                            {
                                return Ok(DynamicImage::ImageRgb8(buffer));
                            }
                        }
                        jpeg_decoder::PixelFormat::L8 => {
                            if let Some(buffer) =
                                image::ImageBuffer::from_raw(width, height, pixels)
                            {
                                return Ok(DynamicImage::ImageLuma8(buffer));
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }
    // Fallback
    image::open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KEYPOINT_COUNT;

    fn raw_json(count: usize) -> String {
        let coords: Vec<String> = (0..count).map(|_| "0.5".to_string()).collect();
        format!(
            r#"[{{"pose_index": 0, "bbox": [0.1, 0.2, 0.3, 0.4], "kpts_x": [{c}], "kpts_y": [{c}], "invalid_kpts_idx": [5]}}]"#,
            c = coords.join(",")
        )
    }

    #[test]
    fn test_raw_pose_round_trip() {
        let raw: Vec<RawPose> = serde_json::from_str(&raw_json(KEYPOINT_COUNT)).unwrap();
        let detection = raw.into_iter().next().unwrap().into_detection().unwrap();
        assert_eq!(detection.len(), KEYPOINT_COUNT);
        assert!(detection.invalid.contains(&5));
        assert!((detection.bbox.w - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_indices_default_empty() {
        let json = r#"[{"pose_index": 1, "bbox": [0, 0, 1, 1], "kpts_x": [0.5], "kpts_y": [0.5]}]"#;
        let raw: Vec<RawPose> = serde_json::from_str(json).unwrap();
        let detection = raw.into_iter().next().unwrap().into_detection().unwrap();
        assert!(detection.invalid.is_empty());
        assert_eq!(detection.pose_index, 1);
    }

    #[test]
    fn test_mismatched_axes_rejected() {
        let json =
            r#"[{"pose_index": 0, "bbox": [0, 0, 1, 1], "kpts_x": [0.5, 0.6], "kpts_y": [0.5]}]"#;
        let raw: Vec<RawPose> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            raw.into_iter().next().unwrap().into_detection(),
            Err(OverlayError::AnnotationError(_))
        ));
    }
}
