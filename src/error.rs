// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the overlay library.

use std::fmt;

/// Result type alias for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Main error type for the overlay library.
#[derive(Debug)]
pub enum OverlayError {
    /// A skeleton link references a joint name absent from the registry.
    UnknownJointName(String),
    /// A detection's keypoint count does not match the registry's fixed count.
    SchemaMismatch {
        /// Index of the offending pose within its image.
        pose_index: usize,
        /// The registry's fixed joint count.
        expected: usize,
        /// The joint count the detection actually carried.
        actual: usize,
    },
    /// A joint query used an index outside the canonical range.
    IndexOutOfRange(usize),
    /// Error parsing a pose annotation file.
    AnnotationError(String),
    /// Error processing images.
    ImageError(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// IO error (file not found, permission denied, etc.).
    IoError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
    /// Visualizer error.
    VisualizerError(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownJointName(name) => write!(f, "Unknown joint name: {name}"),
            Self::SchemaMismatch {
                pose_index,
                expected,
                actual,
            } => write!(
                f,
                "Schema mismatch in pose {pose_index}: expected {expected} keypoints, got {actual}"
            ),
            Self::IndexOutOfRange(index) => write!(f, "Joint index out of range: {index}"),
            Self::AnnotationError(msg) => write!(f, "Annotation error: {msg}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::IoError(msg) => write!(f, "IO error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::VisualizerError(msg) => write!(f, "Visualizer error: {msg}"),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OverlayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for OverlayError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OverlayError::UnknownJointName("left_flipper".to_string());
        assert_eq!(err.to_string(), "Unknown joint name: left_flipper");

        let err = OverlayError::SchemaMismatch {
            pose_index: 2,
            expected: 133,
            actual: 17,
        };
        assert_eq!(
            err.to_string(),
            "Schema mismatch in pose 2: expected 133 keypoints, got 17"
        );

        let err = OverlayError::IndexOutOfRange(200);
        assert_eq!(err.to_string(), "Joint index out of range: 200");
    }
}
