// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

/// Color type for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Red color.
    pub const RED: Color = Color(255, 0, 0);
    /// Green color.
    pub const GREEN: Color = Color(0, 255, 0);
    /// Blue color.
    pub const BLUE: Color = Color(0, 0, 255);
    /// White color.
    pub const WHITE: Color = Color(255, 255, 255);
    /// Black color.
    pub const BLACK: Color = Color(0, 0, 0);

    /// Create a new color from RGB values.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// Get a color from the pose palette by index.
    pub fn from_pose_index(index: usize) -> Self {
        let color = POSE_COLORS[index % POSE_COLORS.len()];
        Self(color[0], color[1], color[2])
    }

    /// Convert to an `image::Rgb` pixel.
    pub fn rgb(self) -> image::Rgb<u8> {
        image::Rgb([self.0, self.1, self.2])
    }
}

/// Ultralytics Pose Color Palette
pub const POSE_COLORS: [[u8; 3]; 20] = [
    [255, 128, 0],   // #ff8000
    [255, 153, 51],  // #ff9933
    [255, 178, 102], // #ffb266
    [230, 230, 0],   // #e6e600
    [255, 153, 255], // #ff99ff
    [153, 204, 255], // #99ccff
    [255, 102, 255], // #ff66ff
    [255, 51, 255],  // #ff33ff
    [102, 178, 255], // #66b2ff
    [51, 153, 255],  // #3399ff
    [255, 153, 153], // #ff9999
    [255, 102, 102], // #ff6666
    [255, 51, 51],   // #ff3333
    [153, 255, 153], // #99ff99
    [102, 255, 102], // #66ff66
    [51, 255, 51],   // #33ff33
    [0, 255, 0],     // #00ff00
    [0, 0, 255],     // #0000ff
    [255, 0, 0],     // #ff0000
    [255, 255, 255], // #ffffff
];

/// Palette index for right-side limbs, feet, and thumbs (orange).
pub const PALETTE_RIGHT: usize = 0;
/// Palette index for forefingers (pink).
pub const PALETTE_FOREFINGER: usize = 4;
/// Palette index for the face mesh (magenta).
pub const PALETTE_FACE_MESH: usize = 6;
/// Palette index for middle fingers (light blue).
pub const PALETTE_MIDDLE: usize = 8;
/// Palette index for central/head points (blue).
pub const PALETTE_CENTER: usize = 9;
/// Palette index for ring fingers (red).
pub const PALETTE_RING: usize = 12;
/// Palette index for left-side limbs and pinkies (green).
pub const PALETTE_LEFT: usize = 16;
/// Palette index for face points and hand roots (white).
pub const PALETTE_NEUTRAL: usize = 19;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pose_index_wraps() {
        assert_eq!(Color::from_pose_index(0), Color::from_pose_index(20));
    }

    #[test]
    fn test_palette_groups() {
        assert_eq!(Color::from_pose_index(PALETTE_LEFT), Color::GREEN);
        assert_eq!(Color::from_pose_index(PALETTE_NEUTRAL), Color::WHITE);
        assert_eq!(Color::from_pose_index(PALETTE_RIGHT), Color(255, 128, 0));
        assert_eq!(Color::from_pose_index(PALETTE_CENTER), Color(51, 153, 255));
    }
}
