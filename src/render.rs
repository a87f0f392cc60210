// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Overlay renderer.
//!
//! Pure function from detections, topology, hover focus, and viewport
//! scale to a draw list in image-pixel space. The drawing surface scales
//! that space to fit its display area; stroke widths are declared
//! scale-invariant, while joint-marker radii are coupled to zoom so
//! markers grow as the reviewer zooms in.

use crate::detection::{Detection, Pose};
use crate::error::Result;
use crate::hover::Focus;
use crate::schema::{KEYPOINT_COUNT, KEYPOINT_NAMES, KPT_COLOR_INDICES};
use crate::topology::{Edge, topology};
use crate::visualizer::color::Color;

/// Default joint marker radius in image pixels.
pub const DEFAULT_BASE_RADIUS: f32 = 2.2;
/// Radius factor applied to the focused joint marker.
pub const HOVER_RADIUS_FACTOR: f32 = 1.9;

/// Edge stroke width, normal and pose-hovered.
const EDGE_WIDTH: (f32, f32) = (2.0, 3.0);
/// Edge stroke opacity, normal and pose-hovered.
const EDGE_OPACITY: (f32, f32) = (0.75, 0.95);
/// Joint marker opacity, normal and pose-hovered.
const JOINT_OPACITY: (f32, f32) = (0.95, 1.0);
/// Joint outline width, normal and joint-focused.
const JOINT_OUTLINE_WIDTH: (f32, f32) = (0.5, 0.9);
/// Bounding box stroke width, normal and pose-hovered.
const BBOX_WIDTH: (f32, f32) = (1.5, 2.5);
/// Bounding box dash pattern (on, off).
const BBOX_DASH: (f32, f32) = (6.0, 4.0);
/// Bounding box stroke color, normal and pose-hovered.
const BBOX_COLOR: Color = Color(0, 255, 136);
const BBOX_COLOR_HOVER: Color = Color(0, 224, 255);
/// Label anchor offset from the joint marker, in image pixels.
const LABEL_OFFSET: (f32, f32) = (6.0, -6.0);

/// Options controlling overlay rendering.
///
/// Uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use ultralytics_pose_overlay::RenderOptions;
///
/// let opts = RenderOptions::new()
///     .with_bbox(false)
///     .with_face_mesh(true)
///     .with_base_radius(3.0);
/// ```
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Whether to draw per-pose bounding boxes.
    pub show_bbox: bool,
    /// Whether the topology includes the generated face mesh.
    pub include_face_mesh: bool,
    /// Joint marker radius in image pixels, before zoom coupling.
    pub base_radius: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_bbox: true,
            include_face_mesh: true,
            base_radius: DEFAULT_BASE_RADIUS,
        }
    }
}

impl RenderOptions {
    /// Create options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether bounding boxes are drawn.
    #[must_use]
    pub const fn with_bbox(mut self, show: bool) -> Self {
        self.show_bbox = show;
        self
    }

    /// Set whether the face mesh is included in the topology.
    #[must_use]
    pub const fn with_face_mesh(mut self, include: bool) -> Self {
        self.include_face_mesh = include;
        self
    }

    /// Set the joint marker base radius.
    #[must_use]
    pub const fn with_base_radius(mut self, radius: f32) -> Self {
        self.base_radius = radius;
        self
    }
}

/// One primitive of the overlay draw list, in image-pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A skeleton edge segment.
    Line {
        /// First endpoint.
        from: (f32, f32),
        /// Second endpoint.
        to: (f32, f32),
        /// Stroke color.
        color: Color,
        /// Stroke width; scale-invariant on the surface.
        width: f32,
        /// Stroke opacity in `[0, 1]`.
        opacity: f32,
    },
    /// A hollow rectangle, optionally dashed.
    Rect {
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Width.
        w: f32,
        /// Height.
        h: f32,
        /// Stroke color.
        color: Color,
        /// Stroke width; scale-invariant on the surface.
        width: f32,
        /// Dash pattern (on, off) lengths, solid if `None`.
        dash: Option<(f32, f32)>,
    },
    /// A filled joint marker.
    Circle {
        /// Center position.
        center: (f32, f32),
        /// Radius; already zoom-coupled by the renderer.
        radius: f32,
        /// Fill color.
        fill: Color,
        /// Outline color.
        outline: Color,
        /// Outline width.
        outline_width: f32,
        /// Fill opacity in `[0, 1]`.
        opacity: f32,
    },
    /// A text label with an opaque background sized to the text.
    Label {
        /// Label text.
        text: String,
        /// Anchor position near the labeled point.
        anchor: (f32, f32),
        /// Text color.
        color: Color,
        /// Background fill color.
        background: Color,
    },
}

impl DrawCommand {
    fn translate_scaled(&self, scale: f32, dx: f32, dy: f32) -> Self {
        let map = |(x, y): (f32, f32)| (x * scale + dx, y * scale + dy);
        match self {
            Self::Line {
                from,
                to,
                color,
                width,
                opacity,
            } => Self::Line {
                from: map(*from),
                to: map(*to),
                color: *color,
                width: *width,
                opacity: *opacity,
            },
            Self::Rect {
                x,
                y,
                w,
                h,
                color,
                width,
                dash,
            } => {
                let (x, y) = map((*x, *y));
                Self::Rect {
                    x,
                    y,
                    w: w * scale,
                    h: h * scale,
                    color: *color,
                    width: *width,
                    dash: *dash,
                }
            }
            Self::Circle {
                center,
                radius,
                fill,
                outline,
                outline_width,
                opacity,
            } => Self::Circle {
                center: map(*center),
                radius: *radius,
                fill: *fill,
                outline: *outline,
                outline_width: *outline_width,
                opacity: *opacity,
            },
            Self::Label {
                text,
                anchor,
                color,
                background,
            } => Self::Label {
                text: text.clone(),
                anchor: map(*anchor),
                color: *color,
                background: *background,
            },
        }
    }
}

/// A detection that was skipped because its joint count did not match
/// the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Index of the skipped pose within its image.
    pub pose_index: usize,
    /// The registry's fixed joint count.
    pub expected: usize,
    /// The joint count the detection actually carried.
    pub actual: usize,
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawList {
    /// Draw commands in back-to-front order.
    pub commands: Vec<DrawCommand>,
    /// Detections skipped for joint-count mismatch; sibling detections
    /// still render.
    pub skipped: Vec<SchemaViolation>,
}

impl DrawList {
    /// Number of draw commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the draw list holds no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Map the list through the surface's display transform.
    ///
    /// Positions are scaled and offset; stroke widths, dash patterns,
    /// and marker radii are left untouched so strokes keep a constant
    /// apparent thickness and radii stay coupled to zoom only through
    /// the render call.
    #[must_use]
    pub fn transform(&self, scale: f32, dx: f32, dy: f32) -> Self {
        Self {
            commands: self
                .commands
                .iter()
                .map(|cmd| cmd.translate_scaled(scale, dx, dy))
                .collect(),
            skipped: self.skipped.clone(),
        }
    }
}

/// Render the overlay for one image.
///
/// Pure and idempotent: identical inputs always produce an identical
/// draw list. Geometry is emitted in image-pixel space
/// (`0..pixel_width`, `0..pixel_height`).
///
/// # Arguments
///
/// * `detections` - Poses detected in the image.
/// * `edges` - Skeleton topology, typically from [`topology`].
/// * `hover` - Current hover focus.
/// * `image_size` - Image pixel dimensions (width, height).
/// * `zoom_scale` - Current viewport zoom; multiplies marker radii only.
/// * `opts` - Rendering options.
#[must_use]
pub fn render(
    detections: &[Detection],
    edges: &[Edge],
    hover: Focus,
    image_size: (u32, u32),
    zoom_scale: f32,
    opts: &RenderOptions,
) -> DrawList {
    #[allow(clippy::cast_precision_loss)]
    let (width, height) = (image_size.0 as f32, image_size.1 as f32);
    let mut list = DrawList::default();

    for detection in detections {
        let Ok(pose) = Pose::new(detection) else {
            list.skipped.push(SchemaViolation {
                pose_index: detection.pose_index,
                expected: KEYPOINT_COUNT,
                actual: detection.len(),
            });
            continue;
        };
        let pose_hovered = hover.covers_pose(detection.pose_index);

        if opts.show_bbox {
            let bbox = detection.bbox;
            list.commands.push(DrawCommand::Rect {
                x: bbox.x * width,
                y: bbox.y * height,
                w: bbox.w * width,
                h: bbox.h * height,
                color: if pose_hovered {
                    BBOX_COLOR_HOVER
                } else {
                    BBOX_COLOR
                },
                width: pick(BBOX_WIDTH, pose_hovered),
                dash: Some(BBOX_DASH),
            });
        }

        // Skeleton edges. An edge with either endpoint invalid is
        // dropped entirely, never drawn as a partial segment.
        for edge in edges {
            if !(pose.valid(edge.a) && pose.valid(edge.b)) {
                continue;
            }
            let (ax, ay) = pose.xy(edge.a);
            let (bx, by) = pose.xy(edge.b);
            list.commands.push(DrawCommand::Line {
                from: (ax * width, ay * height),
                to: (bx * width, by * height),
                color: edge.color,
                width: pick(EDGE_WIDTH, pose_hovered),
                opacity: pick(EDGE_OPACITY, pose_hovered),
            });
        }

        // Joint markers on top of the edges.
        let focused_joint = hover.joint_on(detection.pose_index);
        for index in 0..KEYPOINT_COUNT {
            if !pose.valid(index) {
                continue;
            }
            let (x, y) = pose.xy(index);
            let focused = focused_joint == Some(index);
            let radius = opts.base_radius
                * zoom_scale
                * if focused { HOVER_RADIUS_FACTOR } else { 1.0 };
            list.commands.push(DrawCommand::Circle {
                center: (x * width, y * height),
                radius,
                fill: Color::from_pose_index(KPT_COLOR_INDICES[index]),
                outline: Color::BLACK,
                outline_width: pick(JOINT_OUTLINE_WIDTH, focused),
                opacity: pick(JOINT_OPACITY, pose_hovered),
            });
            if focused {
                list.commands.push(DrawCommand::Label {
                    text: format!("{}({index})", KEYPOINT_NAMES[index]),
                    anchor: (x * width + LABEL_OFFSET.0, y * height + LABEL_OFFSET.1),
                    color: Color::WHITE,
                    background: Color::BLACK,
                });
            }
        }
    }

    list
}

/// Render with the memoized topology selected by `opts`.
///
/// # Errors
///
/// Propagates a topology build failure; see [`topology`].
pub fn render_with_topology(
    detections: &[Detection],
    hover: Focus,
    image_size: (u32, u32),
    zoom_scale: f32,
    opts: &RenderOptions,
) -> Result<DrawList> {
    let edges = topology(opts.include_face_mesh)?;
    Ok(render(detections, edges, hover, image_size, zoom_scale, opts))
}

const fn pick(pair: (f32, f32), emphasized: bool) -> f32 {
    if emphasized { pair.1 } else { pair.0 }
}
