// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Interactive detail view using minifb.
//!
//! Hosts the overlay engine: pointer movement drives the hover state
//! machine, the scroll wheel and left-button drag drive the viewport,
//! and every input change triggers a full synchronous re-render.

use image::{DynamicImage, RgbImage};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use crate::annotate::draw_list_mut;
use crate::detection::{Detection, Pose};
use crate::error::{OverlayError, Result};
use crate::hover::{Focus, HoverState};
use crate::render::{RenderOptions, render};
use crate::schema::KEYPOINT_COUNT;
use crate::topology::topology;
use crate::viewport::{Viewport, WHEEL_STEP};

/// Joint hit-test radius in display pixels.
const HIT_RADIUS: f32 = 6.0;

/// Pointer target: a pose group and optionally a joint marker inside it.
type HitTarget = Option<(usize, Option<usize>)>;

/// An interactive overlay window.
pub struct OverlayViewer {
    window: Window,
    width: usize,
    height: usize,
    buffer: Vec<u32>,
}

impl OverlayViewer {
    /// Create a new viewer window.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| OverlayError::VisualizerError(format!("Failed to create window: {}", e)))?;

        // Limit update rate
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));

        Ok(Self {
            window,
            width,
            height,
            buffer: Vec::new(),
        })
    }

    /// Run the interactive loop until the window closes.
    ///
    /// Scroll zooms, left-drag pans, Escape or Q quits. The overlay is
    /// re-rendered in full whenever hover, zoom, pan, or the window
    /// size changes; each pass is pure in its inputs, so superseded
    /// frames are simply discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the topology cannot be built or the window
    /// cannot be updated.
    #[allow(clippy::cast_precision_loss)]
    pub fn run(
        &mut self,
        image: &DynamicImage,
        detections: &[Detection],
        opts: &RenderOptions,
    ) -> Result<()> {
        let edges = topology(opts.include_face_mesh)?;
        let source = image.to_rgb8();
        let (img_w, img_h) = (source.width(), source.height());

        let mut hover = HoverState::new();
        let mut viewport = Viewport::detail();
        let mut last_focus = Focus::Idle;
        let mut last_mouse: Option<(f32, f32)> = None;
        let mut target: HitTarget = None;
        let mut dirty = true;

        while self.window.is_open()
            && !self.window.is_key_down(Key::Escape)
            && !self.window.is_key_down(Key::Q)
        {
            let (win_w, win_h) = self.window.get_size();
            if win_w != self.width || win_h != self.height {
                self.width = win_w;
                self.height = win_h;
                dirty = true;
            }

            if let Some((_, scroll_y)) = self.window.get_scroll_wheel() {
                if scroll_y.abs() > f32::EPSILON {
                    viewport.zoom_by(scroll_y.signum() * WHEEL_STEP);
                    dirty = true;
                }
            }

            let fit = (win_w as f32 / img_w as f32).min(win_h as f32 / img_h as f32);
            let scale = fit * viewport.scale();
            let state = viewport.state();
            let offset_x = (win_w as f32 - img_w as f32 * scale) / 2.0 + state.pan_x;
            let offset_y = (win_h as f32 - img_h as f32 * scale) / 2.0 + state.pan_y;

            let mouse = self.window.get_mouse_pos(MouseMode::Discard);
            if let (Some((mx, my)), Some((lx, ly))) = (mouse, last_mouse) {
                if self.window.get_mouse_down(MouseButton::Left)
                    && ((mx - lx).abs() > f32::EPSILON || (my - ly).abs() > f32::EPSILON)
                {
                    viewport.pan_by(mx - lx, my - ly);
                    dirty = true;
                }
            }
            last_mouse = mouse;

            if let Some((mx, my)) = mouse {
                let norm = (
                    (mx - offset_x) / scale / img_w as f32,
                    (my - offset_y) / scale / img_h as f32,
                );
                let next = hit_test(
                    detections,
                    norm,
                    HIT_RADIUS / scale,
                    (img_w as f32, img_h as f32),
                );
                dispatch(&mut hover, target, next);
                target = next;
            }
            if hover.focus() != last_focus {
                last_focus = hover.focus();
                dirty = true;
            }

            if dirty {
                let list = render(
                    detections,
                    edges,
                    hover.focus(),
                    (img_w, img_h),
                    viewport.scale(),
                    opts,
                )
                .transform(scale, offset_x, offset_y);
                self.redraw(&source, &list, scale, offset_x, offset_y)?;
                dirty = false;
            } else {
                self.window
                    .update_with_buffer(&self.buffer, self.width, self.height)
                    .map_err(|e| {
                        OverlayError::VisualizerError(format!("Failed to update window: {}", e))
                    })?;
            }
        }
        Ok(())
    }

    /// Resample the source into the window and rasterize the overlay.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn redraw(
        &mut self,
        source: &RgbImage,
        list: &crate::render::DrawList,
        scale: f32,
        offset_x: f32,
        offset_y: f32,
    ) -> Result<()> {
        let mut canvas = RgbImage::new(self.width as u32, self.height as u32);
        for (px, py, pixel) in canvas.enumerate_pixels_mut() {
            let sx = (px as f32 - offset_x) / scale;
            let sy = (py as f32 - offset_y) / scale;
            if sx >= 0.0 && sy >= 0.0 && sx < source.width() as f32 && sy < source.height() as f32 {
                *pixel = *source.get_pixel(sx as u32, sy as u32);
            }
        }
        draw_list_mut(&mut canvas, list);

        let num_pixels = self.width * self.height;
        if self.buffer.len() != num_pixels {
            self.buffer.resize(num_pixels, 0);
        }
        // Pack as 0x00RRGGBB
        for (i, pixel) in canvas.pixels().enumerate() {
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            self.buffer[i] = (r << 16) | (g << 8) | b;
        }

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| OverlayError::VisualizerError(format!("Failed to update window: {}", e)))
    }
}

/// Find what the pointer is over, in normalized image coordinates.
///
/// The nearest valid joint within `hit_radius` image pixels wins;
/// otherwise the first pose whose bounding box contains the point. A
/// joint hit counts as being inside its pose group.
fn hit_test(
    detections: &[Detection],
    norm: (f32, f32),
    hit_radius: f32,
    image_size: (f32, f32),
) -> HitTarget {
    let mut best: Option<(usize, usize, f32)> = None;
    for detection in detections {
        let Ok(pose) = Pose::new(detection) else {
            continue;
        };
        for index in 0..KEYPOINT_COUNT {
            if !pose.valid(index) {
                continue;
            }
            let (x, y) = pose.xy(index);
            let dx = (x - norm.0) * image_size.0;
            let dy = (y - norm.1) * image_size.1;
            let dist2 = dx * dx + dy * dy;
            if dist2 <= hit_radius * hit_radius
                && best.is_none_or(|(_, _, d)| dist2 < d)
            {
                best = Some((detection.pose_index, index, dist2));
            }
        }
    }
    if let Some((pose_index, joint, _)) = best {
        return Some((pose_index, Some(joint)));
    }
    detections
        .iter()
        .find(|d| d.bbox.contains(norm.0, norm.1))
        .map(|d| (d.pose_index, None))
}

/// Translate a hit-target change into hover state machine events.
fn dispatch(hover: &mut HoverState, prev: HitTarget, next: HitTarget) {
    if prev == next {
        return;
    }
    if let Some((pose, joint)) = prev {
        if let Some(joint) = joint {
            hover.on_joint_leave(pose, joint);
        }
        if next.map(|(p, _)| p) != Some(pose) {
            hover.on_pose_leave(pose);
        }
    }
    if let Some((pose, joint)) = next {
        if prev.map(|(p, _)| p) != Some(pose) {
            hover.on_pose_enter(pose);
        }
        if let Some(joint) = joint {
            hover.on_joint_enter(pose, joint);
        }
    }
}
