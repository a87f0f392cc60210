// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Raster backend: draws a [`DrawList`] onto an image.
//!
//! This is one concrete drawing surface for the renderer's output; the
//! draw list itself stays surface-agnostic. Label text uses the shared
//! Arial font, downloaded once into the config directory.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use ab_glyph::{FontRef, PxScale};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{
    draw_antialiased_line_segment_mut, draw_filled_circle_mut, draw_filled_rect_mut,
    draw_hollow_circle_mut, draw_text_mut, text_size,
};
use imageproc::pixelops::interpolate;
use imageproc::rect::Rect;

use crate::render::{DrawCommand, DrawList};
use crate::visualizer::color::Color;

/// Assets URL for downloading fonts
const ASSETS_URL: &str = "https://github.com/ultralytics/assets/releases/download/v0.0.0";

/// Label text height in pixels.
const LABEL_SCALE: f32 = 12.0;
/// Padding around label text inside its background.
const LABEL_PADDING: i32 = 3;

/// Find the next available run directory (view, view2, view3, etc.)
pub fn find_next_run_dir(base: &str, prefix: &str) -> String {
    let base_path = Path::new(base);

    // First try without number
    let first = base_path.join(prefix);
    if !first.exists() {
        return first.to_string_lossy().to_string();
    }

    // Try with incrementing numbers
    for i in 2.. {
        let numbered = base_path.join(format!("{prefix}{i}"));
        if !numbered.exists() {
            return numbered.to_string_lossy().to_string();
        }
    }

    // Fallback (should never reach here)
    base_path.join(prefix).to_string_lossy().to_string()
}

/// Check if font exists locally or download it
pub fn check_font(font: &str) -> Option<PathBuf> {
    let font_name = Path::new(font).file_name()?.to_string_lossy();
    let config_dir = dirs::config_dir()?.join("Ultralytics");
    let font_path = config_dir.join(font_name.as_ref());

    if font_path.exists() {
        return Some(font_path);
    }

    // Create config directory if it doesn't exist
    if let Err(e) = fs::create_dir_all(&config_dir) {
        eprintln!("Failed to create config directory: {e}");
        return None;
    }

    // Download font
    let url = format!("{ASSETS_URL}/{font_name}");
    println!("Downloading {url} to {}", font_path.display());

    match ureq::get(&url).call() {
        Ok(response) => {
            let mut file = match File::create(&font_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Failed to create font file: {e}");
                    return None;
                }
            };

            let mut reader = response.into_body().into_reader();
            if let Err(e) = io::copy(&mut reader, &mut file) {
                eprintln!("Failed to download font: {e}");
                // Try to remove partial file
                let _ = fs::remove_file(&font_path);
                return None;
            }

            Some(font_path)
        }
        Err(e) => {
            eprintln!("Failed to download font from {url}: {e}");
            None
        }
    }
}

/// Rasterize a draw list on top of an image.
///
/// Labels are skipped when no font is available; everything else still
/// draws.
pub fn annotate_image(image: &DynamicImage, list: &DrawList) -> DynamicImage {
    let mut img = image.to_rgb8();
    draw_list_mut(&mut img, list);
    DynamicImage::ImageRgb8(img)
}

/// Rasterize a draw list onto an RGB buffer in place.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_list_mut(img: &mut RgbImage, list: &DrawList) {
    let needs_font = list
        .commands
        .iter()
        .any(|command| matches!(command, DrawCommand::Label { .. }));
    let font_data = needs_font
        .then(|| check_font("Arial.ttf"))
        .flatten()
        .and_then(|path| {
            let mut file = File::open(path).ok()?;
            let mut buffer = Vec::new();
            file.read_to_end(&mut buffer).ok()?;
            Some(buffer)
        });
    let font = font_data
        .as_ref()
        .and_then(|data| FontRef::try_from_slice(data).ok());

    for command in &list.commands {
        match command {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
                opacity,
            } => draw_stroke(img, *from, *to, *color, *width, *opacity),
            DrawCommand::Rect {
                x,
                y,
                w,
                h,
                color,
                width,
                dash,
            } => draw_rect_outline(img, (*x, *y), (*w, *h), *color, *width, *dash),
            DrawCommand::Circle {
                center,
                radius,
                fill,
                outline,
                outline_width,
                ..
            } => {
                let c = (center.0.round() as i32, center.1.round() as i32);
                let r = radius.round().max(1.0) as i32;
                draw_filled_circle_mut(img, c, r, fill.rgb());
                draw_hollow_circle_mut(img, c, r, outline.rgb());
                if *outline_width > 0.7 {
                    draw_hollow_circle_mut(img, c, r + 1, outline.rgb());
                }
            }
            DrawCommand::Label {
                text,
                anchor,
                color,
                background,
            } => {
                if let Some(ref f) = font {
                    draw_label(img, text, *anchor, *color, *background, f);
                }
            }
        }
    }
}

/// Draw one stroked segment with approximate width and opacity.
#[allow(clippy::cast_possible_truncation)]
fn draw_stroke(
    img: &mut RgbImage,
    from: (f32, f32),
    to: (f32, f32),
    color: Color,
    width: f32,
    opacity: f32,
) {
    let start = (from.0.round() as i32, from.1.round() as i32);
    let end = (to.0.round() as i32, to.1.round() as i32);
    let pixel = color.rgb();
    let blend = |a: Rgb<u8>, b: Rgb<u8>, weight: f32| interpolate(a, b, weight * opacity);

    let passes = width.round().max(1.0) as i32;
    // Offset extra passes along the minor axis so the stroke thickens
    // roughly perpendicular to its direction.
    let shallow = (end.0 - start.0).abs() >= (end.1 - start.1).abs();
    for pass in 0..passes {
        let offset = pass - passes / 2;
        let (dx, dy) = if shallow { (0, offset) } else { (offset, 0) };
        draw_antialiased_line_segment_mut(
            img,
            (start.0 + dx, start.1 + dy),
            (end.0 + dx, end.1 + dy),
            pixel,
            blend,
        );
    }
}

/// Draw a hollow rectangle, dashed when a pattern is given.
fn draw_rect_outline(
    img: &mut RgbImage,
    origin: (f32, f32),
    size: (f32, f32),
    color: Color,
    width: f32,
    dash: Option<(f32, f32)>,
) {
    let (x, y) = origin;
    let (w, h) = size;
    let corners = [
        ((x, y), (x + w, y)),
        ((x + w, y), (x + w, y + h)),
        ((x + w, y + h), (x, y + h)),
        ((x, y + h), (x, y)),
    ];
    for (from, to) in corners {
        match dash {
            Some((on, off)) => draw_dashed_segment(img, from, to, color, width, on, off),
            None => draw_stroke(img, from, to, color, width, 1.0),
        }
    }
}

/// Draw one side of a dashed rectangle as alternating on/off runs.
fn draw_dashed_segment(
    img: &mut RgbImage,
    from: (f32, f32),
    to: (f32, f32),
    color: Color,
    width: f32,
    on: f32,
    off: f32,
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f32::EPSILON {
        return;
    }
    let (ux, uy) = (dx / length, dy / length);
    let mut distance = 0.0;
    while distance < length {
        let run_end = (distance + on).min(length);
        draw_stroke(
            img,
            (from.0 + ux * distance, from.1 + uy * distance),
            (from.0 + ux * run_end, from.1 + uy * run_end),
            color,
            width,
            1.0,
        );
        distance = run_end + off;
    }
}

/// Draw label text over an opaque background sized to the text.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn draw_label(
    img: &mut RgbImage,
    text: &str,
    anchor: (f32, f32),
    color: Color,
    background: Color,
    font: &FontRef<'_>,
) {
    let scale = PxScale::from(LABEL_SCALE);
    let (text_w, text_h) = text_size(scale, font, text);
    let text_x = anchor.0.round() as i32;
    let text_y = anchor.1.round() as i32 - text_h as i32;

    let rect = Rect::at(text_x - LABEL_PADDING, text_y - LABEL_PADDING).of_size(
        text_w + 2 * LABEL_PADDING as u32,
        text_h + 2 * LABEL_PADDING as u32,
    );
    draw_filled_rect_mut(img, rect, background.rgb());
    draw_text_mut(img, color.rgb(), text_x, text_y, scale, font, text);
}
