// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

#[cfg(feature = "annotate")]
use std::fs;
#[cfg(feature = "annotate")]
use std::path::Path;

#[cfg(feature = "annotate")]
use crate::annotate::{annotate_image, find_next_run_dir};
#[cfg(feature = "visualize")]
use crate::visualizer::OverlayViewer;

use image::GenericImageView;

use crate::cli::args::ViewArgs;
use crate::hover::Focus;
use crate::io::{load_detections, load_image};
use crate::render::{RenderOptions, render_with_topology};
use crate::{error, info, verbose, warn};

/// Render the overlay for one image per the CLI arguments.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn run_view(args: &ViewArgs) {
    crate::cli::logging::set_verbose(args.verbose);

    let image = match load_image(&args.source) {
        Ok(image) => image,
        Err(e) => {
            error!("Failed to load image '{}': {e}", args.source);
            process::exit(1);
        }
    };
    let detections = match load_detections(&args.poses) {
        Ok(detections) => detections,
        Err(e) => {
            error!("Failed to load poses '{}': {e}", args.poses);
            process::exit(1);
        }
    };

    let opts = RenderOptions::new()
        .with_bbox(args.bbox)
        .with_face_mesh(args.face_mesh)
        .with_base_radius(args.radius);

    let image_size = (image.width(), image.height());
    let draw_list = match render_with_topology(&detections, Focus::Idle, image_size, args.zoom, &opts)
    {
        Ok(list) => list,
        Err(e) => {
            error!("Failed to build overlay: {e}");
            process::exit(1);
        }
    };

    for violation in &draw_list.skipped {
        warn!(
            "Skipping pose {}: expected {} keypoints, got {}",
            violation.pose_index, violation.expected, violation.actual
        );
    }
    verbose!(
        "{} {}x{}: {} pose(s), {} draw command(s), {} skipped",
        args.source,
        image_size.0,
        image_size.1,
        detections.len(),
        draw_list.len(),
        draw_list.skipped.len()
    );

    #[cfg(feature = "annotate")]
    if args.save {
        let annotated = annotate_image(&image, &draw_list);
        let save_dir = find_next_run_dir("runs/overlay", "view");
        if let Err(e) = fs::create_dir_all(&save_dir) {
            error!("Failed to create {save_dir}: {e}");
            process::exit(1);
        }
        let file_name = Path::new(&args.source)
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let save_path = Path::new(&save_dir).join(file_name);
        match annotated.save(&save_path) {
            Ok(()) => info!("Saved annotated image to {}", save_path.display()),
            Err(e) => {
                error!("Failed to save {}: {e}", save_path.display());
                process::exit(1);
            }
        }
    }
    #[cfg(not(feature = "annotate"))]
    if args.save {
        warn!("--save requires the 'annotate' feature; skipping");
    }

    #[cfg(feature = "visualize")]
    if args.show {
        let title = format!("Pose overlay - {}", args.source);
        let width = image_size.0.min(1280) as usize;
        let height = (width as f32 * image_size.1 as f32 / image_size.0 as f32) as usize;
        let result = OverlayViewer::new(&title, width, height.max(1))
            .and_then(|mut viewer| viewer.run(&image, &detections, &opts));
        if let Err(e) = result {
            error!("Viewer failed: {e}");
            process::exit(1);
        }
    }
    #[cfg(not(feature = "visualize"))]
    if args.show {
        warn!("--show requires the 'visualize' feature; skipping");
    }
}
