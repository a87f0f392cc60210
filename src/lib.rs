// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]

//! # Ultralytics Pose Overlay Library
//!
//! Interactive skeleton overlay rendering for whole-body (133-keypoint)
//! pose annotations, built for human visual review inside dataset
//! curation tools. Detections arrive pre-computed; this crate maps the
//! semantic joint-naming scheme into a stable index space, builds the
//! skeleton connectivity graph, and renders it as a resolution-
//! independent draw list with per-pose and per-joint hover emphasis.
//!
//! ## Features
//!
//! - **133-point registry** - Body, feet, 68-point face, and both hands
//!   with fixed name/index/color tables
//! - **Checked topology** - Links authored by joint name and resolved
//!   against the registry at build time; unknown names fail loudly
//! - **Pure rendering** - `render()` is a pure function of detections,
//!   topology, hover focus, and viewport scale
//! - **Validity masks** - Edges with an invalid endpoint are dropped
//!   whole, never drawn as partial segments
//! - **Zoom-aware markers** - Stroke widths stay scale-invariant while
//!   joint markers grow with magnification
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use ultralytics_pose_overlay::{Focus, RenderOptions, render_with_topology};
//! use ultralytics_pose_overlay::io::load_detections;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let detections = load_detections("image.json")?;
//!
//!     let opts = RenderOptions::new().with_base_radius(2.2);
//!     let draw_list =
//!         render_with_topology(&detections, Focus::Idle, (1920, 1080), 1.0, &opts)?;
//!
//!     println!("{} draw commands", draw_list.len());
//!     for skipped in &draw_list.skipped {
//!         eprintln!("pose {} skipped: {} keypoints", skipped.pose_index, skipped.actual);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Save an annotated review image
//! ultralytics-pose-overlay view --source image.jpg --poses image.json --save
//!
//! # Open the interactive review window (hover, zoom, pan)
//! ultralytics-pose-overlay view --source image.jpg --poses image.json --show
//!
//! # Body skeleton only, no face mesh
//! ultralytics-pose-overlay view -s image.jpg -p image.json --face-mesh false
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Canonical joint registry (names, indices, colors) |
//! | [`topology`] | Skeleton edge list builder ([`Edge`], [`topology()`](topology::topology)) |
//! | [`detection`] | Input types ([`Detection`], [`Pose`], [`ImagePair`]) |
//! | [`render`] | Overlay renderer ([`DrawList`], [`RenderOptions`]) |
//! | [`hover`] | Hover focus state machine ([`HoverState`], [`Focus`]) |
//! | [`viewport`] | Preview/detail viewport adapter ([`Viewport`]) |
//! | [`io`] | Annotation and image loading |
//! | [`error`] | Error types ([`OverlayError`], [`Result`]) |
//! | [`annotate`] | Raster backend drawing a [`DrawList`] onto an image |
//! | [`visualizer`] | Colors and the interactive review window |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | Raster image annotation support (default) |
//! | `visualize` | Interactive review window (default) |
//!
//! ## License
//!
//! This project is licensed under [AGPL-3.0](https://ultralytics.com/license).

// Modules
#[cfg(feature = "annotate")]
pub mod annotate;
pub mod cli;
pub mod detection;
pub mod error;
pub mod hover;
pub mod io;
pub mod render;
pub mod schema;
pub mod topology;
pub mod viewport;
pub mod visualizer;

// Re-export main types for convenience
pub use detection::{BoundingBox, Detection, ImagePair, Pose};
pub use error::{OverlayError, Result};
pub use hover::{Focus, HoverState};
pub use render::{DrawCommand, DrawList, RenderOptions, SchemaViolation, render, render_with_topology};
pub use schema::{KEYPOINT_COUNT, color_of, name_of, name_to_index};
pub use topology::{Edge, build_topology, topology};
pub use viewport::{Viewport, ViewportState};
pub use visualizer::Color;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
