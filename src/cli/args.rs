// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

use crate::render::DEFAULT_BASE_RADIUS;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"View Options:
    --source, -s <SOURCE>  Path to the image under review
    --poses, -p <POSES>    Path to the pose annotation JSON for that image
    --radius <RADIUS>      Joint marker base radius in pixels [default: 2.2]
    --zoom <ZOOM>          Initial zoom scale for marker sizing [default: 1]
    --bbox <BOOL>          Draw per-pose bounding boxes [default: true]
    --face-mesh <BOOL>     Draw the 68-point face mesh [default: true]
    --save                 Save the annotated image to runs/overlay/view
    --show                 Open the interactive review window
    --verbose              Show verbose output

Examples:
    ultralytics-pose-overlay view --source image.jpg --poses image.json
    ultralytics-pose-overlay view -s image.jpg -p image.json --save
    ultralytics-pose-overlay view -s image.jpg -p image.json --show --radius 3
    ultralytics-pose-overlay view -s image.jpg -p image.json --face-mesh false"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the pose overlay for one image
    View(ViewArgs),
}

/// Arguments for the view command.
#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct ViewArgs {
    /// Path to the image under review
    #[arg(short, long)]
    pub source: String,

    /// Path to the pose annotation JSON for that image
    #[arg(short, long)]
    pub poses: String,

    /// Joint marker base radius in pixels
    #[arg(long, default_value_t = DEFAULT_BASE_RADIUS)]
    pub radius: f32,

    /// Initial zoom scale for marker sizing
    #[arg(long, default_value_t = 1.0)]
    pub zoom: f32,

    /// Draw per-pose bounding boxes
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub bbox: bool,

    /// Draw the 68-point face mesh
    #[arg(long = "face-mesh", default_value_t = true, action = clap::ArgAction::Set)]
    pub face_mesh: bool,

    /// Save the annotated image to runs/overlay/view
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Open the interactive review window
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_view_args_defaults() {
        let args = Cli::parse_from(["app", "view", "--source", "a.jpg", "--poses", "a.json"]);
        match args.command {
            Commands::View(view_args) => {
                assert_eq!(view_args.source, "a.jpg");
                assert_eq!(view_args.poses, "a.json");
                assert!((view_args.radius - DEFAULT_BASE_RADIUS).abs() < f32::EPSILON);
                assert!((view_args.zoom - 1.0).abs() < f32::EPSILON);
                assert!(view_args.bbox);
                assert!(view_args.face_mesh);
                assert!(!view_args.save);
                assert!(!view_args.show);
                assert!(view_args.verbose);
            }
        }
    }

    #[test]
    fn test_view_args_custom() {
        let args = Cli::parse_from([
            "app",
            "view",
            "-s",
            "img.png",
            "-p",
            "img.json",
            "--radius",
            "4.5",
            "--bbox",
            "false",
            "--face-mesh",
            "false",
            "--save",
        ]);
        match args.command {
            Commands::View(view_args) => {
                assert!((view_args.radius - 4.5).abs() < f32::EPSILON);
                assert!(!view_args.bbox);
                assert!(!view_args.face_mesh);
                assert!(view_args.save);
            }
        }
    }
}
