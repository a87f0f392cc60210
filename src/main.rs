// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use ultralytics_pose_overlay::cli::args::{Cli, Commands};
use ultralytics_pose_overlay::cli::view::run_view;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::View(args) => run_view(&args),
    }
}
