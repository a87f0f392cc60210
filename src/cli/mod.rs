// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for reviewing pose overlays.
//!
//! This module contains the command-line interface logic, including
//! argument parsing and the `view` command implementation.

// Modules
/// CLI arguments.
pub mod args;

/// Logging macros and verbosity control.
pub mod logging;

/// View command logic.
pub mod view;
