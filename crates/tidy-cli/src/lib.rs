//! Library side of the `tidy` command: configuration, the per-file
//! pipeline, logging setup and terminal output.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod summary;
pub mod types;
