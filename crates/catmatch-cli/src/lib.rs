//! Library components of the catmatch command-line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
