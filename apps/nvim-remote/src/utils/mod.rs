//! Shared utilities for nvim-remote
//!
//! Filesystem queries used before directory commands are issued.

pub mod fs;
pub mod paths;
