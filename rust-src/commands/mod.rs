//! CLI command implementations.

pub mod columns;
pub mod config;
pub mod render;
pub mod view;
