//! Test helpers shared across the workspace crates.

pub mod env;
