//! Shared test utilities for the features workspace.
//!
//! This crate provides:
//! - The sample flood dataset as Turtle text, with its well-known ids
//! - Path helpers for the workspace `data/` directory and temporary files
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! ```ignore
//! use test_utils::{fixtures, FEATURES_TTL};
//! ```

pub mod fixtures;
pub mod paths;

pub use fixtures::*;
pub use paths::*;
