//! ct-skills - skills registry library
//!
//! Loads a skills library (flat index, dispatch manifest, shared resources,
//! profiles and protocols) and exposes lookup, dependency and profile
//! resolution, and frontmatter validation.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod installer;
pub mod library;
pub mod lint;
pub mod manifest;
pub mod test_utils;

pub use error::{Result, SkillsError};
