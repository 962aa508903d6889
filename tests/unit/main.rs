//! Library API tests against the fixture library and temp libraries.

mod config_tests;
mod library_tests;
mod manifest_tests;
mod resolution_tests;
mod validation_tests;

use std::path::PathBuf;

pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}
