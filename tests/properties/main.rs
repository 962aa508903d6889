//! Property tests for resolution and validation.

mod determinism_tests;
mod resolution_props;
