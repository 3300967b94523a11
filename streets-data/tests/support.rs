//! Shared helpers for the streets-data integration tests.

use camino::Utf8PathBuf;
use std::{io::Write, path::PathBuf};
use tempfile::{Builder, TempPath};

/// Epsilon for floating-point coordinate comparisons in tests.
const COORDINATE_EPSILON: f64 = 1.0e-7;

/// Directory containing the test fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// UTF-8 path to a named fixture.
pub fn fixture_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(fixtures_dir().join(name))
        .unwrap_or_else(|path| panic!("fixture path {path:?} is not UTF-8"))
}

/// Write `bytes` to a temporary file with the given suffix.
pub fn temp_file_with(bytes: &[u8], suffix: &str) -> TempPath {
    let mut tempfile = Builder::new()
        .prefix("streets")
        .suffix(suffix)
        .tempfile()
        .unwrap_or_else(|err| panic!("failed to create temporary file: {err}"));
    tempfile
        .write_all(bytes)
        .unwrap_or_else(|err| panic!("failed to write temporary file: {err}"));
    tempfile
        .flush()
        .unwrap_or_else(|err| panic!("failed to flush temporary file: {err}"));
    tempfile.into_temp_path()
}

/// Compare floating-point coordinates within a small epsilon.
#[expect(
    clippy::float_arithmetic,
    reason = "test delta computation requires float maths"
)]
pub fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= COORDINATE_EPSILON,
        "expected {expected}, got {actual} (|Δ| = {delta})"
    );
}
