#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// Copies a fixture into `dir` so the export can write next to it.
pub fn stage_fixture(dir: &Path, fixture: &str) -> PathBuf {
    let target = dir.join(fixture);
    fs::copy(Path::new("tests/fixtures").join(fixture), &target).expect("copy fixture");
    target
}

/// The texoverlay binary with no `TEXOVERLAY_*` variables leaking in.
pub fn texoverlay() -> Command {
    let mut cmd = Command::cargo_bin("texoverlay").unwrap();
    cmd.env_remove("TEXOVERLAY_LAYER")
        .env_remove("TEXOVERLAY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}
