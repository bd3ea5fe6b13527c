#![allow(dead_code)]

use std::path::PathBuf;
use zeekdiff_core::{read_log, LogTable};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture(side: &str, file: &str) -> LogTable {
    read_log(&fixtures_dir().join(side).join(file)).unwrap()
}

pub fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
