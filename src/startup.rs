// src/startup.rs

use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;
use log::{info, warn};

const BACKEND_BINARIES: [&str; 2] = ["espeak", "espeak-ng"];

fn find_in_path(binary: &str, path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

/// Speech synthesizer programs found on `PATH`.
pub fn installed_backends_in(path_var: &OsStr) -> Vec<&'static str> {
    BACKEND_BINARIES
        .iter()
        .copied()
        .filter(|binary| find_in_path(binary, path_var).is_some())
        .collect()
}

pub fn installed_backends() -> Vec<&'static str> {
    let found = match env::var_os("PATH") {
        Some(path_var) => installed_backends_in(&path_var),
        None => Vec::new(),
    };
    if found.is_empty() {
        warn!("None of {:?} found on PATH", BACKEND_BINARIES);
    } else {
        info!("Speech backends on PATH: {:?}", found);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_backends_across_path_entries() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(first.path().join("espeak-ng"), "").unwrap();
        fs::write(second.path().join("espeak"), "").unwrap();

        let path_var = env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(installed_backends_in(&path_var), vec!["espeak", "espeak-ng"]);
    }

    #[test]
    fn festival_alone_does_not_count() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("festival"), "").unwrap();
        fs::create_dir(dir.path().join("espeak")).unwrap();

        let path_var = env::join_paths([dir.path()]).unwrap();
        assert!(installed_backends_in(&path_var).is_empty());
    }

    #[test]
    fn empty_path_finds_nothing() {
        assert!(installed_backends_in(OsStr::new("")).is_empty());
    }
}
