// SPDX-License-Identifier: Apache-2.0

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATALOG_FILE: &str = "products.js";
const LOCK_SUFFIX: &str = ".lock";
const TMP_SUFFIX: &str = ".tmp";

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map_or_else(|| OsString::from(DEFAULT_CATALOG_FILE), OsString::from);
    name.push(suffix);
    path.with_file_name(name)
}

/// Single-writer lock file guarding `path`.
#[must_use]
pub fn lock_path_for(path: &Path) -> PathBuf {
    with_suffix(path, LOCK_SUFFIX)
}

/// Staging file renamed over `path` on publish.
#[must_use]
pub fn tmp_path_for(path: &Path) -> PathBuf {
    with_suffix(path, TMP_SUFFIX)
}

pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::{lock_path_for, parent_dir, tmp_path_for};
    use std::path::{Path, PathBuf};

    #[test]
    fn sibling_paths_keep_directory() {
        let p = Path::new("site/data/products.js");
        assert_eq!(lock_path_for(p), PathBuf::from("site/data/products.js.lock"));
        assert_eq!(tmp_path_for(p), PathBuf::from("site/data/products.js.tmp"));
    }

    #[test]
    fn bare_file_name_syncs_current_dir() {
        assert_eq!(parent_dir(Path::new("products.js")), PathBuf::from("."));
    }
}
