//! File discovery for renderlint.
//!
//! Walks a project tree and collects the JavaScript/TypeScript source files
//! worth scanning, skipping build output and dependency directories.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Maximum file size to analyze (10 MB).
///
/// Files larger than this are skipped to prevent memory exhaustion attacks.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Extensions considered scannable source.
const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Options for file discovery.
#[derive(Clone, Debug, Default)]
pub struct DiscoveryOptions {
    /// Whether to check file size limits.
    pub check_file_size: bool,
    /// Whether to perform TOCTOU-safe metadata checks.
    pub security_checks: bool,
}

impl DiscoveryOptions {
    /// Create options with all security checks enabled (recommended for engine).
    pub fn secure() -> Self {
        Self {
            check_file_size: true,
            security_checks: true,
        }
    }

    /// Create options without security checks (faster, for trusted contexts).
    pub fn fast() -> Self {
        Self {
            check_file_size: false,
            security_checks: false,
        }
    }
}

/// Discover all scannable source files at the given path.
///
/// Walks the directory tree, filtering out:
/// - `node_modules` and build-output directories
/// - Hidden directories (starting with `.`)
/// - TypeScript declaration files (`.d.ts`)
/// - Files that are too large (when `options.check_file_size` is true)
/// - Symlinks (when `options.security_checks` is true)
///
/// A `path` that is itself a file is returned as a single-element list when
/// it has a scannable extension.
pub fn discover_source_files(path: &Path, options: &DiscoveryOptions) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if path.is_file() {
        if is_source_file(path) {
            files.push(path.to_path_buf());
        }
        return files;
    }

    // Symlinks inside the tree are not followed; the root itself may be one.
    for entry in WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        if !is_source_file(file_path) {
            continue;
        }

        if options.security_checks {
            // Re-check via metadata to catch TOCTOU edge cases.
            match std::fs::symlink_metadata(file_path) {
                Ok(meta) if meta.is_file() => {
                    if options.check_file_size && meta.len() > MAX_FILE_SIZE {
                        eprintln!(
                            "Warning: Skipping {} (file too large: {} bytes, max: {} bytes)",
                            file_path.display(),
                            meta.len(),
                            MAX_FILE_SIZE
                        );
                        continue;
                    }
                    files.push(file_path.to_path_buf());
                }
                Ok(_) => continue,
                Err(e) => {
                    eprintln!(
                        "Warning: Cannot read metadata for {}: {}",
                        file_path.display(),
                        e
                    );
                    continue;
                }
            }
        } else {
            files.push(file_path.to_path_buf());
        }
    }

    files
}

/// Check whether a path has a scannable extension.
///
/// `.d.ts` declaration files carry no runtime render logic and are skipped.
pub fn is_source_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    if !SOURCE_EXTENSIONS.contains(&ext) {
        return false;
    }
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    !(name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts"))
}

/// Check if a directory entry should be excluded from traversal.
///
/// Excludes `node_modules`, common build-output directories, and hidden
/// directories. The root directory (depth 0) is never excluded, even if it
/// starts with `.`.
pub fn is_excluded_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    // Never exclude the root directory (allows temp dirs like .tmpXXX)
    if entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();

    if name.starts_with('.') {
        return true;
    }

    matches!(
        name.as_ref(),
        "node_modules" | "dist" | "build" | "out" | "coverage" | "public" | "vendor"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_excludes_node_modules() {
        let temp_dir = TempDir::new().unwrap();
        let deps = temp_dir.path().join("node_modules");
        std::fs::create_dir(&deps).unwrap();
        std::fs::write(deps.join("index.js"), "module.exports = {};").unwrap();

        let files = discover_source_files(temp_dir.path(), &DiscoveryOptions::fast());
        assert!(files.is_empty());
    }

    #[test]
    fn test_excludes_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let hidden = temp_dir.path().join(".next");
        std::fs::create_dir(&hidden).unwrap();
        std::fs::write(hidden.join("page.jsx"), "export default () => null;").unwrap();

        let files = discover_source_files(temp_dir.path(), &DiscoveryOptions::fast());
        assert!(files.is_empty());
    }

    #[test]
    fn test_finds_source_files() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("App.jsx"), "export const App = () => null;").unwrap();
        std::fs::write(src.join("util.ts"), "export const id = (x) => x;").unwrap();
        std::fs::write(src.join("styles.css"), "body {}").unwrap();

        let files = discover_source_files(temp_dir.path(), &DiscoveryOptions::fast());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_skips_declaration_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("types.d.ts"), "export type X = {};").unwrap();
        std::fs::write(temp_dir.path().join("real.ts"), "export const x = 1;").unwrap();

        let files = discover_source_files(temp_dir.path(), &DiscoveryOptions::fast());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("real.ts"));
    }

    #[test]
    fn test_single_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("Component.tsx");
        std::fs::write(&file, "export const C = () => null;").unwrap();

        let files = discover_source_files(&file, &DiscoveryOptions::secure());
        assert_eq!(files, vec![file]);
    }
}
