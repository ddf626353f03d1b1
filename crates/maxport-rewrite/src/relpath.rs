//! Lexical relative-path computation.

use std::path::{Component, Path, PathBuf};

/// Express `target` relative to the directory `start_dir`.
///
/// Purely lexical: the filesystem is never consulted. Both paths must share a
/// base (both absolute, or both relative to the same root); `process`
/// absolutizes its inputs before calling this. The result uses `..` segments
/// followed by name segments and formats with the native separator, matching
/// what the Live host wrote into presets it saved itself.
pub fn relative_path_between(target: &Path, start_dir: &Path) -> PathBuf {
    let target_parts: Vec<Component> = target.components().collect();
    let start_parts: Vec<Component> = start_dir.components().collect();

    let mut common = 0;
    while common < target_parts.len()
        && common < start_parts.len()
        && target_parts[common] == start_parts[common]
    {
        common += 1;
    }

    let mut result = PathBuf::new();
    for _ in common..start_parts.len() {
        result.push("..");
    }
    for part in &target_parts[common..] {
        result.push(part.as_os_str());
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(target: &str, start: &str) -> PathBuf {
        relative_path_between(Path::new(target), Path::new(start))
    }

    #[test]
    fn test_same_directory() {
        assert_eq!(rel("/a/X.amxd", "/a"), PathBuf::from_iter(["X.amxd"]));
    }

    #[test]
    fn test_one_level_up() {
        assert_eq!(
            rel("/a/X.amxd", "/a/b"),
            PathBuf::from_iter(["..", "X.amxd"])
        );
    }

    #[test]
    fn test_three_levels_up() {
        // Preset at /a/b/c/d/Choker.adv, device at /a/X.amxd.
        assert_eq!(
            rel("/a/X.amxd", "/a/b/c/d"),
            PathBuf::from_iter(["..", "..", "..", "X.amxd"])
        );
    }

    #[test]
    fn test_sibling_branch() {
        assert_eq!(
            rel("/a/x/X.amxd", "/a/b/c"),
            PathBuf::from_iter(["..", "..", "x", "X.amxd"])
        );
    }

    #[test]
    fn test_identical_directories() {
        assert_eq!(rel("/a/b", "/a/b"), PathBuf::from("."));
    }

    #[test]
    fn test_relative_inputs() {
        assert_eq!(
            rel("pack/X.amxd", "pack/Presets/Bass"),
            PathBuf::from_iter(["..", "..", "X.amxd"])
        );
    }
}
