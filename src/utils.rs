/*!
 * Utility functions for codemd
 */

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

/// File name used when no output path is given
pub const DEFAULT_OUTPUT_NAME: &str = "code_files.md";

/// Extensions collected when none are given on the command line
pub const DEFAULT_EXTENSIONS: &[&str] = &[".html", ".css", ".js"];

/// Count the non-directory entries below `dir` for progress tracking
///
/// Unreadable entries are skipped; the count only sizes the progress bar.
pub fn count_files(dir: &Path, follow_links: bool) -> u64 {
    WalkDir::new(dir)
        .follow_links(follow_links)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| !e.file_type().is_dir())
        .count() as u64
}

/// Express `path` relative to `base`, lexically
///
/// A relative `path` is taken to be relative to `base` already. Neither
/// path has to exist and symlinks are not resolved. The base itself maps
/// to `"."`.
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let target = normalize(&base.join(path));
    let base = normalize(base);

    // Mixed absolute/relative inputs have no common frame
    if target.has_root() != base.has_root() {
        return target;
    }

    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();
    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for component in &target[common..] {
        rel.push(component.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        rel
    }
}

/// Resolve `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

/// Extension of a file name, including the dot
///
/// Leading dots belong to the stem (`.bashrc` has no extension) and only the
/// last dot counts (`app.min.js` -> `.js`). Returns `""` when there is none.
pub fn extension_of(file_name: &str) -> &str {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[stem_start..].rfind('.') {
        Some(idx) => &file_name[stem_start + idx..],
        None => "",
    }
}

/// Language tag for a code fence: everything after the last `.` of the
/// relative path string, or the whole string when it has no dot
pub fn fence_token(relative: &str) -> &str {
    relative
        .rsplit_once('.')
        .map_or(relative, |(_, token)| token)
}

/// Normalize a user-supplied extension to the `.ext` form
pub fn normalize_extension(raw: &str) -> Option<String> {
    let ext = raw.trim();
    if ext.is_empty() || ext == "." {
        return None;
    }
    if ext.starts_with('.') {
        Some(ext.to_string())
    } else {
        Some(format!(".{}", ext))
    }
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
