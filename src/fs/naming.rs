//! Filename generation and manipulation.

use std::path::{Path, PathBuf};

/// Longest sanitized component, in bytes.
const MAX_COMPONENT_BYTES: usize = 180;

/// Placeholder for values that sanitize to nothing.
pub const EMPTY_COMPONENT: &str = "NA";

/// Turn an arbitrary string (e.g. a post title) into a single path component.
///
/// Separators and characters invalid on common filesystems become `_`,
/// whitespace runs collapse, leading/trailing dots and spaces are dropped,
/// and the result is cut to a bounded length on a char boundary.
pub fn sanitize_component(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut last_was_space = false;

    for c in name.chars() {
        let c = match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => ' ',
            c if c.is_whitespace() => ' ',
            c => c,
        };

        if c == ' ' {
            if last_was_space {
                continue;
            }
            last_was_space = true;
        } else {
            last_was_space = false;
        }
        sanitized.push(c);
    }

    let trimmed = sanitized.trim_matches(|c: char| c == '.' || c == ' ');
    let truncated = truncate_bytes(trimmed, MAX_COMPONENT_BYTES).trim_end();

    if truncated.is_empty() {
        EMPTY_COMPONENT.to_string()
    } else {
        truncated.to_string()
    }
}

/// Cut a string to at most `max` bytes without splitting a character.
fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Append `_{index}` to the file stem: `a/b.jpg` → `a/b_2.jpg`.
pub fn with_index_suffix(path: &Path, index: usize) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, index, ext),
        None => format!("{}_{}", stem, index),
    };
    path.with_file_name(name)
}

/// Temporary path used while a download is in progress.
pub fn part_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_component_valid() {
        assert_eq!(sanitize_component("normal title"), "normal title");
        assert_eq!(sanitize_component("file:name"), "file_name");
        assert_eq!(
            sanitize_component("what*is?this"),
            "what_is_this"
        );
    }

    #[test]
    fn test_sanitize_component_separators() {
        assert_eq!(sanitize_component("AC/DC live"), "AC_DC live");
        assert_eq!(sanitize_component("..\\windows"), "_windows");
        assert_eq!(sanitize_component("../etc/passwd"), "_etc_passwd");
    }

    #[test]
    fn test_sanitize_component_whitespace() {
        assert_eq!(sanitize_component("  a \n\t b  "), "a b");
        assert_eq!(sanitize_component("trailing dots..."), "trailing dots");
    }

    #[test]
    fn test_sanitize_component_empty() {
        assert_eq!(sanitize_component(""), "NA");
        assert_eq!(sanitize_component(" . "), "NA");
    }

    #[test]
    fn test_sanitize_component_truncates_on_char_boundary() {
        let long = "é".repeat(200);
        let out = sanitize_component(&long);
        assert!(out.len() <= MAX_COMPONENT_BYTES);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_with_index_suffix() {
        assert_eq!(
            with_index_suffix(Path::new("downloads/cat.jpg"), 2),
            PathBuf::from("downloads/cat_2.jpg")
        );
        assert_eq!(
            with_index_suffix(Path::new("downloads/cat"), 1),
            PathBuf::from("downloads/cat_1")
        );
    }

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path(Path::new("downloads/cat.jpg")),
            PathBuf::from("downloads/cat.jpg.part")
        );
    }
}
