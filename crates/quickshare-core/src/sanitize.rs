//! File name handling for uploads and downloads
//!
//! Upload names come straight from the browser and can contain anything:
//! full client paths (`C:\Users\me\a.txt`), traversal payloads
//! (`../../etc/passwd`), control characters or names Windows refuses to
//! create. [`sanitize_filename`] reduces them to a single safe path
//! component. [`is_plain_file_name`] is the stricter check applied to
//! download names, which are looked up verbatim and never rewritten.

use std::path::{Component, Path};

/// Longest file name (in bytes) most filesystems accept
pub const MAX_FILE_NAME_BYTES: usize = 255;

/// Extensions longer than this are not preserved when truncating
const MAX_KEPT_EXTENSION_BYTES: usize = 16;

/// Device names Windows reserves regardless of extension
const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Reduce a client-supplied file name to a single safe path component.
///
/// - only the last component of a `/` or `\` separated path is kept
/// - runs of whitespace become a single `_`
/// - everything except alphanumerics (any script), `-`, `_` and `.` is dropped
/// - leading and trailing `.` and `_` are trimmed, so the result is never
///   `.`, `..` or a hidden file
/// - Windows device names (`CON`, `LPT1`, ...) get a `_` prefix
/// - names longer than [`MAX_FILE_NAME_BYTES`] are shortened, keeping the
///   extension
///
/// Returns `None` when nothing usable is left.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    let mut cleaned = String::with_capacity(last.len());
    for word in last.split_whitespace() {
        if !cleaned.is_empty() {
            cleaned.push('_');
        }
        cleaned.extend(
            word.chars()
                .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.')),
        );
    }

    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c == '_');
    if trimmed.is_empty() {
        return None;
    }

    let stem = trimmed.split('.').next().unwrap_or_default();
    let name = if WINDOWS_RESERVED_NAMES
        .iter()
        .any(|reserved| stem.eq_ignore_ascii_case(reserved))
    {
        format!("_{}", trimmed)
    } else {
        trimmed.to_string()
    };

    Some(truncate_to_limit(name))
}

/// Whether `name` addresses exactly one entry directly inside a directory.
///
/// Rejects empty names, `.` and `..`, anything containing a path separator
/// (either flavour) or NUL, and absolute or prefixed paths.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\', '\0']) {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

fn truncate_to_limit(name: String) -> String {
    if name.len() <= MAX_FILE_NAME_BYTES {
        return name;
    }

    let (stem, extension) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= MAX_KEPT_EXTENSION_BYTES => name.split_at(dot),
        _ => (name.as_str(), ""),
    };

    let mut cut = (MAX_FILE_NAME_BYTES - extension.len()).min(stem.len());
    while !stem.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}{}", &stem[..cut], extension)
}
