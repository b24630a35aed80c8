//! Idea slugs and run directory names.

use uuid::Uuid;

/// Longest slug kept in a directory name.
///
/// Keeps `<uuid>-<slug>` well under the 255-byte file name limit of common
/// filesystems.
pub const MAX_SLUG_LEN: usize = 100;

/// Lowercases the idea and replaces every character outside `[a-z0-9]` with `-`.
///
/// Each rejected character becomes its own hyphen; runs are not collapsed.
#[must_use]
pub fn slugify(idea: &str) -> String {
    idea.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .take(MAX_SLUG_LEN)
        .collect()
}

/// Directory name for a run: `<run-id>-<slug>`.
#[must_use]
pub fn run_dir_name(run_id: Uuid, idea: &str) -> String {
    format!("{run_id}-{}", slugify(idea))
}

/// First `max_chars` characters of `text`.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
