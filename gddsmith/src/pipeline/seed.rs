//! How one discussion round seeds the next.

/// Derives the next round's idea from a round's output.
pub type SeedPolicy = fn(&str) -> String;

/// Everything after the final `\n`, or the whole text if it has none.
///
/// The result is taken verbatim: a trailing newline yields an empty seed.
#[must_use]
pub fn last_line(output: &str) -> String {
    output.rsplit('\n').next().unwrap_or(output).to_string()
}
