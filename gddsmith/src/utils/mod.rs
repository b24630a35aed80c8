//! Text helpers for run naming and progress messages.

mod slug;

pub use slug::{preview, run_dir_name, slugify, MAX_SLUG_LEN};
