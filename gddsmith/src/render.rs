//! Markdown to HTML rendering for the final document.

use pulldown_cmark::{html, Options, Parser};

/// Turns a markup document into hypertext. Implementations are pure.
pub trait MarkupRenderer: Send + Sync {
    /// Renders the document.
    fn render(&self, markdown: &str) -> String;
}

/// CommonMark renderer with the GitHub table, strikethrough and task list
/// extensions enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMarkRenderer;

impl CommonMarkRenderer {
    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options
    }
}

impl MarkupRenderer for CommonMarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
