// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown to HTML rendering for the PDF pipeline

use std::sync::Arc;

/// Converts Markdown text into an HTML document body.
///
/// Closures `Fn(&str) -> String` implement this trait, so a caller can
/// plug in any renderer without defining a type.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// Wraps the escaped source in `<pre>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreformattedRenderer;

impl MarkdownRenderer for PreformattedRenderer {
    fn render(&self, markdown: &str) -> String {
        format!("<pre>{}</pre>", escape_html(markdown))
    }
}

/// CommonMark renderer with tables, strikethrough and task lists enabled.
#[cfg(feature = "commonmark")]
#[derive(Clone, Copy, Debug, Default)]
pub struct CommonMarkRenderer;

#[cfg(feature = "commonmark")]
impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, markdown: &str) -> String {
        use pulldown_cmark::{html, Options, Parser};

        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Renderer used when the caller doesn't supply one.
pub fn default_renderer() -> Arc<dyn MarkdownRenderer> {
    #[cfg(feature = "commonmark")]
    {
        Arc::new(CommonMarkRenderer)
    }
    #[cfg(not(feature = "commonmark"))]
    {
        tracing::info!("commonmark support disabled; falling back to <pre> wrapper for HTML");
        Arc::new(PreformattedRenderer)
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
