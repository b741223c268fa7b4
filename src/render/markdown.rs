//! Markdown to HTML.
//!
//! Resolved bodies stay raw markdown until this point; conversion happens
//! only when a page is rendered.

use pulldown_cmark::{Event, Options, Parser, html};

/// Convert a markdown document to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    // Single newlines inside a paragraph are kept as line breaks
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let html = to_html("# Agentrial\n\nDetails.");
        assert!(html.contains("<h1>Agentrial</h1>"));
        assert!(html.contains("<p>Details.</p>"));
    }

    #[test]
    fn test_tables_enabled() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_code_block_is_escaped() {
        let html = to_html("```rust\nlet x = a < b;\n```\n");
        assert!(html.contains("a &lt; b"));
        assert!(html.contains(r#"class="language-rust""#));
    }

    #[test]
    fn test_single_newline_is_line_break() {
        let html = to_html("line one\nline two");
        assert_eq!(html, "<p>line one<br />\nline two</p>\n");
    }

    #[test]
    fn test_plain_fallback_text() {
        assert_eq!(to_html("Page not found"), "<p>Page not found</p>\n");
        assert_eq!(to_html(""), "");
    }
}
