//! HTML building helpers.

use crate::config::SiteConfig;

/// Page shell (embedded at compile time)
const LAYOUT_TEMPLATE: &str = include_str!("../embed/layout.html");

/// Site stylesheet, inlined into every page
const STYLESHEET: &str = include_str!("../embed/style.css");

/// Escape text for use in HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a rendered `<body>` fragment in the site layout.
///
/// `title` is plain text; `body` is trusted HTML.
pub fn layout(config: &SiteConfig, title: &str, body: &str) -> String {
    let page_title = if title.is_empty() || title == config.base.title {
        config.base.title.clone()
    } else if config.base.title.is_empty() {
        title.to_owned()
    } else {
        format!("{title} | {}", config.base.title)
    };

    let lang = escape(&config.base.language);
    let description = escape(&config.base.description);
    let title = escape(&page_title);
    let footer_html = footer(config);

    fill_template(
        LAYOUT_TEMPLATE,
        &[
            ("lang", lang.as_str()),
            ("description", description.as_str()),
            ("style", STYLESHEET),
            ("title", title.as_str()),
            ("body", body),
            ("footer", footer_html.as_str()),
        ],
    )
}

/// Substitute `{name}` placeholders in a single pass.
///
/// Inserted values are never scanned again, and unknown `{...}` text is kept.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let hit = tail.find('}').and_then(|end| {
            let name = &tail[1..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match hit {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// `<a>` that opens in a new tab.
pub fn external_link(href: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        escape(href),
        escape(text)
    )
}

/// Row of technology tags.
pub fn tags(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let spans: Vec<_> = items
        .iter()
        .map(|t| format!(r#"<span class="tag">{}</span>"#, escape(t)))
        .collect();
    format!(r#"<div class="tags">{}</div>"#, spans.join(""))
}

fn footer(config: &SiteConfig) -> String {
    if config.base.copyright.is_empty() {
        String::new()
    } else {
        format!("<footer class=\"site-footer\">&copy; {}</footer>", escape(&config.base.copyright))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("<b>"), "&lt;b&gt;");
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_does_not_double_escape_order() {
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_layout_fills_placeholders() {
        let mut config = SiteConfig::default();
        config.base.title = "Jane Doe".into();
        config.base.language = "en".into();
        config.base.copyright = "2025 Jane".into();

        let html = layout(&config, "Agentrial", "<main>hi</main>");
        assert!(html.contains("<title>Agentrial | Jane Doe</title>"));
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains("<main>hi</main>"));
        assert!(html.contains("&copy; 2025 Jane"));
        assert!(!html.contains("{body}"));
        assert!(!html.contains("{style}"));
    }

    #[test]
    fn test_layout_does_not_expand_placeholders_in_values() {
        let mut config = SiteConfig::default();
        config.base.title = "Jane".into();
        config.base.description = "I write {style} and {body}".into();

        let html = layout(&config, "Using {body} tags", "<main>page body</main>");
        assert_eq!(html.matches("<main>page body</main>").count(), 1);
        assert!(html.contains("<title>Using {body} tags | Jane</title>"));
        assert!(html.contains(r#"content="I write {style} and {body}""#));
    }

    #[test]
    fn test_fill_template_keeps_unknown_braces() {
        let out = fill_template("a {x} {y} {", &[("x", "1")]);
        assert_eq!(out, "a 1 {y} {");
    }

    #[test]
    fn test_layout_home_title() {
        let mut config = SiteConfig::default();
        config.base.title = "Jane Doe".into();

        let html = layout(&config, "Jane Doe", "");
        assert!(html.contains("<title>Jane Doe</title>"));
    }

    #[test]
    fn test_tags() {
        assert_eq!(tags(&[]), "");
        let html = tags(&["C++".into(), "CUDA".into()]);
        assert!(html.contains(r#"<span class="tag">C++</span>"#));
        assert!(html.contains(r#"<span class="tag">CUDA</span>"#));
    }

    #[test]
    fn test_external_link_escapes() {
        let html = external_link("https://x.dev/?a=1&b=2", "Source");
        assert!(html.contains(r#"href="https://x.dev/?a=1&amp;b=2""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }
}
