//! HTML minification, switched by `[build] minify`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Content kinds the minifier understands.
pub enum MinifyType<'a> {
    Html(&'a [u8]),
}

/// Minify `content` when enabled in `config`, otherwise borrow it unchanged.
pub fn minify<'a>(content: MinifyType<'a>, config: &SiteConfig) -> Cow<'a, [u8]> {
    match content {
        MinifyType::Html(html) if config.build.minify => Cow::Owned(minify_html_inner(html)),
        MinifyType::Html(html) => Cow::Borrowed(html),
    }
}

fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}
