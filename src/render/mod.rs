//! Page templates.
//!
//! Every page is a plain `String` of HTML produced from catalog data and the
//! site config. Nothing here touches the filesystem.
//!
//! | Page        | Function        | Output path               |
//! |-------------|-----------------|---------------------------|
//! | Home        | [`home`]        | `index.html`              |
//! | Detail      | [`detail`]      | `<route>/<id>/index.html` |
//! | Not found   | [`not_found`]   | `404.html`                |

mod detail;
mod home;
pub mod html;
pub mod markdown;

pub use detail::detail;
pub use home::home;

use crate::{catalog::Category, config::SiteConfig};
use html::escape;

/// Link to the detail page of `(category, id)`, honoring `base_path`.
pub fn href(config: &SiteConfig, category: Category, id: &str) -> String {
    format!("{}{}/{}/", config.url_prefix(), category.route(), id)
}

/// Generic page for unknown identifiers.
pub fn not_found(config: &SiteConfig) -> String {
    let body = format!(
        r#"<main class="not-found">
<h1>404</h1>
<p>This page does not exist.</p>
<p><a href="{home}">Back to {title}</a></p>
</main>"#,
        home = escape(&config.url_prefix()),
        title = escape(home_label(config)),
    );
    html::layout(config, "Not found", &body)
}

/// Name used for "back to" links.
fn home_label(config: &SiteConfig) -> &str {
    if config.base.title.is_empty() {
        "home"
    } else {
        &config.base.title
    }
}
