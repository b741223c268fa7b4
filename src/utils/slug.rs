//! Identifier slug checks.
//!
//! Catalog ids become URL path segments and file names verbatim, so they are
//! restricted to lowercase ASCII alphanumeric runs joined by single hyphens.

use deunicode::deunicode;

/// Characters forbidden in identifiers regardless of slug rules.
///
/// Checked first so error messages can name path traversal explicitly.
const PATH_CHARS: &[char] = &['/', '\\', '.', '\0'];

/// Check whether `id` is a URL-safe slug: `[a-z0-9]+(-[a-z0-9]+)*`.
pub fn is_slug(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && !id.contains("--")
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Check whether `id` could escape its directory when joined onto a path.
pub fn has_path_chars(id: &str) -> bool {
    id.contains(PATH_CHARS)
}

/// Derive a slug from arbitrary text, for "did you mean" hints.
///
/// Transliterates to ASCII, lowercases, and collapses everything that is not
/// alphanumeric into single hyphens.
pub fn suggest_slug(text: &str) -> String {
    let ascii = deunicode(text).to_ascii_lowercase();
    let mut slug = String::with_capacity(ascii.len());

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
