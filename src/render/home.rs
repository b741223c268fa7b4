//! Home page.
//!
//! One long page listing the whole catalog. Entries link to their detail
//! page only when a markdown document exists for them.

use super::{href, html};
use crate::{
    catalog::{Achievement, Catalog, Category, Entry, Project},
    config::SiteConfig,
    resolver::{PresenceMap, is_present},
};
use html::escape;
use std::fmt::Write;

/// Render `index.html`.
pub fn home(config: &SiteConfig, catalog: &Catalog, presence: &PresenceMap) -> String {
    let links = Links { config, presence };
    let mut body = header(config);

    body.push_str("<main>\n");
    body.push_str(&hero(config, catalog));

    let (featured, other): (Vec<&Project>, Vec<&Project>) =
        catalog.projects.iter().partition(|p| p.featured);
    if !featured.is_empty() {
        body.push_str(&project_section("projects", "Featured Projects", &featured, &links));
    }
    if !other.is_empty() {
        let (anchor, heading) = if featured.is_empty() {
            ("projects", "Projects")
        } else {
            ("other-projects", "Other Projects")
        };
        body.push_str(&project_section(anchor, heading, &other, &links));
    }

    body.push_str(&skills(catalog));
    body.push_str(&timeline(
        Category::Experiences,
        catalog
            .experiences
            .iter()
            .map(|e| (Entry::Experience(e), e.company.as_str(), e.period.as_str())),
        &links,
    ));
    body.push_str(&timeline(
        Category::Education,
        catalog
            .education
            .iter()
            .map(|e| (Entry::Education(e), e.institution.as_str(), e.period.as_str())),
        &links,
    ));
    body.push_str(&achievements(&catalog.achievements, &links));
    body.push_str("</main>\n");

    html::layout(config, &config.base.title, &body)
}

/// Decides whether an entry title becomes a link.
struct Links<'a> {
    config: &'a SiteConfig,
    presence: &'a PresenceMap,
}

impl Links<'_> {
    fn is_linked(&self, entry: &Entry<'_>) -> bool {
        is_present(self.presence, entry.category(), entry.id())
    }

    /// Escaped title, wrapped in a link when the entry has a document.
    fn title(&self, entry: &Entry<'_>) -> String {
        let title = escape(entry.title());
        if self.is_linked(entry) {
            format!(
                r#"<a href="{}">{title}</a>"#,
                escape(&href(self.config, entry.category(), entry.id()))
            )
        } else {
            title
        }
    }
}

fn header(config: &SiteConfig) -> String {
    let mut nav = String::new();
    for link in &config.base.links {
        nav.push_str(&html::external_link(&link.url, &link.label));
    }
    if !config.base.email.is_empty() {
        let _ = write!(
            nav,
            r#"<a href="mailto:{0}">{0}</a>"#,
            escape(&config.base.email)
        );
    }

    format!(
        "<header class=\"site-header\"><a href=\"{}\"><strong>{}</strong></a><nav>{nav}</nav></header>\n",
        escape(&config.url_prefix()),
        escape(&config.base.author),
    )
}

fn hero(config: &SiteConfig, catalog: &Catalog) -> String {
    let mut out = format!(
        "<section class=\"hero\">\n<h1>{}</h1>\n",
        escape(&config.base.author)
    );
    if !config.base.description.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", escape(&config.base.description));
    }

    if !catalog.highlights.is_empty() {
        out.push_str("<div class=\"highlights\">\n");
        for h in &catalog.highlights {
            let _ = writeln!(
                out,
                "<div class=\"highlight\"><strong>{}</strong><span>{}</span></div>",
                escape(&h.value),
                escape(&h.label)
            );
        }
        out.push_str("</div>\n");
    }

    out.push_str("</section>\n");
    out
}

fn project_section(
    anchor: &str,
    heading: &str,
    projects: &[&Project],
    links: &Links<'_>,
) -> String {
    let mut out = format!(
        "<section id=\"{anchor}\">\n<h2>{heading}</h2>\n<div class=\"cards\">\n"
    );

    for &project in projects {
        let entry = Entry::Project(project);
        let class = if links.is_linked(&entry) { "card linked" } else { "card" };
        let _ = write!(
            out,
            r#"<article class="{class}"><span class="tag {}">{}</span><h3>{}</h3><p>{}</p><span class="meta">{}</span>{}"#,
            project.category.css_class(),
            project.category.label(),
            links.title(&entry),
            escape(&project.description),
            escape(&project.period),
            html::tags(&project.technologies),
        );
        if let Some(github) = &project.github {
            out.push_str(&html::external_link(github, "Source"));
        }
        if let Some(live) = &project.live_url {
            out.push_str(&html::external_link(live, "Live"));
        }
        out.push_str("</article>\n");
    }

    out.push_str("</div>\n</section>\n");
    out
}

fn skills(catalog: &Catalog) -> String {
    if catalog.skills.is_empty() {
        return String::new();
    }

    let mut out = String::from("<section id=\"skills\">\n<h2>Skills</h2>\n<div class=\"skills\">\n");
    for group in &catalog.skills {
        let _ = writeln!(
            out,
            "<div><h3>{}</h3>{}</div>",
            escape(&group.name),
            html::tags(&group.items)
        );
    }
    out.push_str("</div>\n</section>\n");
    out
}

/// Vertical list used for experience and education.
///
/// Items are `(entry, organization, period)`.
fn timeline<'a>(
    category: Category,
    entries: impl Iterator<Item = (Entry<'a>, &'a str, &'a str)>,
    links: &Links<'_>,
) -> String {
    let items: Vec<String> = entries
        .map(|(entry, org, period)| {
            format!(
                "<li><span class=\"meta\">{}</span><h3>{}</h3><p class=\"meta\">{}</p><p>{}</p></li>",
                escape(period),
                links.title(&entry),
                escape(org),
                escape(entry.description()),
            )
        })
        .collect();

    if items.is_empty() {
        return String::new();
    }

    format!(
        "<section id=\"{}\">\n<h2>{}</h2>\n<ul class=\"timeline\">\n{}\n</ul>\n</section>\n",
        category.route(),
        category.label(),
        items.join("\n")
    )
}

fn achievements(list: &[Achievement], links: &Links<'_>) -> String {
    if list.is_empty() {
        return String::new();
    }

    let mut out = String::from("<section id=\"achievements\">\n<h2>Achievements</h2>\n");
    for achievement in list {
        let entry = Entry::Achievement(achievement);
        let _ = writeln!(
            out,
            r#"<div class="achievement"><span class="icon" title="{}">{}</span><div><h3>{}</h3><p class="meta">{}</p><p>{}</p></div></div>"#,
            achievement.icon.name(),
            achievement.icon.glyph(),
            links.title(&entry),
            escape(&entry.subtitle()),
            escape(&achievement.description),
        );
    }
    out.push_str("</section>\n");
    out
}
