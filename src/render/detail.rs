//! Detail pages.
//!
//! Projects get the rich layout (metrics, features, chart data, links).
//! Every other category shares the plain layout: title, subtitle, body.

use super::{home_label, html, markdown};
use crate::{
    catalog::{ChartPoint, Entry, Project},
    config::SiteConfig,
    resolver::Resolved,
};
use html::escape;
use std::fmt::Write;

/// Render the detail page of one resolved entry.
pub fn detail(config: &SiteConfig, resolved: &Resolved<'_>) -> String {
    let body = match resolved.entry {
        Entry::Project(project) => project_page(config, project, &resolved.content),
        entry => plain_page(config, &entry, &resolved.content),
    };
    html::layout(config, resolved.entry.title(), &body)
}

/// Heading block shared by all detail pages.
fn page_head(entry: &Entry<'_>, eyebrow: Option<&str>) -> String {
    let mut out = String::from("<header class=\"page-head\">\n");
    if let Some(eyebrow) = eyebrow {
        let _ = writeln!(out, "<span class=\"meta\">{}</span>", escape(eyebrow));
    }
    let _ = writeln!(out, "<h1>{}</h1>", escape(entry.title()));
    let _ = writeln!(out, "<p class=\"subtitle\">{}</p>", escape(&entry.subtitle()));
    out.push_str("</header>\n");
    out
}

fn back_link(config: &SiteConfig, anchor: &str) -> String {
    format!(
        "<a href=\"{}#{anchor}\">&larr; Back to {}</a>",
        escape(&config.url_prefix()),
        escape(home_label(config))
    )
}

/// Markdown body; empty bodies produce no `<article>`.
fn article(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    format!("<article>\n{}</article>\n", markdown::to_html(content))
}

fn plain_page(config: &SiteConfig, entry: &Entry<'_>, content: &str) -> String {
    let mut out = String::from("<main>\n");
    out.push_str(&page_head(entry, None));
    out.push_str(&article(content));
    let _ = writeln!(
        out,
        "<nav class=\"page-links\">{}</nav>",
        back_link(config, entry.category().route())
    );
    out.push_str("</main>\n");
    out
}

fn project_page(config: &SiteConfig, project: &Project, content: &str) -> String {
    let entry = Entry::Project(project);
    let mut out = String::from("<main>\n");
    out.push_str(&page_head(&entry, Some(project.category.full_label())));

    let _ = writeln!(out, "<p>{}</p>", escape(&project.description));
    out.push_str(&html::tags(&project.technologies));

    if !project.metrics.is_empty() {
        out.push_str("<section>\n<h2>Key Metrics</h2>\n<div class=\"metrics\">\n");
        for metric in &project.metrics {
            let _ = write!(
                out,
                "<div class=\"metric\"><strong>{}</strong><span>{}</span>",
                escape(&metric.value),
                escape(&metric.label)
            );
            if let Some(desc) = &metric.description {
                let _ = write!(out, "<p class=\"meta\">{}</p>", escape(desc));
            }
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n</section>\n");
    }

    if let Some((label, data)) = project.chart() {
        out.push_str(&chart_table(label, data));
    }

    if !project.features.is_empty() {
        out.push_str("<section>\n<h2>Features</h2>\n<div class=\"features\">\n");
        for feature in &project.features {
            let _ = writeln!(
                out,
                "<div class=\"feature\"><h3>{}</h3><p>{}</p></div>",
                escape(&feature.title),
                escape(&feature.description)
            );
        }
        out.push_str("</div>\n</section>\n");
    }

    out.push_str(&article(content));

    out.push_str("<nav class=\"page-links\">");
    out.push_str(&back_link(config, "projects"));
    out.push_str("<span>");
    if let Some(github) = &project.github {
        out.push_str(&html::external_link(github, "View Source"));
    }
    if let Some(live) = &project.live_url {
        out.push_str(&html::external_link(live, "Live Demo"));
    }
    out.push_str("</span></nav>\n</main>\n");
    out
}

/// Chart dataset as a table; a baseline column appears only if any row has one.
fn chart_table(label: &str, data: &[ChartPoint]) -> String {
    let has_baseline = data.iter().any(|p| p.baseline.is_some());

    let mut out = format!(
        "<section>\n<table class=\"chart\">\n<caption>{}</caption>\n<thead><tr><th>Name</th><th>Value</th>",
        escape(label)
    );
    if has_baseline {
        out.push_str("<th>Baseline</th>");
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for point in data {
        let unit = point.unit.as_deref().unwrap_or("");
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}{}</td>",
            escape(&point.name),
            point.value,
            escape(unit)
        );
        if has_baseline {
            match point.baseline {
                Some(baseline) => {
                    let _ = write!(out, "<td>{baseline}{}</td>", escape(unit));
                }
                None => out.push_str("<td></td>"),
            }
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n</section>\n");
    out
}
