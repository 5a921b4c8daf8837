//! The shared page shell wrapped around every rendered article.
//!
//! The renderer hands the shell a title and a content blob; everything else
//! (doctype, head, header navigation, footer, stylesheet) belongs here.
//! [`SiteShell`] is the stock implementation, driven by `[site]` in
//! `config.toml`.

use crate::config::{NavLink, SiteSection};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = include_str!("../static/style.css");

/// Per-page inputs to the shell.
#[derive(Debug, Clone, Copy)]
pub struct ShellContext<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
}

/// Wraps page content in the site chrome.
pub trait PageShell: Send + Sync {
    fn wrap(&self, page: &ShellContext<'_>, content: Markup) -> Markup;
}

/// Stock shell: header with site title and nav links, footer text, inline CSS.
#[derive(Debug, Clone)]
pub struct SiteShell {
    title: String,
    description: Option<String>,
    footer: Option<String>,
    nav: Vec<NavLink>,
}

impl SiteShell {
    pub fn new(site: &SiteSection) -> Self {
        let non_empty = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            title: site.title.clone(),
            description: non_empty(&site.description),
            footer: non_empty(&site.footer),
            nav: site.nav.clone(),
        }
    }

    fn document_title(&self, page_title: &str) -> String {
        if self.title.is_empty() || page_title == self.title {
            page_title.to_string()
        } else {
            format!("{} | {}", page_title, self.title)
        }
    }
}

impl PageShell for SiteShell {
    fn wrap(&self, page: &ShellContext<'_>, content: Markup) -> Markup {
        let description = page.description.or(self.description.as_deref());
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.document_title(page.title)) }
                    @if let Some(desc) = description {
                        meta name="description" content=(desc);
                    }
                    style { (PreEscaped(CSS)) }
                }
                body {
                    (site_header(&self.title, &self.nav))
                    main.site-main {
                        (content)
                    }
                    @if let Some(footer) = &self.footer {
                        footer.site-footer {
                            p { (footer) }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the site header with the home link and navigation
fn site_header(site_title: &str, nav: &[NavLink]) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (site_title) }
            @if !nav.is_empty() {
                nav.site-nav {
                    ul {
                        @for link in nav {
                            li { a href=(link.href) { (link.label) } }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> SiteShell {
        SiteShell::new(&SiteSection {
            title: "Acme".to_string(),
            description: "Acme product blog".to_string(),
            footer: "© Acme".to_string(),
            nav: vec![NavLink {
                label: "Pricing".to_string(),
                href: "/pricing".to_string(),
            }],
        })
    }

    fn page<'a>(title: &'a str, description: Option<&'a str>) -> ShellContext<'a> {
        ShellContext { title, description }
    }

    #[test]
    fn wraps_content_in_document() {
        let html = shell()
            .wrap(&page("Hello", None), html! { p { "inner" } })
            .into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Hello | Acme</title>"));
        assert!(html.contains(r#"<main class="site-main"><p>inner</p></main>"#));
    }

    #[test]
    fn header_and_footer_present() {
        let html = shell().wrap(&page("Hello", None), html! {}).into_string();

        assert!(html.contains("site-header"));
        assert!(html.contains(r#"href="/pricing""#));
        assert!(html.contains("Pricing"));
        assert!(html.contains("site-footer"));
        assert!(html.contains("© Acme"));
    }

    #[test]
    fn page_description_overrides_site() {
        let html = shell()
            .wrap(&page("Hello", Some("Post summary")), html! {})
            .into_string();
        assert!(html.contains(r#"content="Post summary""#));
        assert!(!html.contains("Acme product blog"));
    }

    #[test]
    fn site_description_is_fallback() {
        let html = shell().wrap(&page("Hello", None), html! {}).into_string();
        assert!(html.contains(r#"content="Acme product blog""#));
    }

    #[test]
    fn empty_footer_and_nav_omitted() {
        let shell = SiteShell::new(&SiteSection::default());
        let html = shell.wrap(&page("Hello", None), html! {}).into_string();

        assert!(!html.contains("site-footer"));
        assert!(!html.contains("site-nav"));
        assert!(!html.contains(r#"name="description""#));
    }

    #[test]
    fn title_escaped() {
        let html = shell()
            .wrap(&page("<script>alert('x')</script>", None), html! {})
            .into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
