//! External stylesheets referenced by a page.

use log::{debug, warn};
use url::Url;

use crate::dom::Document;

/// A `<link rel="stylesheet">` target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StylesheetRef {
    /// The `href` attribute as written.
    pub href: String,
    /// `href` resolved against the page URL.
    pub url: Url,
}

impl StylesheetRef {
    /// Last path segment, or `None` for URLs ending in `/`.
    pub fn file_name(&self) -> Option<&str> {
        self.url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
    }
}

fn is_stylesheet_link(rel: &str) -> bool {
    rel.split_ascii_whitespace()
        .any(|token| token.eq_ignore_ascii_case("stylesheet"))
}

/// Collect stylesheet links in document order, without duplicates.
///
/// Relative hrefs need `base`; when it is missing, or the href does not
/// resolve, the link is skipped with a warning.
pub fn extract_stylesheet_refs(document: &Document, base: Option<&Url>) -> Vec<StylesheetRef> {
    let mut refs: Vec<StylesheetRef> = Vec::new();
    for id in document.elements() {
        let Some(node) = document.node(id) else {
            continue;
        };
        if node.tag() != Some("link") || !node.attr("rel").is_some_and(is_stylesheet_link) {
            continue;
        }
        let Some(href) = node.attr("href").map(str::trim).filter(|href| !href.is_empty()) else {
            continue;
        };
        let resolved = match base {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        match resolved {
            Ok(url) => {
                if refs.iter().any(|known| known.url == url) {
                    debug!("Stylesheet {url} linked twice, keeping the first link");
                    continue;
                }
                refs.push(StylesheetRef {
                    href: href.to_owned(),
                    url,
                });
            }
            Err(err) => warn!("Skipping stylesheet link {href:?}: {err}"),
        }
    }
    refs
}
