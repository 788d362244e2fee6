//! HTML content extractor
//!
//! This module parses a fetched page body and extracts:
//! - Page title and `<meta>` description, author and keywords
//! - Heading text grouped by level (h1, h2, h3)
//! - Raw outbound link strings from `<a href>` tags
//!
//! Links are returned unresolved; resolving them against the page URL is the
//! scheduler's job, since it also owns the reverse link graph.

use crate::state::{HeadingLevel, SiteBody};
use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    /// Structured page content
    pub body: SiteBody,

    /// Raw `href` values, in document order
    pub links: Vec<String>,
}

impl ExtractedPage {
    /// Iterates the raw outbound links without copying them
    pub fn outbound_links(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }
}

/// Parses HTML content and extracts page fields and links
///
/// # Extraction Rules
///
/// - `title`: text of the first `<title>`, trimmed; None if empty
/// - `description`, `author`: `content` of the matching `<meta name=...>`
/// - `keywords`: `<meta name="keywords">` split on runs of spaces and commas
/// - `headings`: trimmed text of every h1/h2/h3 element, empty ones skipped
/// - `links`: `href` of every `<a href>` element
///
/// # Example
///
/// ```
/// use refcrawl::crawler::extract_page;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let page = extract_page(html);
/// assert_eq!(page.body.title, Some("Test".to_string()));
/// assert_eq!(page.links, vec!["/page".to_string()]);
/// ```
pub fn extract_page(html: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    let mut body = SiteBody {
        keywords: meta_content(&document, "keywords")
            .map(|content| split_keywords(&content))
            .unwrap_or_default(),
        description: meta_content(&document, "description"),
        author: meta_content(&document, "author"),
        title: extract_title(&document),
        ..SiteBody::default()
    };

    for level in HeadingLevel::ALL {
        body.headings.insert(level, extract_text(&document, level.tag()));
    }

    let links = extract_links(&document);

    ExtractedPage { body, links }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Reads the `content` attribute of `<meta name="{name}">`
fn meta_content(document: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!("meta[name=\"{}\"]", name)).ok()?;

    document
        .select(&selector)
        .find_map(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
}

/// Splits a keywords attribute on runs of spaces and commas
fn split_keywords(content: &str) -> Vec<String> {
    content
        .split(|c: char| c == ' ' || c == ',')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collects the trimmed text of every element matching `tag`
fn extract_text(document: &Html, tag: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(tag) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Extracts every raw `href` from `<a>` tags
fn extract_links(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
