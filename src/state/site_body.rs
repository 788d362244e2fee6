use serde::Serialize;
use std::collections::BTreeMap;

/// Heading levels collected from each page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 3] = [Self::H1, Self::H2, Self::H3];

    /// CSS selector for this heading level
    pub fn tag(&self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }
}

/// Extracted content of a successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteBody {
    /// Words from `<meta name="keywords">`
    pub keywords: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Heading text grouped by level, in document order
    pub headings: BTreeMap<HeadingLevel, Vec<String>>,
}

impl Default for SiteBody {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            description: None,
            author: None,
            title: None,
            headings: HeadingLevel::ALL
                .iter()
                .map(|level| (*level, Vec::new()))
                .collect(),
        }
    }
}
