//! URL handling module for refcrawl
//!
//! This module resolves raw link strings found on a page against the page's URL
//! and validates that the result looks like a crawlable absolute URL.

mod resolve;
mod validate;

// Re-export main functions
pub use resolve::resolve_link;
pub use validate::validate_absolute;
