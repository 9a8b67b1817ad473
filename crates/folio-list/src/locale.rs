//! User-facing strings.
//!
//! Fetch failures never reach users verbatim; the engine asks a
//! [`Messages`] implementation for the text to show instead.

use crate::filter::CategoryId;

/// Maps engine events to user-facing text.
pub trait Messages: Send + Sync + 'static {
    /// Shown when a list fetch fails.
    fn list_failed(&self) -> String;
    /// Shown when the category list cannot be loaded.
    fn categories_failed(&self) -> String;
    /// Describes an active search term in a filter summary.
    fn search_summary(&self, term: &str) -> String;
    /// Describes an active category in a filter summary.
    fn category_summary(&self, category: &CategoryId) -> String;
}

/// Built-in translations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Thai,
    English,
}

impl Messages for Locale {
    fn list_failed(&self) -> String {
        match self {
            Locale::Thai => "ไม่สามารถโหลดบทความได้".to_string(),
            Locale::English => "Unable to load articles".to_string(),
        }
    }

    fn categories_failed(&self) -> String {
        match self {
            Locale::Thai => "ไม่สามารถโหลดหมวดหมู่ได้".to_string(),
            Locale::English => "Unable to load categories".to_string(),
        }
    }

    fn search_summary(&self, term: &str) -> String {
        match self {
            Locale::Thai => format!("ค้นหา: \"{term}\""),
            Locale::English => format!("Search: \"{term}\""),
        }
    }

    fn category_summary(&self, category: &CategoryId) -> String {
        match self {
            Locale::Thai => format!("หมวดหมู่: {category}"),
            Locale::English => format!("Category: {category}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_summaries() {
        let en = Locale::English;
        assert_eq!(en.search_summary("cats"), "Search: \"cats\"");
        assert_eq!(en.category_summary(&CategoryId::from(3u64)), "Category: 3");
    }

    #[test]
    fn thai_is_default() {
        assert_eq!(Locale::default().list_failed(), "ไม่สามารถโหลดบทความได้");
    }
}
