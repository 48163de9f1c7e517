//! Filter engine: search text + category → filtered sequence.

use crate::catalog::Theory;
use memchr::memmem::Finder;

/// Sentinel category name meaning "no category restriction"
pub const ALL_CATEGORIES: &str = "All";

/// Active category selector
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Build a filter from a category name; the literal `"All"` selects everything.
    ///
    /// Unknown names are kept as-is and simply match nothing.
    pub fn from_name(name: &str) -> Self {
        if name == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(name) => name,
        }
    }

    /// Exact, case-sensitive comparison against a theory's category
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(name) => name == category,
        }
    }

    /// Activate `name`, or fall back to `All` if it is already active.
    pub fn toggle(&mut self, name: &str) {
        let next = Self::from_name(name);
        *self = if *self == next && next != Self::All {
            Self::All
        } else {
            next
        };
    }
}

/// Lower-cased search needle, compiled once per filter pass
pub struct SearchQuery {
    finder: Option<Finder<'static>>,
}

impl SearchQuery {
    /// Whitespace is significant; the text is matched literally.
    pub fn new(text: &str) -> Self {
        let finder = if text.is_empty() {
            None
        } else {
            Some(Finder::new(text.to_lowercase().as_bytes()).into_owned())
        };
        Self { finder }
    }

    pub fn is_empty(&self) -> bool {
        self.finder.is_none()
    }

    /// True if title, author or description contains the needle
    pub fn matches(&self, theory: &Theory) -> bool {
        let Some(finder) = &self.finder else {
            return true;
        };
        [&theory.title, &theory.author, &theory.description]
            .into_iter()
            .any(|field| finder.find(field.to_lowercase().as_bytes()).is_some())
    }
}

/// Select the theories matching both the search text and the category.
///
/// Output preserves dataset order. An empty result is a normal outcome.
pub fn filter<'a>(
    theories: &'a [Theory],
    search: &str,
    category: &CategoryFilter,
) -> Vec<&'a Theory> {
    let query = SearchQuery::new(search);
    theories
        .iter()
        .filter(|theory| category.matches(&theory.category) && query.matches(theory))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TheoryId;

    fn theory(id: u32, title: &str, author: &str, description: &str, category: &str) -> Theory {
        Theory {
            id: TheoryId(id),
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            year: 1900 + id as i32,
            display_year: format!("{}", 1900 + id),
            color: "#ffffff".to_string(),
            source_url: None,
            source_label: None,
        }
    }

    fn dataset() -> Vec<Theory> {
        vec![
            theory(1, "Stream of Consciousness", "William James", "Thought flows", "Psychology"),
            theory(2, "Identity Theory", "U. T. Place", "Brain PROCESSES", "Philosophy"),
            theory(3, "Global Workspace", "Bernard Baars", "A theatre of the mind", "Psychology"),
        ]
    }

    fn ids(filtered: &[&Theory]) -> Vec<u32> {
        filtered.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn test_empty_search_and_all_matches_everything() {
        let data = dataset();
        assert_eq!(ids(&filter(&data, "", &CategoryFilter::All)), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let data = dataset();
        // title
        assert_eq!(ids(&filter(&data, "STREAM", &CategoryFilter::All)), vec![1]);
        // author
        assert_eq!(ids(&filter(&data, "baars", &CategoryFilter::All)), vec![3]);
        // description
        assert_eq!(ids(&filter(&data, "processes", &CategoryFilter::All)), vec![2]);
    }

    #[test]
    fn test_category_and_search_are_combined() {
        let data = dataset();
        let psychology = CategoryFilter::from_name("Psychology");
        assert_eq!(ids(&filter(&data, "", &psychology)), vec![1, 3]);
        assert_eq!(ids(&filter(&data, "theatre", &psychology)), vec![3]);
        assert!(filter(&data, "identity", &psychology).is_empty());
    }

    #[test]
    fn test_whitespace_search_is_literal() {
        let data = dataset();
        // Every title with a space matches a single space
        assert_eq!(ids(&filter(&data, " ", &CategoryFilter::All)), vec![1, 2, 3]);
        assert!(filter(&data, "   ", &CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_unknown_category_yields_empty_result() {
        let data = dataset();
        let unknown = CategoryFilter::from_name("Astrology");
        assert!(filter(&data, "", &unknown).is_empty());
        // Category comparison is exact
        let lower = CategoryFilter::from_name("psychology");
        assert!(filter(&data, "", &lower).is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let data = dataset();
        assert!(filter(&data, "nonexistent-keyword-xyz", &CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_category_filter_names() {
        assert_eq!(CategoryFilter::from_name("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.name(), "All");
        assert_eq!(CategoryFilter::from_name("Physics").name(), "Physics");
    }

    #[test]
    fn test_category_toggle_self_clears() {
        let mut category = CategoryFilter::All;
        category.toggle("Physics");
        assert_eq!(category, CategoryFilter::Only("Physics".to_string()));

        category.toggle("Neuroscience");
        assert_eq!(category, CategoryFilter::Only("Neuroscience".to_string()));

        category.toggle("Neuroscience");
        assert_eq!(category, CategoryFilter::All);

        category.toggle("All");
        assert_eq!(category, CategoryFilter::All);
    }

    #[test]
    fn test_search_query_unicode_lowercasing() {
        let entry = theory(5, "Cartesian Dualism", "René Descartes", "", "Philosophy");
        assert!(SearchQuery::new("RENÉ").matches(&entry));
        assert!(SearchQuery::new("").is_empty());
    }
}
