//! Static timeline data: theory records, categories and the era table.
//!
//! A [`Catalog`] is loaded once at startup (either the built-in dataset or a
//! user supplied TOML file) and is read-only for the rest of the program.

pub mod builtin;
pub mod era;
pub mod loader;
pub mod theory;

pub use era::{Era, EraTable, OTHER_ERA_LABEL};
pub use loader::{load_catalog, parse_catalog};
pub use theory::{parse_hex_color, Category, SourceLink, Theory, TheoryId};

/// The complete, validated dataset the timeline is built from.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Heading shown above the timeline
    pub title: String,

    /// Theories in ascending year order
    pub theories: Vec<Theory>,

    /// Known categories in display order
    pub categories: Vec<Category>,

    /// Era boundaries used to segment the timeline
    pub eras: EraTable,
}

impl Catalog {
    /// Number of theories in the dataset
    pub fn len(&self) -> usize {
        self.theories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theories.is_empty()
    }

    /// Look up a category by exact name
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Look up a theory by identifier
    pub fn theory(&self, id: TheoryId) -> Option<&Theory> {
        self.theories.iter().find(|theory| theory.id == id)
    }

    /// Years between the earliest and the latest theory
    pub fn year_span(&self) -> Option<u32> {
        let first = self.theories.first()?;
        let last = self.theories.last()?;
        Some(last.year.abs_diff(first.year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_span() {
        let catalog = builtin::builtin_catalog().unwrap();
        assert_eq!(catalog.year_span(), Some(2621));

        let empty = Catalog {
            theories: Vec::new(),
            ..catalog
        };
        assert_eq!(empty.year_span(), None);
    }
}
