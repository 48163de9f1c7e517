//! Timeline pipeline: filter → group → lanes, plus the interactive state.
//!
//! Everything derived from the catalog (the filtered sequence, era markers,
//! lanes) is rebuilt from scratch by [`TimelineModel::snapshot`] whenever the
//! search text or category changes. Nothing derived is stored on the
//! theories themselves.

pub mod filter;
pub mod group;
pub mod lane;
pub mod selection;

pub use filter::{filter, CategoryFilter, SearchQuery, ALL_CATEGORIES};
pub use group::{group, EntryNode, RenderNode};
pub use lane::Lane;
pub use selection::Selection;

use crate::catalog::{Catalog, Category, Theory, TheoryId};

/// Interactive inputs to the pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineModel {
    search: String,
    category: CategoryFilter,
    selection: Selection,
}

impl TimelineModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a search text and category name (`"All"` for no restriction)
    pub fn with_filters(search: impl Into<String>, category: &str) -> Self {
        Self {
            search: search.into(),
            category: CategoryFilter::from_name(category),
            selection: Selection::new(),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Activate a category, or reset to All if it is already active
    pub fn toggle_category(&mut self, name: &str) {
        self.category.toggle(name);
    }

    pub fn select_all_categories(&mut self) {
        self.category = CategoryFilter::All;
    }

    /// Step through All → first category → … → last category → All
    pub fn cycle_category(&mut self, categories: &[Category], forward: bool) {
        let slots = categories.len() + 1;
        let current = match &self.category {
            CategoryFilter::All => 0,
            CategoryFilter::Only(name) => categories
                .iter()
                .position(|category| &category.name == name)
                .map_or(0, |position| position + 1),
        };
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.category = match next {
            0 => CategoryFilter::All,
            slot => CategoryFilter::Only(categories[slot - 1].name.clone()),
        };
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_selection(&mut self, id: TheoryId) {
        self.selection.toggle(id);
    }

    pub fn is_expanded(&self, id: TheoryId) -> bool {
        self.selection.is_expanded(id)
    }

    /// Run the pipeline against the current inputs
    pub fn snapshot<'a>(&self, catalog: &'a Catalog) -> TimelineSnapshot<'a> {
        let filtered = filter(&catalog.theories, &self.search, &self.category);
        let nodes = group(&filtered, &catalog.eras);
        log::debug!(
            "timeline snapshot: search={:?} category={} -> {} of {} theories, {} nodes",
            self.search,
            self.category.name(),
            filtered.len(),
            catalog.theories.len(),
            nodes.len()
        );
        TimelineSnapshot {
            filtered,
            nodes,
            total: catalog.theories.len(),
        }
    }
}

/// Result of one pass through the pipeline
#[derive(Debug, Clone)]
pub struct TimelineSnapshot<'a> {
    /// Matching theories in dataset order
    pub filtered: Vec<&'a Theory>,

    /// Filtered theories interleaved with era markers
    pub nodes: Vec<RenderNode<'a>>,

    /// Size of the unfiltered dataset
    pub total: usize,
}

impl<'a> TimelineSnapshot<'a> {
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.filtered.len()
    }

    /// Theory at a position in the filtered sequence
    pub fn entry(&self, index: usize) -> Option<&'a Theory> {
        self.filtered.get(index).copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = &EntryNode<'a>> {
        self.nodes.iter().filter_map(RenderNode::as_entry)
    }

    pub fn era_labels(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            RenderNode::EraMarker { label } => Some(*label),
            RenderNode::Entry(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin::builtin_catalog;

    fn categories() -> Vec<Category> {
        ["Philosophy", "Physics"]
            .iter()
            .map(|name| Category {
                name: name.to_string(),
                color: "#ffffff".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_cycle_category_forward_wraps() {
        let categories = categories();
        let mut model = TimelineModel::new();

        model.cycle_category(&categories, true);
        assert_eq!(model.category().name(), "Philosophy");
        model.cycle_category(&categories, true);
        assert_eq!(model.category().name(), "Physics");
        model.cycle_category(&categories, true);
        assert_eq!(model.category(), &CategoryFilter::All);
    }

    #[test]
    fn test_cycle_category_backward_wraps() {
        let categories = categories();
        let mut model = TimelineModel::new();

        model.cycle_category(&categories, false);
        assert_eq!(model.category().name(), "Physics");
        model.cycle_category(&categories, false);
        assert_eq!(model.category().name(), "Philosophy");
    }

    #[test]
    fn test_cycle_from_unknown_category_restarts() {
        let categories = categories();
        let mut model = TimelineModel::with_filters("", "Astrology");
        model.cycle_category(&categories, true);
        assert_eq!(model.category().name(), "Philosophy");
    }

    #[test]
    fn test_snapshot_reflects_filters() {
        let catalog = builtin_catalog().unwrap();
        let mut model = TimelineModel::new();

        let all = model.snapshot(&catalog);
        assert_eq!(all.entry_count(), catalog.len());
        assert_eq!(all.total, catalog.len());

        model.toggle_category("Physics");
        let physics = model.snapshot(&catalog);
        assert_eq!(physics.entry_count(), 1);
        assert_eq!(
            physics.entry(0).unwrap().title,
            "Orchestrated Objective Reduction"
        );
        assert_eq!(
            physics.era_labels().collect::<Vec<_>>(),
            vec!["Late 20th Century"]
        );

        model.set_search("nonexistent-keyword-xyz");
        let none = model.snapshot(&catalog);
        assert!(none.is_empty());
        assert!(none.nodes.is_empty());
    }

    #[test]
    fn test_selection_survives_filter_changes() {
        let catalog = builtin_catalog().unwrap();
        let mut model = TimelineModel::new();
        let chalmers = catalog
            .theories
            .iter()
            .find(|t| t.author == "David Chalmers")
            .unwrap()
            .id;

        model.toggle_selection(chalmers);
        model.toggle_category("Physics");
        assert!(model
            .snapshot(&catalog)
            .entries()
            .all(|entry| entry.theory.id != chalmers));
        assert!(model.is_expanded(chalmers));

        model.toggle_category("Physics");
        assert!(model
            .snapshot(&catalog)
            .entries()
            .any(|entry| entry.theory.id == chalmers && model.is_expanded(entry.theory.id)));
    }
}
