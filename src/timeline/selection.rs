//! Exclusive, self-cancelling selection of the expanded entry.

use crate::catalog::TheoryId;

/// Which entry, if any, is expanded.
///
/// The identifier is not checked against the dataset or the current filter:
/// a selection that is filtered out stays in place and shows up expanded
/// again once the entry is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    expanded: Option<TheoryId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse `id` if it is expanded, otherwise expand it (collapsing any other)
    pub fn toggle(&mut self, id: TheoryId) {
        self.expanded = if self.expanded == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn is_expanded(&self, id: TheoryId) -> bool {
        self.expanded == Some(id)
    }

    pub fn expanded(&self) -> Option<TheoryId> {
        self.expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut selection = Selection::new();
        selection.toggle(TheoryId(3));
        selection.toggle(TheoryId(3));
        assert_eq!(selection, Selection::new());

        selection.toggle(TheoryId(1));
        let before = selection;
        selection.toggle(TheoryId(2));
        selection.toggle(TheoryId(2));
        // Toggling B twice leaves nothing selected, not A
        assert_ne!(selection, before);
        assert_eq!(selection.expanded(), None);
    }

    #[test]
    fn test_selection_is_exclusive() {
        let mut selection = Selection::new();
        selection.toggle(TheoryId(1));
        selection.toggle(TheoryId(2));
        assert!(!selection.is_expanded(TheoryId(1)));
        assert!(selection.is_expanded(TheoryId(2)));
    }

    #[test]
    fn test_unknown_ids_are_accepted() {
        let mut selection = Selection::new();
        selection.toggle(TheoryId(9999));
        assert!(selection.is_expanded(TheoryId(9999)));
    }
}
