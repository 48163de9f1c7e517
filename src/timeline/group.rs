//! Era grouper: interleaves era markers with entry nodes.

use crate::catalog::{EraTable, Theory};
use crate::timeline::Lane;

/// Entry in the grouped render list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryNode<'a> {
    pub theory: &'a Theory,
    pub lane: Lane,
    /// Zero-based position within the filtered sequence
    pub index: usize,
}

/// One node of the grouped render list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderNode<'a> {
    EraMarker { label: &'a str },
    Entry(EntryNode<'a>),
}

impl<'a> RenderNode<'a> {
    pub fn as_entry(&self) -> Option<&EntryNode<'a>> {
        match self {
            RenderNode::Entry(entry) => Some(entry),
            RenderNode::EraMarker { .. } => None,
        }
    }

    pub fn is_era_marker(&self) -> bool {
        matches!(self, RenderNode::EraMarker { .. })
    }
}

/// Walk the filtered sequence once, emitting an era marker whenever the era
/// label differs from the previous entry's (and before the first entry).
///
/// The input is expected in ascending year order and is not re-sorted.
pub fn group<'a>(filtered: &[&'a Theory], eras: &'a EraTable) -> Vec<RenderNode<'a>> {
    let mut nodes = Vec::with_capacity(filtered.len() * 2);
    let mut previous_era: Option<&'a str> = None;

    for (index, &theory) in filtered.iter().enumerate() {
        let era = eras.resolve(theory.year);
        if previous_era != Some(era) {
            nodes.push(RenderNode::EraMarker { label: era });
            previous_era = Some(era);
        }

        nodes.push(RenderNode::Entry(EntryNode {
            theory,
            lane: Lane::for_index(index),
            index,
        }));
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TheoryId;

    fn theory(id: u32, year: i32) -> Theory {
        Theory {
            id: TheoryId(id),
            title: format!("Theory {id}"),
            author: "Someone".to_string(),
            description: String::new(),
            category: "Philosophy".to_string(),
            year,
            display_year: year.to_string(),
            color: "#ffffff".to_string(),
            source_url: None,
            source_label: None,
        }
    }

    fn labels(nodes: &[RenderNode<'_>]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| match node {
                RenderNode::EraMarker { label } => format!("era:{label}"),
                RenderNode::Entry(entry) => format!("entry:{}", entry.theory.id),
            })
            .collect()
    }

    #[test]
    fn test_empty_sequence_has_no_markers() {
        let eras = EraTable::standard();
        assert!(group(&[], &eras).is_empty());
    }

    #[test]
    fn test_single_entry_gets_a_marker() {
        let eras = EraTable::standard();
        let a = theory(1, 1890);
        let nodes = group(&[&a], &eras);
        assert_eq!(labels(&nodes), vec!["era:19th Century", "entry:1"]);
    }

    #[test]
    fn test_consecutive_entries_share_a_marker() {
        let eras = EraTable::standard();
        let (a, b, c) = (theory(1, 1801), theory(2, 1850), theory(3, 1905));
        let nodes = group(&[&a, &b, &c], &eras);
        assert_eq!(
            labels(&nodes),
            vec![
                "era:19th Century",
                "entry:1",
                "entry:2",
                "era:Early 20th Century",
                "entry:3"
            ]
        );
    }

    #[test]
    fn test_other_era_and_repeated_labels() {
        let eras = EraTable::standard();
        let (a, b, c) = (theory(1, -350), theory(2, 1020), theory(3, 1641));
        let nodes = group(&[&a, &b, &c], &eras);
        assert_eq!(
            labels(&nodes),
            vec![
                "era:Ancient World",
                "entry:1",
                "era:Other",
                "entry:2",
                "era:Early Modern Period",
                "entry:3"
            ]
        );
    }

    #[test]
    fn test_entries_carry_index_and_lane() {
        let eras = EraTable::standard();
        let (a, b, c) = (theory(1, 1890), theory(2, 1995), theory(3, 1996));
        let nodes = group(&[&a, &b, &c], &eras);
        let entries: Vec<_> = nodes.iter().filter_map(RenderNode::as_entry).collect();

        assert_eq!(entries.len(), 3);
        assert_eq!((entries[0].index, entries[0].lane), (0, Lane::Left));
        assert_eq!((entries[1].index, entries[1].lane), (1, Lane::Right));
        assert_eq!((entries[2].index, entries[2].lane), (2, Lane::Left));
        assert_eq!(nodes.iter().filter(|n| n.is_era_marker()).count(), 2);
    }
}
