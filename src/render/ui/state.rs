//! UI state management structures
//!
//! `ViewState` holds everything the terminal renderer draws: the rows built
//! from the latest timeline snapshot, their laid-out lines, focus and scroll
//! position, and the status line. It never runs the pipeline itself.

use crate::catalog::{Category, TheoryId};
use crate::render::ui::layout::{layout_timeline, TimelineLayout};
use crate::timeline::{CategoryFilter, EntryNode, Lane, RenderNode, Selection, TimelineSnapshot};

/// Lines used by the header (title + category bar)
pub const HEADER_HEIGHT: u16 = 2;

/// Lines used by the status line
pub const STATUS_HEIGHT: u16 = 1;

/// Height of a collapsed entry, used to size page jumps
const COLLAPSED_ENTRY_LINES: usize = 4;

/// Owned copy of an entry node, ready for layout
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub id: TheoryId,
    pub index: usize,
    pub lane: Lane,
    pub title: String,
    pub author: String,
    pub category: String,
    pub display_year: String,
    pub description: String,
    pub color: Option<(u8, u8, u8)>,
    /// (label, url)
    pub source: Option<(String, String)>,
    pub expanded: bool,
}

impl EntryRow {
    pub fn from_node(node: &EntryNode<'_>, expanded: bool) -> Self {
        let theory = node.theory;
        Self {
            id: theory.id,
            index: node.index,
            lane: node.lane,
            title: theory.title.clone(),
            author: theory.author.clone(),
            category: theory.category.clone(),
            display_year: theory.display_year.clone(),
            description: theory.description.clone(),
            color: theory.rgb(),
            source: theory
                .source()
                .map(|link| (link.label.to_string(), link.url.to_string())),
            expanded,
        }
    }
}

/// Row of the timeline body
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineRow {
    EraMarker(String),
    Entry(EntryRow),
}

impl TimelineRow {
    /// Copy a snapshot into owned rows, merging in the selection state
    pub fn from_snapshot(snapshot: &TimelineSnapshot<'_>, selection: &Selection) -> Vec<Self> {
        snapshot
            .nodes
            .iter()
            .map(|node| match node {
                RenderNode::EraMarker { label } => TimelineRow::EraMarker(label.to_string()),
                RenderNode::Entry(entry) => TimelineRow::Entry(EntryRow::from_node(
                    entry,
                    selection.is_expanded(entry.theory.id),
                )),
            })
            .collect()
    }
}

/// Keys `1`..`9` bind the first nine categories
const MAX_KEYED_CATEGORIES: usize = 9;

/// One selectable category in the header bar
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChip {
    /// Key that toggles this category, `' '` when it has none
    pub key: char,
    pub name: String,
    pub color: Option<(u8, u8, u8)>,
    pub active: bool,
}

impl CategoryChip {
    /// "All" first, then one chip per category.
    ///
    /// Only the first nine categories get a digit key; the rest are reached
    /// with Tab or by clicking their chip.
    pub fn build(categories: &[Category], active: &CategoryFilter) -> Vec<Self> {
        let mut chips = vec![CategoryChip {
            key: '0',
            name: CategoryFilter::All.name().to_string(),
            color: None,
            active: *active == CategoryFilter::All,
        }];
        chips.extend(categories.iter().enumerate().map(|(position, category)| {
            let key = if position < MAX_KEYED_CATEGORIES {
                char::from_digit(position as u32 + 1, 10).unwrap_or(' ')
            } else {
                ' '
            };
            CategoryChip {
                key,
                name: category.name.clone(),
                color: category.rgb(),
                active: active.matches(&category.name) && *active != CategoryFilter::All,
            }
        }));
        chips
    }

    /// Text drawn for the chip in the category bar
    pub fn label(&self) -> String {
        if self.key == ' ' {
            format!(" {} ", self.name)
        } else {
            format!(" {} {} ", self.key, self.name)
        }
    }
}

/// Columns between chips in the category bar
pub const CHIP_GAP: usize = 1;

/// What a mouse click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Chip position in the category bar; 0 is "All"
    Category(usize),
    /// Filtered position of an entry
    Entry(usize),
}

/// View state for rendering
#[derive(Debug)]
pub struct ViewState {
    /// Heading shown in the header
    pub title: String,

    /// Timeline rows from the latest snapshot
    pub rows: Vec<TimelineRow>,

    /// Rows laid out for the current width
    pub layout: TimelineLayout,

    /// Category bar contents
    pub categories: Vec<CategoryChip>,

    /// Position of the focused entry within the filtered sequence
    pub focus: usize,

    /// First layout line shown in the body
    pub scroll_top: usize,

    /// Number of entries that passed the filter
    pub visible_count: usize,

    /// Size of the unfiltered dataset
    pub total_count: usize,

    /// Years between the earliest and the latest theory
    pub year_span: Option<u32>,

    /// Name of the active category filter
    pub category: String,

    /// Committed search text
    pub search: String,

    /// Status line content
    pub status_line: StatusLine,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(title: impl Into<String>, viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
            layout: TimelineLayout::default(),
            categories: Vec::new(),
            focus: 0,
            scroll_top: 0,
            visible_count: 0,
            total_count: 0,
            year_span: None,
            category: CategoryFilter::All.name().to_string(),
            search: String::new(),
            status_line: StatusLine::new(),
            viewport_width,
            viewport_height,
        }
    }

    /// Lines available for the timeline body
    pub fn body_height(&self) -> usize {
        self.viewport_height
            .saturating_sub(HEADER_HEIGHT + STATUS_HEIGHT)
            .into()
    }

    /// Number of entries a page jump moves the focus by
    pub fn entries_per_page(&self) -> usize {
        (self.body_height() / COLLAPSED_ENTRY_LINES).max(1)
    }

    /// Replace the timeline rows, clamping focus and re-laying out
    pub fn update_timeline(
        &mut self,
        rows: Vec<TimelineRow>,
        visible_count: usize,
        total_count: usize,
    ) {
        self.rows = rows;
        self.visible_count = visible_count;
        self.total_count = total_count;
        self.focus = self.focus.min(visible_count.saturating_sub(1));
        self.relayout();
    }

    /// Id of the entry under the focus, if any entry is visible
    pub fn focused_id(&self) -> Option<TheoryId> {
        self.rows.iter().find_map(|row| match row {
            TimelineRow::Entry(entry) if entry.index == self.focus => Some(entry.id),
            _ => None,
        })
    }

    /// Move focus by `delta` entries, clamped to the visible range
    pub fn move_focus(&mut self, delta: isize) {
        let last = self.visible_count.saturating_sub(1);
        let target = if delta.is_negative() {
            self.focus.saturating_sub(delta.unsigned_abs())
        } else {
            self.focus.saturating_add(delta as usize)
        };
        self.set_focus(target.min(last));
    }

    /// Focus the entry at filtered position `index`, clamped to the visible range
    pub fn focus_entry(&mut self, index: usize) {
        self.set_focus(index.min(self.visible_count.saturating_sub(1)));
    }

    pub fn focus_first(&mut self) {
        self.set_focus(0);
    }

    pub fn focus_last(&mut self) {
        self.set_focus(self.visible_count.saturating_sub(1));
    }

    fn set_focus(&mut self, focus: usize) {
        if focus != self.focus {
            self.focus = focus;
            self.relayout();
        }
    }

    /// Update terminal dimensions; returns true if they changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;

        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
            self.relayout();
        }

        changed
    }

    /// Resolve a click at terminal cell (`column`, `row`)
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ClickTarget> {
        let column = usize::from(column);

        if row < HEADER_HEIGHT {
            // Line 0 is the title, line 1 the category bar
            if row != 1 {
                return None;
            }
            let mut start = 0;
            for (position, chip) in self.categories.iter().enumerate() {
                let end = start + chip.label().chars().count();
                if (start..end).contains(&column) {
                    return Some(ClickTarget::Category(position));
                }
                start = end + CHIP_GAP;
            }
            return None;
        }

        let body_row = usize::from(row - HEADER_HEIGHT);
        if body_row >= self.body_height() {
            return None;
        }
        self.layout
            .lines
            .get(self.scroll_top + body_row)
            .and_then(|line| line.entry)
            .map(ClickTarget::Entry)
    }

    fn relayout(&mut self) {
        self.layout = layout_timeline(&self.rows, self.focus, self.viewport_width);
        self.scroll_to_focus();
    }

    /// Adjust `scroll_top` so the focused entry is on screen
    fn scroll_to_focus(&mut self) {
        let height = self.body_height();
        let max_top = self.layout.lines.len().saturating_sub(height);

        if let Some((start, end)) = self.layout.focus_span {
            if start < self.scroll_top {
                self.scroll_top = start;
            } else if end > self.scroll_top + height {
                // Entries taller than the viewport show their first line
                self.scroll_top = end.saturating_sub(height).min(start);
            }
        } else {
            self.scroll_top = 0;
        }

        self.scroll_top = self.scroll_top.min(max_top);
    }

    /// Format the status line for this view state
    pub fn format_status_line(&self) -> String {
        self.status_line.format_status_line(
            self.visible_count,
            self.total_count,
            &self.category,
            &self.search,
        )
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
    /// Buffer shown while the search prompt is open
    pub search_prompt: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn set_search_prompt(&mut self, buffer: String) {
        self.search_prompt = Some(buffer);
    }

    pub fn clear_search_prompt(&mut self) {
        self.search_prompt = None;
    }

    /// "12 of 30 | Neuroscience | /bat" style summary, or the open prompt
    pub fn format_status_line(
        &self,
        visible: usize,
        total: usize,
        category: &str,
        search: &str,
    ) -> String {
        if let Some(buffer) = &self.search_prompt {
            return format!("/{buffer}");
        }

        let mut status = format!("{visible} of {total} | {category}");
        if !search.is_empty() {
            status.push_str(&format!(" | /{search}"));
        }
        if let Some(message) = &self.message {
            status.push_str(&format!(" | {message}"));
        }
        status
    }
}
