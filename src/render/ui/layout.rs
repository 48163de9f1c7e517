//! Timeline body layout.
//!
//! Turns timeline rows into terminal lines around a central rail: era
//! markers become full-width rules, entries sit in their lane with the year
//! label on the opposite side. Spans carry a semantic [`SpanRole`] and the
//! renderer maps roles to theme styles.

use crate::render::ui::state::{EntryRow, TimelineRow};
use crate::timeline::Lane;

/// Narrowest width laid out; smaller terminals get clipped output
const MIN_WIDTH: usize = 21;

/// Columns used by the rail and the gaps around it
const RAIL_COLUMNS: usize = 3;

pub const EMPTY_STATE_TITLE: &str = "No theories match your search.";
pub const EMPTY_STATE_HINT: &str = "Try a different keyword or category.";
const EXPAND_HINT: &str = "▸ Enter: more";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanRole {
    Plain,
    Rail,
    Dot(Option<(u8, u8, u8)>),
    EraRule,
    EraLabel,
    Year,
    Category(Option<(u8, u8, u8)>),
    Title,
    Author,
    Description,
    Source,
    Hint,
    EmptyTitle,
    EmptyHint,
}

impl SpanRole {
    /// Roles that make up an entry's card
    pub fn is_card(self) -> bool {
        matches!(
            self,
            SpanRole::Category(_)
                | SpanRole::Title
                | SpanRole::Author
                | SpanRole::Description
                | SpanRole::Source
                | SpanRole::Hint
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSpan {
    pub text: String,
    pub role: SpanRole,
}

impl LayoutSpan {
    fn new(text: impl Into<String>, role: SpanRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutLine {
    pub spans: Vec<LayoutSpan>,
    /// Part of the focused entry
    pub focused: bool,
    /// Filtered position of the entry this line belongs to
    pub entry: Option<usize>,
}

impl LayoutLine {
    /// Concatenated text of all spans
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// Laid-out body plus the line range of the focused entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimelineLayout {
    pub lines: Vec<LayoutLine>,
    /// Half-open line range, including the era marker directly above the entry
    pub focus_span: Option<(usize, usize)>,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    width: usize,
    left: usize,
    right: usize,
}

impl Columns {
    fn new(width: u16) -> Self {
        let width = usize::from(width).max(MIN_WIDTH);
        let left = (width - RAIL_COLUMNS) / 2;
        Self {
            width,
            left,
            right: width - RAIL_COLUMNS - left,
        }
    }

    fn card_width(self, lane: Lane) -> usize {
        match lane {
            Lane::Left => self.left,
            Lane::Right => self.right,
        }
    }
}

/// Lay out `rows` for a terminal `width` columns wide
pub fn layout_timeline(rows: &[TimelineRow], focus: usize, width: u16) -> TimelineLayout {
    let columns = Columns::new(width);
    let mut layout = TimelineLayout::default();

    if rows.is_empty() {
        layout.lines = empty_state(columns);
        return layout;
    }

    let mut marker_line: Option<usize> = None;
    for row in rows {
        match row {
            TimelineRow::EraMarker(label) => {
                marker_line = Some(layout.lines.len());
                layout.lines.push(era_marker(label, columns));
            }
            TimelineRow::Entry(entry) => {
                let start = layout.lines.len();
                let focused = entry.index == focus;
                layout.lines.extend(entry_lines(entry, focused, columns));
                if focused {
                    layout.focus_span = Some((marker_line.unwrap_or(start), layout.lines.len()));
                }
                marker_line = None;
            }
        }
    }

    layout
}

fn empty_state(columns: Columns) -> Vec<LayoutLine> {
    vec![
        LayoutLine::default(),
        LayoutLine {
            spans: vec![LayoutSpan::new(
                center(EMPTY_STATE_TITLE, columns.width),
                SpanRole::EmptyTitle,
            )],
            ..LayoutLine::default()
        },
        LayoutLine {
            spans: vec![LayoutSpan::new(
                center(EMPTY_STATE_HINT, columns.width),
                SpanRole::EmptyHint,
            )],
            ..LayoutLine::default()
        },
    ]
}

fn era_marker(label: &str, columns: Columns) -> LayoutLine {
    let mut label = format!(" {label} ");
    if char_len(&label) > columns.width {
        label = fit(&label, columns.width, false);
    }
    let fill = columns.width.saturating_sub(char_len(&label));
    let left_fill = fill / 2;

    LayoutLine {
        spans: vec![
            LayoutSpan::new("─".repeat(left_fill), SpanRole::EraRule),
            LayoutSpan::new(label, SpanRole::EraLabel),
            LayoutSpan::new("─".repeat(fill - left_fill), SpanRole::EraRule),
        ],
        ..LayoutLine::default()
    }
}

fn entry_lines(entry: &EntryRow, focused: bool, columns: Columns) -> Vec<LayoutLine> {
    let card_width = columns.card_width(entry.lane);

    let mut card = vec![
        (entry.category.clone(), SpanRole::Category(entry.color)),
        (entry.title.clone(), SpanRole::Title),
        (entry.author.clone(), SpanRole::Author),
    ];
    if entry.expanded {
        card.extend(
            wrap(&entry.description, card_width)
                .into_iter()
                .map(|line| (line, SpanRole::Description)),
        );
        if let Some((label, _)) = &entry.source {
            card.push((format!("↗ {label}"), SpanRole::Source));
        }
    } else if focused {
        card.extend(
            wrap(EXPAND_HINT, card_width)
                .into_iter()
                .map(|line| (line, SpanRole::Hint)),
        );
    }

    let mut lines: Vec<LayoutLine> = card
        .into_iter()
        .enumerate()
        .map(|(position, (text, role))| {
            let (rail, year) = if position == 0 {
                (
                    LayoutSpan::new("●", SpanRole::Dot(entry.color)),
                    entry.display_year.as_str(),
                )
            } else {
                (LayoutSpan::new("│", SpanRole::Rail), "")
            };
            let mut line = lane_line(entry.lane, columns, (&text, role), year, rail);
            line.focused = focused;
            line
        })
        .collect();

    // Spacer between entries keeps the rail continuous
    lines.push(lane_line(
        entry.lane,
        columns,
        ("", SpanRole::Plain),
        "",
        LayoutSpan::new("│", SpanRole::Rail),
    ));
    for line in &mut lines {
        line.entry = Some(entry.index);
    }
    lines
}

fn lane_line(
    lane: Lane,
    columns: Columns,
    card: (&str, SpanRole),
    year: &str,
    rail: LayoutSpan,
) -> LayoutLine {
    let (text, role) = card;
    let (left, right) = match lane {
        Lane::Left => (
            LayoutSpan::new(fit(text, columns.left, false), role),
            LayoutSpan::new(fit(year, columns.right, false), SpanRole::Year),
        ),
        Lane::Right => (
            LayoutSpan::new(fit(year, columns.left, true), SpanRole::Year),
            LayoutSpan::new(fit(text, columns.right, false), role),
        ),
    };

    LayoutLine {
        spans: vec![
            left,
            LayoutSpan::new(" ", SpanRole::Plain),
            rail,
            LayoutSpan::new(" ", SpanRole::Plain),
            right,
        ],
        ..LayoutLine::default()
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncate to `width` characters (marking the cut with `…`) and pad.
fn fit(text: &str, width: usize, align_right: bool) -> String {
    let len = char_len(text);
    let body: String = if len > width {
        if width == 0 {
            String::new()
        } else {
            text.chars().take(width - 1).chain(['…']).collect()
        }
    } else {
        text.to_string()
    };

    let padding = " ".repeat(width.saturating_sub(char_len(&body)));
    if align_right {
        padding + &body
    } else {
        body + &padding
    }
}

fn center(text: &str, width: usize) -> String {
    let indent = width.saturating_sub(char_len(text)) / 2;
    format!("{}{}", " ".repeat(indent), text)
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            char_len(&current) + 1 + word.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
