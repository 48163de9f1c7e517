//! Terminal rendering components.
//!
//! This module hosts the concrete terminal UI implementation along with the supporting view/state
//! structures, the timeline layout and styling utilities.

pub mod layout;
pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use layout::{layout_timeline, LayoutLine, LayoutSpan, SpanRole, TimelineLayout};
pub use renderer::UIRenderer;
pub use state::{CategoryChip, ClickTarget, EntryRow, StatusLine, TimelineRow, ViewState};
pub use terminal::TerminalUI;
pub use theme::{ColorTheme, ThemeName};

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
