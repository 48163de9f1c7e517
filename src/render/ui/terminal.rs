//! Terminal UI implementation using ratatui
//!
//! Concrete `UIRenderer` drawing the header, the laid-out timeline body and
//! the status line. Layout decisions live in the layout module; this file only
//! maps lines and roles onto ratatui widgets.

use crate::error::{MindlineError, Result};
use crate::render::ui::layout::LayoutLine;
use crate::render::ui::state::{
    CategoryChip, ViewState, CHIP_GAP, HEADER_HEIGHT, STATUS_HEIGHT,
};
use crate::render::ui::{ColorTheme, UIRenderer};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    fn render_header(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let category_count = view_state.categories.len().saturating_sub(1);
        let mut stats = format!(
            "  {} theories · {} categories",
            view_state.total_count, category_count
        );
        if let Some(span) = view_state.year_span {
            stats.push_str(&format!(" · {}", format_year_span(span)));
        }
        let title = Line::from(vec![
            Span::styled(view_state.title.as_str(), theme.title),
            Span::styled(stats, theme.year),
        ]);
        let chips = Line::from(chip_spans(&view_state.categories, theme));
        frame.render_widget(Paragraph::new(vec![title, chips]), area);
    }

    fn render_body(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let lines: Vec<Line> = view_state
            .layout
            .lines
            .iter()
            .skip(view_state.scroll_top)
            .take(usize::from(area.height))
            .map(|line| styled_line(line, theme))
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status_text = view_state.format_status_line();
        let status = Paragraph::new(status_text.as_str()).style(theme.status_style());
        frame.render_widget(status, area);

        // Place the cursor after the prompt while typing a search
        if let Some(buffer) = &view_state.status_line.search_prompt {
            let offset = u16::try_from(buffer.chars().count() + 1).unwrap_or(u16::MAX);
            let x = area.x.saturating_add(offset).min(area.right().saturating_sub(1));
            frame.set_cursor(x, area.y);
        }
    }
}

/// "2,500+ years" style header stat, rounded down to 500 years
fn format_year_span(span: u32) -> String {
    if span < 500 {
        return format!("{span} years");
    }
    let rounded = span / 500 * 500;
    let (thousands, rest) = (rounded / 1000, rounded % 1000);
    if thousands > 0 {
        format!("{thousands},{rest:03}+ years")
    } else {
        format!("{rest}+ years")
    }
}

fn chip_spans<'a>(chips: &'a [CategoryChip], theme: &ColorTheme) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(chips.len() * 2);
    for chip in chips {
        spans.push(Span::styled(
            chip.label(),
            theme.chip_style(chip.color, chip.active),
        ));
        spans.push(Span::raw(" ".repeat(CHIP_GAP)));
    }
    spans
}

fn styled_line<'a>(line: &'a LayoutLine, theme: &ColorTheme) -> Line<'a> {
    Line::from(
        line.spans
            .iter()
            .map(|span| Span::styled(span.text.as_str(), theme.span_style(span.role, line.focused)))
            .collect::<Vec<_>>(),
    )
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            // Extract theme before closure to avoid borrowing issues
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(HEADER_HEIGHT),
                        Constraint::Min(0),
                        Constraint::Length(STATUS_HEIGHT),
                    ])
                    .split(frame.size());

                Self::render_header(frame, chunks[0], view_state, theme);
                Self::render_body(frame, chunks[1], view_state, theme);
                Self::render_status(frame, chunks[2], view_state, theme);
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()
            .map_err(|e| MindlineError::ui(format!("cannot enable raw mode: {e}")))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        self.terminal = Some(terminal);
        log::debug!("terminal initialized");

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            terminal.show_cursor()?;
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            log::debug!("terminal restored");
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ui::layout::{LayoutSpan, SpanRole};
    use ratatui::style::Color;

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new().unwrap();
        assert!(ui.terminal.is_none());
        assert_eq!(ui.theme.status_bg, Color::Blue);

        let ui = TerminalUI::with_theme(ColorTheme::monochrome()).unwrap();
        assert_eq!(ui.theme.status_bg, Color::Black);
    }

    #[test]
    fn test_render_without_terminal_is_noop() {
        let mut ui = TerminalUI::new().unwrap();
        let state = ViewState::new("Timeline", 80, 24);
        assert!(ui.render(&state).is_ok());
        assert!(ui.cleanup().is_ok());
    }

    #[test]
    fn test_chip_spans() {
        let theme = ColorTheme::default();
        let chips = vec![
            CategoryChip {
                key: '0',
                name: "All".to_string(),
                color: None,
                active: true,
            },
            CategoryChip {
                key: '1',
                name: "Physics".to_string(),
                color: Some((251, 191, 36)),
                active: false,
            },
        ];
        let spans = chip_spans(&chips, &theme);
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].content, " 0 All ");
        assert_eq!(spans[0].style, theme.active_chip);
        assert_eq!(spans[2].style.fg, Some(Color::Rgb(251, 191, 36)));
    }

    #[test]
    fn test_format_year_span() {
        assert_eq!(format_year_span(2621), "2,500+ years");
        assert_eq!(format_year_span(3000), "3,000+ years");
        assert_eq!(format_year_span(740), "500+ years");
        assert_eq!(format_year_span(120), "120 years");
    }

    #[test]
    fn test_styled_line_keeps_text() {
        let theme = ColorTheme::default();
        let line = LayoutLine {
            spans: vec![
                LayoutSpan {
                    text: "Title".to_string(),
                    role: SpanRole::Title,
                },
                LayoutSpan {
                    text: " │ ".to_string(),
                    role: SpanRole::Rail,
                },
            ],
            focused: true,
            entry: Some(0),
        };
        let styled = styled_line(&line, &theme);
        assert_eq!(styled.spans.len(), 2);
        assert_eq!(styled.spans[0].content, "Title");
        assert_eq!(styled.spans[0].style.bg, Some(Color::Indexed(236)));
        assert_eq!(styled.spans[1].style.bg, None);
    }
}
