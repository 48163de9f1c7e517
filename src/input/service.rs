//! High-level input service.
//!
//! Polls crossterm, runs the timeline input state machine, and yields
//! domain-level `InputAction`s that the application loop consumes.

use crate::error::Result;
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::time::Duration;

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Current input mode (timeline navigation vs search prompt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Navigation,
    SearchInput,
}

/// Direction for focus movement between entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Up,
    Down,
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    MoveFocus {
        direction: FocusDirection,
        entries: usize,
    },
    PageUp,
    PageDown,
    GoToStart,
    GoToEnd,
    /// Expand or collapse the focused entry
    ToggleExpanded,
    StartSearch,
    /// Search text after an edit; the filter follows every keystroke
    UpdateSearch(String),
    /// Leave the prompt, keeping the search text
    FinishSearch,
    ClearSearch,
    /// Toggle the category at this zero-based position
    ToggleCategory(usize),
    ShowAllCategories,
    NextCategory,
    PreviousCategory,
    Resize {
        width: u16,
        height: u16,
    },
    /// Left click at a terminal cell; the view decides what was hit
    Click {
        column: u16,
        row: u16,
    },
    Quit,
    NoAction,
    InvalidInput,
}

/// Key bindings for the timeline view and its search prompt.
pub struct InputStateMachine {
    state: InputState,
    search_buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self::with_search("")
    }

    /// Seed the prompt buffer with a search that is already applied
    pub fn with_search(search: &str) -> Self {
        Self {
            state: InputState::Navigation,
            search_buffer: search.to_string(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        match self.state {
            InputState::Navigation => self.handle_navigation_key(key_event),
            InputState::SearchInput => self.handle_search_key(key_event),
        }
    }

    fn handle_navigation_key(&mut self, key_event: KeyEvent) -> InputAction {
        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
            (KeyCode::Char('q'), _) if plain => InputAction::Quit,
            (KeyCode::Char('j'), _) if plain => InputAction::MoveFocus {
                direction: FocusDirection::Down,
                entries: 1,
            },
            (KeyCode::Down, _) => InputAction::MoveFocus {
                direction: FocusDirection::Down,
                entries: 1,
            },
            (KeyCode::Char('k'), _) if plain => InputAction::MoveFocus {
                direction: FocusDirection::Up,
                entries: 1,
            },
            (KeyCode::Up, _) => InputAction::MoveFocus {
                direction: FocusDirection::Up,
                entries: 1,
            },
            (KeyCode::Char('f'), _) if plain => InputAction::PageDown,
            (KeyCode::PageDown, _) => InputAction::PageDown,
            (KeyCode::Char('b'), _) if plain => InputAction::PageUp,
            (KeyCode::PageUp, _) => InputAction::PageUp,
            (KeyCode::Char('g'), _) if plain => InputAction::GoToStart,
            (KeyCode::Home, _) => InputAction::GoToStart,
            (KeyCode::Char('G'), _) if plain => InputAction::GoToEnd,
            (KeyCode::End, _) => InputAction::GoToEnd,
            (KeyCode::Enter, _) => InputAction::ToggleExpanded,
            (KeyCode::Char(' '), _) if plain => InputAction::ToggleExpanded,
            (KeyCode::Char('/'), _) if plain => {
                self.state = InputState::SearchInput;
                InputAction::StartSearch
            }
            (KeyCode::Esc, _) => {
                if self.search_buffer.is_empty() {
                    InputAction::NoAction
                } else {
                    self.search_buffer.clear();
                    InputAction::ClearSearch
                }
            }
            (KeyCode::Char('0'), _) if plain => InputAction::ShowAllCategories,
            (KeyCode::Char(digit @ '1'..='9'), _) if plain => {
                InputAction::ToggleCategory(digit as usize - '1' as usize)
            }
            (KeyCode::Tab, _) => InputAction::NextCategory,
            (KeyCode::BackTab, _) => InputAction::PreviousCategory,
            _ => InputAction::InvalidInput,
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) -> InputAction {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.state = InputState::Navigation;
                self.search_buffer.clear();
                InputAction::ClearSearch
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.search_buffer.clear();
                InputAction::UpdateSearch(String::new())
            }
            (KeyCode::Enter, _) => {
                self.state = InputState::Navigation;
                InputAction::FinishSearch
            }
            (KeyCode::Backspace, _) => {
                self.search_buffer.pop();
                InputAction::UpdateSearch(self.search_buffer.clone())
            }
            (KeyCode::Char(ch), modifiers)
                if !ch.is_control()
                    && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search_buffer.push(ch);
                InputAction::UpdateSearch(self.search_buffer.clone())
            }
            _ => InputAction::InvalidInput,
        }
    }

    pub fn get_search_buffer(&self) -> &str {
        &self.search_buffer
    }

    pub fn get_state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
}

impl InputService {
    pub fn new(initial_search: &str) -> Self {
        Self {
            state_machine: InputStateMachine::with_search(initial_search),
        }
    }

    /// Wait up to `timeout` for the next meaningful action
    pub fn poll_action(&mut self, timeout: Option<Duration>) -> Result<Option<InputAction>> {
        let timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(self.process_event(event::read()?))
    }

    pub fn process_event(&mut self, event: Event) -> Option<InputAction> {
        let action = match event {
            Event::Key(key_event) => self.state_machine.handle_key_event(key_event),
            Event::Resize(width, height) => InputAction::Resize { width, height },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => InputAction::MoveFocus {
                    direction: FocusDirection::Up,
                    entries: 1,
                },
                MouseEventKind::ScrollDown => InputAction::MoveFocus {
                    direction: FocusDirection::Down,
                    entries: 1,
                },
                MouseEventKind::Down(MouseButton::Left) => InputAction::Click {
                    column: mouse.column,
                    row: mouse.row,
                },
                _ => InputAction::NoAction,
            },
            _ => InputAction::NoAction,
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new("")
    }
}
