//! Application orchestration layer
//!
//! Owns the catalog, the timeline model and the view state, applies input
//! actions one at a time and re-runs the timeline pipeline after each one.

pub mod runtime;

use crate::catalog::Catalog;
use crate::error::{MindlineError, Result};
use crate::input::{FocusDirection, InputAction};
use crate::render::ui::{CategoryChip, ClickTarget, TimelineRow, UIRenderer, ViewState};
use crate::timeline::TimelineModel;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Input poll interval used unless configured otherwise
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Application orchestrator
pub struct Application {
    catalog: Catalog,
    model: TimelineModel,
    view_state: ViewState,
    ui_renderer: Box<dyn UIRenderer>,
    poll_interval: Duration,
}

impl Application {
    /// Wire a catalog, initial filters and a renderer together
    pub fn new(
        catalog: Catalog,
        model: TimelineModel,
        ui_renderer: Box<dyn UIRenderer>,
    ) -> Result<Self> {
        let (width, height) = ui_renderer.get_terminal_size()?;
        let view_state = ViewState::new(catalog.title.as_str(), width, height);

        let mut app = Self {
            catalog,
            model,
            view_state,
            ui_renderer,
            poll_interval: DEFAULT_POLL_INTERVAL,
        };
        app.refresh();
        Ok(app)
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn model(&self) -> &TimelineModel {
        &self.model
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Run the interactive event loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (width, height) = self.ui_renderer.get_terminal_size()?;
        self.view_state.update_terminal_size(width, height);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_handle = runtime::spawn_input_thread(
            tx,
            Arc::clone(&shutdown),
            self.poll_interval,
            self.model.search().to_string(),
        );

        let mut result = self.event_loop(&mut rx).await;

        shutdown.store(true, Ordering::SeqCst);
        drop(rx);
        if input_handle.join().is_err() && result.is_ok() {
            result = Err(MindlineError::other("input thread panicked"));
        }

        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self, rx: &mut UnboundedReceiver<InputAction>) -> Result<()> {
        self.ui_renderer.render(&self.view_state)?;

        // Each action is fully applied before the next one is received
        while let Some(action) = rx.recv().await {
            if !self.process_action(action) {
                break;
            }
            self.ui_renderer.render(&self.view_state)?;
        }
        Ok(())
    }

    /// Apply one input action; returns false when the application should quit
    pub fn process_action(&mut self, action: InputAction) -> bool {
        if !matches!(action, InputAction::NoAction) {
            self.view_state.status_line.clear_message();
        }

        match action {
            InputAction::Quit => return false,

            InputAction::MoveFocus { direction, entries } => {
                let delta = isize::try_from(entries).unwrap_or(isize::MAX);
                match direction {
                    FocusDirection::Up => self.view_state.move_focus(-delta),
                    FocusDirection::Down => self.view_state.move_focus(delta),
                }
            }
            InputAction::PageUp => {
                let page = isize::try_from(self.view_state.entries_per_page()).unwrap_or(1);
                self.view_state.move_focus(-page);
            }
            InputAction::PageDown => {
                let page = isize::try_from(self.view_state.entries_per_page()).unwrap_or(1);
                self.view_state.move_focus(page);
            }
            InputAction::GoToStart => self.view_state.focus_first(),
            InputAction::GoToEnd => self.view_state.focus_last(),

            InputAction::ToggleExpanded => self.toggle_focused(),

            InputAction::StartSearch => {
                self.view_state
                    .status_line
                    .set_search_prompt(self.model.search().to_string());
            }
            InputAction::UpdateSearch(text) => {
                self.view_state.status_line.set_search_prompt(text.clone());
                self.model.set_search(text);
                self.refresh_filtered();
            }
            InputAction::FinishSearch => self.view_state.status_line.clear_search_prompt(),
            InputAction::ClearSearch => {
                self.view_state.status_line.clear_search_prompt();
                self.model.clear_search();
                self.refresh_filtered();
            }

            InputAction::ToggleCategory(position) => {
                if !self.toggle_category(position) {
                    self.view_state
                        .status_line
                        .set_message(format!("No category on key {}", position + 1));
                }
            }
            InputAction::ShowAllCategories => self.show_all_categories(),
            InputAction::NextCategory => {
                self.model.cycle_category(&self.catalog.categories, true);
                self.refresh_filtered();
            }
            InputAction::PreviousCategory => {
                self.model.cycle_category(&self.catalog.categories, false);
                self.refresh_filtered();
            }

            InputAction::Resize { width, height } => {
                self.view_state.update_terminal_size(width, height);
            }

            InputAction::Click { column, row } => match self.view_state.hit_test(column, row) {
                Some(ClickTarget::Entry(index)) => {
                    self.view_state.focus_entry(index);
                    self.toggle_focused();
                }
                Some(ClickTarget::Category(0)) => self.show_all_categories(),
                Some(ClickTarget::Category(chip)) => {
                    self.toggle_category(chip - 1);
                }
                None => {}
            },

            InputAction::NoAction | InputAction::InvalidInput => {}
        }

        true
    }

    fn toggle_focused(&mut self) {
        if let Some(id) = self.view_state.focused_id() {
            self.model.toggle_selection(id);
            self.refresh();
        }
    }

    /// Toggle the category at `position`; false if there is none
    fn toggle_category(&mut self, position: usize) -> bool {
        let Some(category) = self.catalog.categories.get(position) else {
            return false;
        };
        let name = category.name.clone();
        self.model.toggle_category(&name);
        self.refresh_filtered();
        true
    }

    fn show_all_categories(&mut self) {
        self.model.select_all_categories();
        self.refresh_filtered();
    }

    /// Filters changed: the old focus position no longer means anything
    fn refresh_filtered(&mut self) {
        self.view_state.focus = 0;
        self.view_state.scroll_top = 0;
        self.refresh();
    }

    /// Re-run the pipeline and copy the result into the view state
    fn refresh(&mut self) {
        let snapshot = self.model.snapshot(&self.catalog);
        let rows = TimelineRow::from_snapshot(&snapshot, self.model.selection());

        self.view_state.categories =
            CategoryChip::build(&self.catalog.categories, self.model.category());
        self.view_state.category = self.model.category().name().to_string();
        self.view_state.search = self.model.search().to_string();
        self.view_state.year_span = self.catalog.year_span();
        self.view_state
            .update_timeline(rows, snapshot.entry_count(), snapshot.total);
    }
}
