//! Rendering subsystem.
//!
//! `ui` draws the interactive timeline with ratatui; `plain` writes a
//! snapshot as text for `--plain`.

pub mod plain;
pub mod ui;

pub use plain::write_plain;
