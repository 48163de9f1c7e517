//! # mindline - Terminal Timeline of Theories of Consciousness
//!
//! An interactive, filterable timeline. Theories are kept in year order,
//! narrowed by a live keyword search and a category filter, segmented into
//! historical eras and laid out alternately on either side of a central rail.
//!
//! ## Features
//!
//! - **Live Search**: case-insensitive substring match over title, author and description
//! - **Category Filter**: one active category at a time, toggled from the keyboard
//! - **Era Grouping**: a marker wherever the era changes between consecutive entries
//! - **Expandable Entries**: at most one entry shows its full description and source
//! - **Custom Catalogs**: TOML catalogs with their own categories and era table
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`catalog`] - Theory records, categories, era table and catalog loading
//! - [`timeline`] - Filter, era grouping, lane assignment and selection
//! - [`input`] - Key bindings and the input state machine
//! - [`render::ui`](crate::render::ui) - Terminal user interface components
//! - [`config`] - Optional TOML configuration
//! - [`app`] - Application core and component coordination

// Core modules
pub mod catalog;
pub mod config;
pub mod error;
pub mod timeline;

// Front end
pub mod input;
pub mod render;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{MindlineError, Result};

// Public API surface for external usage
pub use app::Application;
pub use catalog::{Catalog, Theory, TheoryId};
pub use timeline::{CategoryFilter, Lane, RenderNode, Selection, TimelineModel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
