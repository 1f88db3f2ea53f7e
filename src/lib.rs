//! Core library surface for the Book Connect catalog browser.
//!
//! The filter, pagination, theme and controller modules carry no terminal
//! dependencies beyond colour types, so they can be driven directly from tests.
//! `ui` adds the Ratatui front-end on top.
pub mod controller;
pub mod data;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod theme;
pub mod ui;
pub mod widgets;

/// The dataset provider and its page-size constant.
pub use data::{Catalog, BOOKS_PER_PAGE};

pub use error::{CatalogError, Result};

pub use models::Book;

pub use controller::{EventData, EventKind, EventSource, FormData, ViewController};

pub use theme::{detect_system_theme, Theme};

pub use logging::init_logging;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
