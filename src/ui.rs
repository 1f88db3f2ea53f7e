//! Ratatui front-end for the catalog browser. Key presses are translated into
//! the controller's UI events; drawing reads the controller's view back out.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
