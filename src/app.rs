//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playlist session,
//! the selected row and the yank register.

mod model;

pub use model::*;
