//! Page behaviors – slider, modal, tabs, nav fade, observers, and the page model.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Each
//! controller owns plain data and is driven by the app layer, so every
//! behavior can be exercised without a terminal.

pub mod assets;
pub mod carousel;
pub mod fade;
pub mod lazy;
pub mod modal;
pub mod observer;
pub mod page;
pub mod reveal;
pub mod sticky;
pub mod tabs;
