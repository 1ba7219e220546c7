//! UI / rendering layer, everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No filesystem I/O happens here.

pub mod hit;
pub mod images;
pub mod layout;
pub mod page_view;
pub mod popup;
pub mod smooth_scroll;
pub mod theme;
