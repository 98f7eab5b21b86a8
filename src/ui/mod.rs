//! Rendering.
//!
//! - [`palette`] and [`table`]: plain, optionally colored, table output
//! - [`theme`], [`common`] and [`section`]: the interactive ratatui viewer

pub mod common;
pub mod palette;
pub mod section;
pub mod table;
pub mod theme;

pub use palette::{Ansi, Monochrome, Palette};
pub use theme::Theme;
