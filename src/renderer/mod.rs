//! Cell-buffer rendering
//!
//! `surface` defines what the host must provide; `paint` turns game state
//! into drawing commands.

pub mod paint;
pub mod surface;

pub use paint::PaintCommand;
pub use surface::{Cell, CellBuffer, Color, Surface};
