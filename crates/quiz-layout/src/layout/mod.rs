//! Layout calculation modules for question pages
//!
//! This module handles all the geometric calculations:
//! - Cell split per sub-layout (grid, single column, hybrid)
//! - Image placement inside cells (scale-to-fit, numbering)

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
