//! Parsers for the CSS values a grid snapshot carries

pub mod areas;
pub mod ast;
mod grammar;
pub mod lexer;

pub use areas::{parse_areas, AreaBounds, AreaGrid, EMPTY_CELL};
pub use ast::*;
pub use grammar::{parse_grid_line, parse_size, parse_track_list};
