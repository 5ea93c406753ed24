//! **mazegen** is a rectangular grid maze generation, solving and rendering
//! library: three classic randomized generators (recursive backtracker,
//! Prim's, Kruskal's), a breadth-first solver, and text/PNG/SVG output.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod renderers;
pub mod union_find;
pub mod units;
mod utils;
