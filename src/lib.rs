//! Incrementally built polygon figures and an integer thick-line rasterizer.
//!
//! [`figure::Figure`] is the geometric model: a vertex ring plus an
//! interleaved vertex/edge shape sequence with hit testing. [`raster`] draws
//! lines and vertex markers onto any [`raster::PixelSurface`]. The two only
//! meet in [`figure::Figure::render`].

pub mod common_traits;
pub mod config;
pub mod figure;
pub mod geom;
pub mod point;
pub mod raster;
pub mod utils;

pub use figure::Figure;
pub use geom::{Edge, EdgeRef, ShapeEntry, Vertex};
pub use point::{pt, Point};
pub use raster::{draw_line, fill_circle, PixelBuffer, PixelSurface};
