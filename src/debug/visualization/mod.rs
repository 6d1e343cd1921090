// src/debug/visualization/mod.rs
pub mod svg;

pub use self::svg::{SvgOptions, render_map_view_svg, save_map_view_svg};
