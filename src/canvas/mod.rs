//! Canvas geometry helpers.  Rendering of node cards lives in
//! `components::canvas_editor`.

pub mod placement;

pub use placement::{default_position, find_non_overlapping_position, overlaps, Placement};
