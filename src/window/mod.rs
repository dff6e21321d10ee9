//! Two-marker window selection overlaid on one chart.

mod controller;
mod graphic;
mod marker;

pub use controller::{WindowMarkerController, default_marker_indices};
pub use graphic::marker_graphics;
pub use marker::{MARKER_END_ID, MARKER_START_ID, WindowMarker, WindowMarkerPair};
