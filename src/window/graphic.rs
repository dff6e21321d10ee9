use serde_json::{Value, json};

use super::{WindowMarker, WindowMarkerPair};

const MARKER_WIDTH: f64 = 2.0;
const MARKER_Z: u32 = 100;

/// Overlay graphics for a marker pair: one draggable vertical rect each,
/// labelled with the marker's axis value.
#[must_use]
pub fn marker_graphics(pair: &WindowMarkerPair, height: f64, color: &str) -> Value {
    Value::Array(
        pair.markers()
            .iter()
            .map(|marker| marker_graphic(marker, height, color))
            .collect(),
    )
}

fn marker_graphic(marker: &WindowMarker, height: f64, color: &str) -> Value {
    json!({
        "id": marker.marker_id,
        "type": "rect",
        "z": MARKER_Z,
        "draggable": "horizontal",
        "position": [marker.pixel_x, 0],
        "shape": { "x": 0, "y": 0, "width": MARKER_WIDTH, "height": height.max(0.0) },
        "style": { "fill": color },
        "info": marker.axis_value,
        "textContent": {
            "type": "text",
            "style": { "text": marker.axis_value, "fill": color },
        },
        "textConfig": { "position": "top" },
    })
}
