use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const MARKER_START_ID: &str = "window-marker-start";
pub const MARKER_END_ID: &str = "window-marker-end";

/// One draggable window-selection marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowMarker {
    pub marker_id: String,
    pub pixel_x: f64,
    /// Always within `[0, domain_len - 1]` (0 for an empty domain).
    pub axis_index: usize,
    /// Domain key at `axis_index`, empty for an empty domain.
    pub axis_value: String,
}

impl WindowMarker {
    #[must_use]
    pub fn new(
        marker_id: impl Into<String>,
        pixel_x: f64,
        axis_index: usize,
        axis_value: impl Into<String>,
    ) -> Self {
        Self {
            marker_id: marker_id.into(),
            pixel_x,
            axis_index,
            axis_value: axis_value.into(),
        }
    }
}

/// The start/end marker pair of one chart, serialized as a two-element array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowMarkerPair {
    markers: [WindowMarker; 2],
}

impl WindowMarkerPair {
    #[must_use]
    pub fn new(start: WindowMarker, end: WindowMarker) -> Self {
        Self {
            markers: [start, end],
        }
    }

    #[must_use]
    pub fn start(&self) -> &WindowMarker {
        &self.markers[0]
    }

    #[must_use]
    pub fn end(&self) -> &WindowMarker {
        &self.markers[1]
    }

    #[must_use]
    pub fn markers(&self) -> &[WindowMarker; 2] {
        &self.markers
    }

    #[must_use]
    pub fn get(&self, marker_id: &str) -> Option<&WindowMarker> {
        self.markers.iter().find(|marker| marker.marker_id == marker_id)
    }

    #[must_use]
    pub fn indices(&self) -> [usize; 2] {
        [self.markers[0].axis_index, self.markers[1].axis_index]
    }

    /// Splits the pair into the marker named `marker_id` and the other one.
    pub fn split_mut(
        &mut self,
        marker_id: &str,
    ) -> ChartResult<(&mut WindowMarker, &mut WindowMarker)> {
        let [start, end] = &mut self.markers;
        if start.marker_id == marker_id {
            Ok((start, end))
        } else if end.marker_id == marker_id {
            Ok((end, start))
        } else {
            Err(ChartError::Validation(format!(
                "unknown window marker id `{marker_id}`"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{MARKER_END_ID, MARKER_START_ID, WindowMarker, WindowMarkerPair};

    fn pair() -> WindowMarkerPair {
        WindowMarkerPair::new(
            WindowMarker::new(MARKER_START_ID, 70.0, 1, "2"),
            WindowMarker::new(MARKER_END_ID, 90.0, 3, "4"),
        )
    }

    #[test]
    fn pair_serializes_as_camel_case_array() {
        let value = serde_json::to_value(pair()).unwrap();
        assert_eq!(
            value,
            json!([
                { "markerId": MARKER_START_ID, "pixelX": 70.0, "axisIndex": 1, "axisValue": "2" },
                { "markerId": MARKER_END_ID, "pixelX": 90.0, "axisIndex": 3, "axisValue": "4" }
            ])
        );
    }

    #[test]
    fn split_mut_returns_dragged_then_other() {
        let mut pair = pair();
        let (dragged, other) = pair.split_mut(MARKER_END_ID).unwrap();
        assert_eq!(dragged.axis_index, 3);
        assert_eq!(other.axis_index, 1);
        assert!(pair.split_mut("nope").is_err());
    }
}
