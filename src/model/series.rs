use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{SeriesClassType, SeriesDataType, SeriesPoint, XValue};

/// Separator between the segment id and the original x key of linked series.
pub const SEGMENT_KEY_DELIMITER: &str = "--";

/// Horizontal reference line attached to a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkLineSpec {
    Value(f64),
    /// Renderer mark-line data item, e.g. `{"yAxis": 50, "name": "limit"}`.
    Descriptor(Value),
}

/// Structural identity of a mark line, used to suppress duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkLineKey {
    YAxis(OrderedFloat<f64>),
    Descriptor(String),
}

impl MarkLineSpec {
    #[must_use]
    pub fn descriptor(&self) -> Value {
        match self {
            Self::Value(value) => json!({ "yAxis": value }),
            Self::Descriptor(descriptor) => descriptor.clone(),
        }
    }

    /// `{"yAxis": 50}` and `Value(50.0)` share one key; other descriptors are
    /// keyed by their sorted-key JSON text.
    #[must_use]
    pub fn key(&self) -> MarkLineKey {
        match self {
            Self::Value(value) => MarkLineKey::YAxis(OrderedFloat(*value)),
            Self::Descriptor(descriptor) => {
                let plain_y = descriptor
                    .as_object()
                    .filter(|object| object.len() == 1)
                    .and_then(|object| object.get("yAxis"))
                    .and_then(Value::as_f64);
                match plain_y {
                    Some(value) => MarkLineKey::YAxis(OrderedFloat(value)),
                    None => MarkLineKey::Descriptor(descriptor.to_string()),
                }
            }
        }
    }
}

/// Fixed y-value alarm band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualMapBand {
    pub min: f64,
    pub max: f64,
    pub color: String,
}

impl VisualMapBand {
    #[must_use]
    pub fn new(min: f64, max: f64, color: impl Into<String>) -> Self {
        Self {
            min,
            max,
            color: color.into(),
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Pointwise comparison of a series against its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    #[default]
    Above,
    Below,
    Equal,
}

impl CompareMode {
    #[must_use]
    pub fn matches(self, baseline: f64, value: f64) -> bool {
        match self {
            Self::Above => value > baseline,
            Self::Below => value < baseline,
            Self::Equal => value == baseline,
        }
    }
}

/// Alarm-band definition recoloring parts of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum VisualMapSpec {
    Pieces {
        pieces: Vec<VisualMapBand>,
        #[serde(default)]
        show_on_tooltip: bool,
    },
    Baseline {
        baseline: Vec<f64>,
        #[serde(default)]
        compare: CompareMode,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        show_on_tooltip: bool,
    },
}

impl VisualMapSpec {
    #[must_use]
    pub fn show_on_tooltip(&self) -> bool {
        match self {
            Self::Pieces {
                show_on_tooltip, ..
            }
            | Self::Baseline {
                show_on_tooltip, ..
            } => *show_on_tooltip,
        }
    }
}

/// Marks a series as a concatenation of logical segments whose points carry
/// `"segmentId--originalX"` keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesLinkSpec {
    #[serde(default)]
    pub segment_ids: Vec<String>,
}

/// Splits a composite x key into `(segment id, original x)`.
///
/// Keys without the delimiter are treated as having an empty segment id.
#[must_use]
pub fn split_segment_key(key: &str) -> (&str, &str) {
    match key.split_once(SEGMENT_KEY_DELIMITER) {
        Some((segment, x)) => (segment, x),
        None => ("", key),
    }
}

fn default_true() -> bool {
    true
}

/// One named data series within a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSpec {
    pub name: String,
    #[serde(default)]
    pub class_type: SeriesClassType,
    #[serde(default)]
    pub data_type: SeriesDataType,
    #[serde(default = "default_true")]
    pub smooth: bool,
    #[serde(default)]
    pub data: Vec<SeriesPoint>,
    #[serde(default)]
    pub x_axis_name: Option<String>,
    #[serde(default)]
    pub y_axis_name: Option<String>,
    #[serde(default = "default_true")]
    pub y_axis_show: bool,
    #[serde(default)]
    pub y_axis_min: Option<f64>,
    #[serde(default)]
    pub y_axis_max: Option<f64>,
    #[serde(default = "default_true")]
    pub y_axis_align_ticks: bool,
    #[serde(default = "default_true")]
    pub series_show: bool,
    #[serde(default)]
    pub series_y_axis_index: Option<usize>,
    #[serde(default)]
    pub mark_lines: Vec<MarkLineSpec>,
    #[serde(default)]
    pub visual_map: Option<VisualMapSpec>,
    #[serde(default)]
    pub link: Option<SeriesLinkSpec>,
}

impl SeriesSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            class_type: SeriesClassType::Line,
            data_type: SeriesDataType::Pulse,
            smooth: true,
            data,
            x_axis_name: None,
            y_axis_name: None,
            y_axis_show: true,
            y_axis_min: None,
            y_axis_max: None,
            y_axis_align_ticks: true,
            series_show: true,
            series_y_axis_index: None,
            mark_lines: Vec::new(),
            visual_map: None,
            link: None,
        }
    }

    /// Builds a series from `(x, y)` pairs.
    #[must_use]
    pub fn from_pairs<X: Into<XValue>>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (X, f64)>,
    ) -> Self {
        let data = pairs
            .into_iter()
            .map(|(x, y)| SeriesPoint::new(x, y))
            .collect();
        Self::new(name, data)
    }

    /// Builds a series whose x keys are `1..=values.len()`.
    #[must_use]
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Self {
        Self::from_pairs(
            name,
            values
                .iter()
                .enumerate()
                .map(|(index, value)| ((index + 1) as f64, *value)),
        )
    }

    #[must_use]
    pub fn with_class_type(mut self, class_type: SeriesClassType) -> Self {
        self.class_type = class_type;
        self
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: SeriesDataType) -> Self {
        self.data_type = data_type;
        self
    }

    #[must_use]
    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    #[must_use]
    pub fn with_x_axis_name(mut self, name: impl Into<String>) -> Self {
        self.x_axis_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_y_axis_name(mut self, name: impl Into<String>) -> Self {
        self.y_axis_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_y_axis_show(mut self, show: bool) -> Self {
        self.y_axis_show = show;
        self
    }

    #[must_use]
    pub fn with_y_axis_limits(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.y_axis_min = min;
        self.y_axis_max = max;
        self
    }

    #[must_use]
    pub fn with_series_show(mut self, show: bool) -> Self {
        self.series_show = show;
        self
    }

    #[must_use]
    pub fn with_y_axis_index(mut self, index: usize) -> Self {
        self.series_y_axis_index = Some(index);
        self
    }

    #[must_use]
    pub fn with_mark_lines(mut self, mark_lines: Vec<MarkLineSpec>) -> Self {
        self.mark_lines = mark_lines;
        self
    }

    #[must_use]
    pub fn with_visual_map(mut self, visual_map: VisualMapSpec) -> Self {
        self.visual_map = Some(visual_map);
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: SeriesLinkSpec) -> Self {
        self.link = Some(link);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Y value at a row, if the series has one.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.data.get(index).map(|point| point.y)
    }

    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.data.iter().map(|point| point.y).collect()
    }
}
