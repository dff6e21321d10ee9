use serde::{Deserialize, Serialize};

use crate::model::{EnlargeShrink, Language, Theme};
use crate::template::DEFAULT_PALETTE;

/// Horizontal distance between stacked left y-axes, in pixels.
pub const Y_AXIS_OFFSET_STEP: f64 = 40.0;
/// Grid left margin with at most one visible y-axis, in pixels.
pub const GRID_LEFT_INIT: f64 = 45.0;

/// X-axis tick-label policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TickSegment {
    /// One label per `n` categories; written to the renderer as interval `n - 1`.
    Every(u32),
    /// Only labels whose numeric value is divisible by the modulus are shown.
    Percent(u32),
}

impl TickSegment {
    /// Renderer `axisLabel.interval` for this policy.
    ///
    /// Categorical tick intervals count the skipped labels, hence `n - 1`.
    #[must_use]
    pub fn renderer_interval(self) -> Option<u32> {
        match self {
            Self::Every(0) => None,
            Self::Every(n) => Some(n - 1),
            Self::Percent(_) => Some(0),
        }
    }
}

/// Caller-supplied tooltip row appended after the series lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraTooltipRow {
    pub label: String,
    /// Values keyed by point index.
    pub values: Vec<String>,
}

impl ExtraTooltipRow {
    #[must_use]
    pub fn new<V: ToString>(label: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            label: label.into(),
            values: values.into_iter().map(|value| value.to_string()).collect(),
        }
    }
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|color| (*color).to_owned()).collect()
}

/// Chart-level inputs of one option build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptionParams {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub segment: Option<TickSegment>,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default)]
    pub use_merged_legend: bool,
    #[serde(default)]
    pub extra_tooltip: Vec<ExtraTooltipRow>,
    #[serde(default)]
    pub enlarge_shrink: EnlargeShrink,
    #[serde(default)]
    pub language: Language,
    /// Container height used to pick responsive font/grid sizes.
    #[serde(default)]
    pub rendered_height: Option<f64>,
}

impl Default for ChartOptionParams {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            segment: None,
            palette: default_palette(),
            use_merged_legend: false,
            extra_tooltip: Vec::new(),
            enlarge_shrink: EnlargeShrink::default(),
            language: Language::default(),
            rendered_height: None,
        }
    }
}

impl ChartOptionParams {
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_segment(mut self, segment: TickSegment) -> Self {
        self.segment = Some(segment);
        self
    }

    /// Replaces the palette; an empty palette keeps the default one.
    #[must_use]
    pub fn with_palette(mut self, palette: Vec<String>) -> Self {
        if !palette.is_empty() {
            self.palette = palette;
        }
        self
    }

    #[must_use]
    pub fn with_merged_legend(mut self, merged: bool) -> Self {
        self.use_merged_legend = merged;
        self
    }

    #[must_use]
    pub fn with_extra_tooltip(mut self, rows: Vec<ExtraTooltipRow>) -> Self {
        self.extra_tooltip = rows;
        self
    }

    #[must_use]
    pub fn with_enlarge_shrink(mut self, state: EnlargeShrink) -> Self {
        self.enlarge_shrink = state;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    #[must_use]
    pub fn with_rendered_height(mut self, height: f64) -> Self {
        self.rendered_height = Some(height);
        self
    }

    #[must_use]
    pub fn color_at(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()];
        }
        &self.palette[index % self.palette.len()]
    }
}
