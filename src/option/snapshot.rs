use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ChartError, ChartResult};
use crate::model::{EnlargeShrink, Language, MarkLineSpec, Theme, XAxisDomain};

use super::mark_line::append_mark_lines;
use super::toolbox::{apply_language, set_feature_field};
use super::{CompositeTooltip, TickLabelFormatter, YAxisLayout, grid_left_for, set_path};

pub const CHART_OPTION_JSON_SCHEMA_V1: u32 = 1;

/// Immutable result of one option build.
///
/// Staged adjustments consume the snapshot and return a new one, so a
/// snapshot handed to a renderer never changes underneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOption {
    pub(super) json: Value,
    pub(super) domain: XAxisDomain,
    pub(super) y_axis_layout: YAxisLayout,
    pub(super) tick_formatter: TickLabelFormatter,
    pub(super) tooltip: Option<CompositeTooltip>,
    pub(super) theme: Theme,
    pub(super) enlarge_shrink: EnlargeShrink,
    pub(super) series_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptionJsonContractV1 {
    pub schema_version: u32,
    pub option: Value,
}

impl ChartOption {
    #[must_use]
    pub fn json(&self) -> &Value {
        &self.json
    }

    #[must_use]
    pub fn into_json(self) -> Value {
        self.json
    }

    #[must_use]
    pub fn x_axis_domain(&self) -> &XAxisDomain {
        &self.domain
    }

    #[must_use]
    pub fn y_axis_layout(&self) -> &YAxisLayout {
        &self.y_axis_layout
    }

    /// Y-axes counted for offsets and margins (switch axes excluded).
    #[must_use]
    pub fn visible_y_axis_count(&self) -> usize {
        self.y_axis_layout.visible_count
    }

    #[must_use]
    pub fn tick_formatter(&self) -> &TickLabelFormatter {
        &self.tick_formatter
    }

    /// Displayed x tick label at `index`; empty when the policy hides it.
    #[must_use]
    pub fn tick_label(&self, index: usize) -> Option<String> {
        self.domain
            .key(index)
            .map(|key| self.tick_formatter.format(key))
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&CompositeTooltip> {
        self.tooltip.as_ref()
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series_count
    }

    /// Renderer series entries.
    #[must_use]
    pub fn series_entries(&self) -> &[Value] {
        self.json
            .get("series")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Attaches chart-level reference lines to the first series.
    pub fn with_chart_mark_lines(mut self, mark_lines: &[MarkLineSpec]) -> ChartResult<Self> {
        if mark_lines.is_empty() {
            return Ok(self);
        }
        let Some(first) = self
            .json
            .get_mut("series")
            .and_then(Value::as_array_mut)
            .and_then(|entries| entries.first_mut())
        else {
            return Err(ChartError::Config(
                "chart-level mark lines need at least one series".to_owned(),
            ));
        };
        append_mark_lines(first, mark_lines);
        Ok(self)
    }

    /// Aligns the grid left margin with the chart showing the most y-axes.
    /// A chart without data keeps the initial margin.
    #[must_use]
    pub fn with_grid_left_align(mut self, max_show_y_count: usize) -> Self {
        let visible = if self.domain.is_empty() {
            0
        } else {
            max_show_y_count
        };
        set_path(&mut self.json, &["grid", "left"], json!(grid_left_for(visible)));
        self
    }

    /// Overrides the theme background; an empty color is ignored.
    #[must_use]
    pub fn with_background_color(mut self, color: &str) -> Self {
        if !color.is_empty() {
            set_path(&mut self.json, &["backgroundColor"], json!(color));
        }
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        apply_language(&mut self.json, language, self.enlarge_shrink);
        self
    }

    /// Sets one toolbox feature title; missing features are logged and skipped.
    #[must_use]
    pub fn with_toolbox_title(mut self, feature: &str, title: &str) -> Self {
        set_feature_field(&mut self.json, feature, "title", json!(title));
        self
    }

    /// Shows or hides one toolbox feature; missing features are logged and skipped.
    #[must_use]
    pub fn with_toolbox_feature_shown(mut self, feature: &str, show: bool) -> Self {
        set_feature_field(&mut self.json, feature, "show", json!(show));
        self
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(&self.json)?)
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartOptionJsonContractV1 {
            schema_version: CHART_OPTION_JSON_SCHEMA_V1,
            option: self.json.clone(),
        };
        Ok(serde_json::to_string_pretty(&payload)?)
    }
}
