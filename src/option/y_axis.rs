use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::model::{SeriesDataType, SeriesSpec};

use super::{ChartOptionParams, GRID_LEFT_INIT, Y_AXIS_OFFSET_STEP};

/// Height of the value band reserved for one switch series.
const SWITCH_BAND_SPAN: f64 = 12.0;
/// Downward shift of each further switch band.
const SWITCH_BAND_STEP: f64 = 1.5;

/// Resolved placement of one y-axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YAxisSlot {
    pub show: bool,
    /// Whether the axis counts towards offsets and the grid margin.
    pub counted: bool,
    pub offset: f64,
    /// `(min, max)` of the reserved band of a switch series.
    pub switch_band: Option<(f64, f64)>,
}

/// Y-axis placement for a whole chart: one slot per series, in series order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisLayout {
    pub slots: Vec<YAxisSlot>,
    pub visible_count: usize,
    pub grid_left: f64,
}

impl YAxisLayout {
    #[must_use]
    pub fn compute(series: &[SeriesSpec]) -> Self {
        let mut slots = Vec::with_capacity(series.len());
        let mut counted_so_far = 0usize;
        let mut switch_rank = 0usize;

        for spec in series {
            let slot = match spec.data_type {
                SeriesDataType::Switch => {
                    let shift = SWITCH_BAND_STEP * switch_rank as f64;
                    switch_rank += 1;
                    YAxisSlot {
                        show: true,
                        counted: false,
                        offset: 0.0,
                        switch_band: Some((0.0 - shift, SWITCH_BAND_SPAN - shift)),
                    }
                }
                SeriesDataType::Pulse | SeriesDataType::MarkLine => {
                    let show = match spec.data_type {
                        SeriesDataType::MarkLine => spec.y_axis_show,
                        _ => !spec.data.is_empty() && spec.y_axis_show,
                    };
                    if show {
                        counted_so_far += 1;
                    }
                    YAxisSlot {
                        show,
                        counted: show,
                        offset: Y_AXIS_OFFSET_STEP * counted_so_far.saturating_sub(1) as f64,
                        switch_band: None,
                    }
                }
            };
            slots.push(slot);
        }

        Self {
            slots,
            visible_count: counted_so_far,
            grid_left: grid_left_for(counted_so_far),
        }
    }

    /// Whether the axis at `index` is drawn; out-of-range indices are hidden.
    #[must_use]
    pub fn is_shown(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.show)
    }
}

/// Grid left margin for `visible` stacked axes.
#[must_use]
pub fn grid_left_for(visible: usize) -> f64 {
    if visible <= 1 {
        GRID_LEFT_INIT
    } else {
        GRID_LEFT_INIT + Y_AXIS_OFFSET_STEP * (visible - 1) as f64
    }
}

pub(super) fn y_axis_entries(
    series: &[SeriesSpec],
    layout: &YAxisLayout,
    params: &ChartOptionParams,
) -> Vec<Value> {
    series
        .iter()
        .zip(&layout.slots)
        .enumerate()
        .map(|(index, (spec, slot))| y_axis_entry(index, spec, slot, params))
        .collect()
}

fn y_axis_entry(
    index: usize,
    spec: &SeriesSpec,
    slot: &YAxisSlot,
    params: &ChartOptionParams,
) -> Value {
    let color = params.color_at(index);
    let name = match spec.data_type {
        SeriesDataType::MarkLine => spec.y_axis_name.clone().unwrap_or_else(|| spec.name.clone()),
        SeriesDataType::Switch => String::new(),
        SeriesDataType::Pulse => spec.y_axis_name.clone().unwrap_or_default(),
    };

    let mut axis = json!({
        "name": name,
        "type": "value",
        "show": slot.show,
        "position": "left",
        "offset": slot.offset,
        "alignTicks": spec.y_axis_align_ticks,
        "axisLine": { "show": true, "lineStyle": { "color": color } },
        "nameTextStyle": { "align": "center", "padding": 0 },
        "axisLabel": { "margin": 2 },
    });

    if let Some((min, max)) = slot.switch_band {
        axis["min"] = json!(min);
        axis["max"] = json!(max);
        axis["alignTicks"] = json!(false);
        axis["axisLine"]["lineStyle"]["color"] = json!("transparent");
        axis["axisLabel"] = json!({ "margin": 2, "color": "transparent" });
        axis["axisTick"] = json!({ "show": false });
        axis["splitLine"] = json!({ "show": false });
        return axis;
    }

    if let Some(min) = spec.y_axis_min {
        axis["min"] = json!(min);
    }
    if let Some(max) = spec.y_axis_max {
        axis["max"] = json!(max);
    }
    axis
}
