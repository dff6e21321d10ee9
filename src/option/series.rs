use serde_json::{Value, json};

use crate::model::{SeriesDataType, SeriesSpec};

use super::ChartOptionParams;

/// Renderer series entries, one per spec, colored by position in the palette.
pub(super) fn series_entries(series: &[SeriesSpec], params: &ChartOptionParams) -> Vec<Value> {
    series
        .iter()
        .enumerate()
        .map(|(index, spec)| series_entry(index, spec, params))
        .collect()
}

fn series_entry(index: usize, spec: &SeriesSpec, params: &ChartOptionParams) -> Value {
    let color = params.color_at(index);
    let data: Vec<f64> = if spec.series_show {
        spec.values()
    } else {
        Vec::new()
    };

    let mut entry = json!({
        "name": spec.name,
        "type": spec.class_type.as_str(),
        "smooth": spec.smooth,
        "symbol": "none",
        "yAxisIndex": spec.series_y_axis_index.unwrap_or(index),
        "lineStyle": { "color": color },
        "itemStyle": { "color": color },
        "data": data,
    });

    if spec.data_type == SeriesDataType::Switch {
        entry["smooth"] = json!(false);
        entry["step"] = json!("end");
        entry["areaStyle"] = json!({ "color": color, "opacity": 0.3 });
    }
    entry
}
