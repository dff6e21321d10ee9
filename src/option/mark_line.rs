use std::collections::HashSet;

use serde_json::{Value, json};

use crate::model::{MarkLineKey, MarkLineSpec, SeriesSpec};
use crate::template::mark_line_template;

use super::YAxisLayout;

/// Attaches each series' reference lines to its renderer entry.
///
/// Series whose target y-axis is hidden draw none of their lines. Among
/// visible axes the first occurrence of a descriptor wins and later
/// structurally equal descriptors are dropped.
pub(super) fn apply_series_mark_lines(
    entries: &mut [Value],
    series: &[SeriesSpec],
    layout: &YAxisLayout,
) {
    let mut seen: HashSet<MarkLineKey> = HashSet::new();
    for (index, (entry, spec)) in entries.iter_mut().zip(series).enumerate() {
        if spec.mark_lines.is_empty() {
            continue;
        }
        let target_axis = spec.series_y_axis_index.unwrap_or(index);
        if !layout.is_shown(target_axis) {
            continue;
        }

        let data: Vec<Value> = spec
            .mark_lines
            .iter()
            .filter(|mark_line| seen.insert(mark_line.key()))
            .map(MarkLineSpec::descriptor)
            .collect();
        if !data.is_empty() {
            entry["markLine"] = mark_line_block(data);
        }
    }
}

/// Appends chart-level lines to `entry`, skipping descriptors it already draws.
pub(super) fn append_mark_lines(entry: &mut Value, mark_lines: &[MarkLineSpec]) {
    if entry.get("markLine").is_none() {
        entry["markLine"] = mark_line_block(Vec::new());
    }
    let Some(data) = entry["markLine"]["data"].as_array_mut() else {
        return;
    };

    let mut seen: HashSet<MarkLineKey> = data
        .iter()
        .map(|descriptor| MarkLineSpec::Descriptor(descriptor.clone()).key())
        .collect();
    for mark_line in mark_lines {
        if seen.insert(mark_line.key()) {
            data.push(mark_line.descriptor());
        }
    }
}

fn mark_line_block(data: Vec<Value>) -> Value {
    let mut block = mark_line_template();
    block["data"] = json!(data);
    block
}
