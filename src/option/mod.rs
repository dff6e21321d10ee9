//! Renderer option synthesis.
//!
//! [`ChartOptionBuilder`] turns a chart's series list plus build parameters
//! into an immutable [`ChartOption`] snapshot. Staged adjustments (grid
//! alignment, chart-level mark lines, background, toolbox text) consume the
//! snapshot and hand back a new one.

mod builder;
mod mark_line;
mod params;
mod series;
mod sizing;
mod snapshot;
mod toolbox;
mod tooltip;
mod visual_map;
mod x_axis;
mod y_axis;

use serde_json::{Map, Value};

pub use builder::ChartOptionBuilder;
pub use params::{
    ChartOptionParams, ExtraTooltipRow, GRID_LEFT_INIT, TickSegment, Y_AXIS_OFFSET_STEP,
};
pub use sizing::{ResponsiveSizing, legend_drag_position};
pub use snapshot::{CHART_OPTION_JSON_SCHEMA_V1, ChartOption, ChartOptionJsonContractV1};
pub use tooltip::{CompositeTooltip, TooltipComparison, TooltipSeriesLine, format_number};
pub use visual_map::{DEFAULT_ALARM_COLOR, VisualMapPiece, visual_map_pieces};
pub use x_axis::TickLabelFormatter;
pub use y_axis::{YAxisLayout, YAxisSlot, grid_left_for};

/// Writes `new` at `path`, creating missing intermediate objects.
///
/// Returns `false` without touching the tree when an intermediate node exists
/// but is not an object.
pub(crate) fn set_path(value: &mut Value, path: &[&str], new: Value) -> bool {
    let Some((last, parents)) = path.split_last() else {
        *value = new;
        return true;
    };
    let mut node = value;
    for key in parents {
        if node.is_null() {
            *node = Value::Object(Map::new());
        }
        let Some(object) = node.as_object_mut() else {
            return false;
        };
        node = object
            .entry((*key).to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    match node.as_object_mut() {
        Some(object) => {
            object.insert((*last).to_owned(), new);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::set_path;

    #[test]
    fn set_path_creates_missing_objects() {
        let mut value = json!({});
        assert!(set_path(&mut value, &["grid", "left"], json!(45)));
        assert_eq!(value, json!({ "grid": { "left": 45 } }));
    }

    #[test]
    fn set_path_refuses_to_descend_through_scalars() {
        let mut value = json!({ "grid": 3 });
        assert!(!set_path(&mut value, &["grid", "left"], json!(45)));
        assert_eq!(value, json!({ "grid": 3 }));
    }
}
