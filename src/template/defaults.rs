use serde_json::{Value, json};

/// Id of the single category x-axis every chart option carries.
pub const X_AXIS_ID: &str = "linkage-x-axis";

/// Default series/axis palette; colors cycle by series index.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#0078FF", "#FFAA2E", "#00FF00", "#9D2EFF", "#DA1D80", "#DA4127",
];

/// Toolbox feature ids of the built-in template.
pub const FEATURE_DATA_ZOOM: &str = "dataZoom";
pub const FEATURE_RESTORE: &str = "restore";
pub const FEATURE_SAVE_AS_IMAGE: &str = "saveAsImage";
pub const FEATURE_DELETE: &str = "myDeleteButton";
pub const FEATURE_ENLARGE_SHRINK: &str = "myEnlargeShrink";

pub(crate) const DELETE_ICON: &str = "path://M554.6496 512.0512l255.744-255.6928a30.1056 30.1056 0 1 0-42.6496-42.5984L512 469.4528 256.256 213.6064a30.1568 30.1568 0 1 0-42.6496 42.6496l255.744 255.6928-255.744 255.7952a30.1056 30.1056 0 1 0 42.6496 42.6496L512 554.6496l255.744 255.744a30.1568 30.1568 0 1 0 42.6496-42.6496l-255.744-255.6928z";
pub(crate) const ENLARGE_ICON: &str = "path://M128 128h320v64H237.3l210.4 210.3-45.3 45.3L192 237.3V448h-64V128zm768 0v320h-64V237.3L621.7 447.6l-45.3-45.3L786.7 192H576v-64h320zM128 896V576h64v210.7l210.3-210.4 45.3 45.3L237.3 832H448v64H128zm768 0H576v-64h210.7L576.4 621.7l45.3-45.3L832 786.7V576h64v320z";
pub(crate) const SHRINK_ICON: &str = "path://M448 448H128v-64h210.7L128.3 173.7l45.3-45.3L384 338.7V128h64v320zm128 0V128h64v210.7l210.3-210.4 45.3 45.3L685.3 384H896v64H576zM448 576v320h-64V685.3L173.7 895.6l-45.3-45.3L338.7 640H128v-64h320zm128 0h320v64H685.3l210.4 210.3-45.3 45.3L640 685.3V896h-64V576z";

/// Built-in base option tree before caller overrides.
#[must_use]
pub fn base_option() -> Value {
    json!({
        "tooltip": { "trigger": "axis", "confine": true },
        "legend": { "show": true, "left": 200, "top": 8 },
        "grid": { "show": true, "left": "1%", "right": "2%", "bottom": "10%" },
        "toolbox": {
            "show": true,
            "feature": {
                FEATURE_DATA_ZOOM: {
                    "show": true,
                    "yAxisIndex": "none",
                    "brushStyle": { "shadowColor": "rgba(0,0,0,0.7)", "shadowBlur": 10 }
                },
                FEATURE_RESTORE: {},
                FEATURE_SAVE_AS_IMAGE: {},
                FEATURE_DELETE: { "show": true, "title": "删除", "icon": DELETE_ICON },
                FEATURE_ENLARGE_SHRINK: { "show": true, "title": "放大", "icon": ENLARGE_ICON }
            }
        },
        "dataZoom": [{ "type": "inside", "start": 0, "end": 100 }],
        "xAxis": [{ "id": X_AXIS_ID, "type": "category", "name": "", "data": [] }],
        "yAxis": [{
            "type": "value",
            "show": true,
            "nameLocation": "center",
            "nameTextStyle": { "padding": [0, 10, 0, 50], "align": "right" },
            "axisLine": { "show": true }
        }],
        "series": []
    })
}

/// Red dashed reference-line block attached to a series' `markLine`.
#[must_use]
pub fn mark_line_template() -> Value {
    json!({
        "symbol": ["none"],
        "lineStyle": { "type": "dashed", "color": "#f00" },
        "itemStyle": { "show": true, "color": "#f00" },
        "label": { "show": true, "position": "insideEndTop", "color": "#f00", "distance": 0 },
        "data": []
    })
}
