use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::set_path;

/// Font, grid and toolbox sizes for one container-height bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveSizing {
    pub font_size: u32,
    pub grid_top: u32,
    pub grid_bottom: u32,
    pub toolbox_item_size: u32,
    pub toolbox_item_gap: u32,
}

impl ResponsiveSizing {
    /// Bucket lookup: `> 200`, `> 150`, `> 100`, otherwise.
    #[must_use]
    pub const fn for_height(height: f64) -> Self {
        if height > 200.0 {
            Self::new(12, 40, 30, 15, 10)
        } else if height > 150.0 {
            Self::new(11, 30, 25, 13, 8)
        } else if height > 100.0 {
            Self::new(10, 25, 20, 11, 6)
        } else {
            Self::new(9, 20, 15, 9, 4)
        }
    }

    const fn new(
        font_size: u32,
        grid_top: u32,
        grid_bottom: u32,
        toolbox_item_size: u32,
        toolbox_item_gap: u32,
    ) -> Self {
        Self {
            font_size,
            grid_top,
            grid_bottom,
            toolbox_item_size,
            toolbox_item_gap,
        }
    }

    pub(super) fn apply(self, option: &mut Value) {
        set_path(option, &["textStyle", "fontSize"], json!(self.font_size));
        set_path(option, &["legend", "textStyle", "fontSize"], json!(self.font_size));
        set_path(option, &["grid", "top"], json!(self.grid_top));
        set_path(option, &["grid", "bottom"], json!(self.grid_bottom));
        set_path(option, &["toolbox", "itemSize"], json!(self.toolbox_item_size));
        set_path(option, &["toolbox", "itemGap"], json!(self.toolbox_item_gap));
    }
}

/// Legend drag-handle placement for a container height: `(top, font_size)`.
#[must_use]
pub fn legend_drag_position(height: f64) -> (i32, u32) {
    if height <= 200.0 { (-2, 11) } else { (5, 12) }
}
