//! Container geometry for a set of stacked charts.

use serde::{Deserialize, Serialize};

use crate::model::EnlargeShrink;
pub use crate::option::legend_drag_position;

/// Space between neighbouring charts, in pixels.
pub const CHART_GAP: f64 = 10.0;
/// Row count assumed when fixed heights are requested without a count.
pub const DEFAULT_FIXED_ROWS: usize = 3;

fn default_cols() -> usize {
    1
}

/// How charts are laid out inside their container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerLayout {
    /// Charts per row.
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// When false, every chart gets the height of one of `fixed_count` rows.
    #[serde(default)]
    pub height_follows_count: bool,
    #[serde(default)]
    pub fixed_count: i64,
}

impl Default for ContainerLayout {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            height_follows_count: false,
            fixed_count: 0,
        }
    }
}

/// Width of one chart item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemWidth {
    Full,
    /// Fraction of the container after subtracting `gaps * CHART_GAP` pixels.
    Share { columns: usize, gaps: usize },
}

impl ItemWidth {
    /// Pixel width for a container `container_width` pixels wide.
    #[must_use]
    pub fn resolve(self, container_width: f64) -> f64 {
        match self {
            Self::Full => container_width,
            Self::Share { columns, gaps } => {
                (container_width - CHART_GAP * gaps as f64) / columns.max(1) as f64
            }
        }
    }
}

impl ContainerLayout {
    #[must_use]
    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = cols.max(1);
        self
    }

    #[must_use]
    pub fn with_fixed_count(mut self, count: i64) -> Self {
        self.height_follows_count = false;
        self.fixed_count = count;
        self
    }

    #[must_use]
    pub fn with_height_following_count(mut self) -> Self {
        self.height_follows_count = true;
        self
    }

    /// Rows that share the container height; `None` when heights follow the
    /// chart count.
    #[must_use]
    pub fn fixed_rows(&self) -> Option<usize> {
        if self.height_follows_count {
            return None;
        }
        Some(
            usize::try_from(self.fixed_count)
                .ok()
                .filter(|count| *count > 0)
                .unwrap_or(DEFAULT_FIXED_ROWS),
        )
    }

    /// Rows actually occupied by `chart_count` charts.
    #[must_use]
    pub fn rows(&self, chart_count: usize) -> usize {
        self.fixed_rows()
            .unwrap_or_else(|| chart_count.div_ceil(self.cols.max(1)))
    }

    /// Height of one chart: `floor((H - (n - 1) * gap) / n)`.
    #[must_use]
    pub fn chart_height(&self, container_height: f64, chart_count: usize) -> f64 {
        let count = self.fixed_rows().unwrap_or(chart_count);
        if count == 0 {
            return 0.0;
        }
        let count = count as f64;
        ((container_height - (count - 1.0) * CHART_GAP) / count).floor()
    }

    /// Frame of one of `chart_count` charts; an expanded chart takes the
    /// whole container.
    #[must_use]
    pub fn frame(
        &self,
        container_width: f64,
        container_height: f64,
        chart_count: usize,
        expanded: bool,
    ) -> ChartFrame {
        if expanded {
            return ChartFrame::new(container_width, container_height);
        }
        ChartFrame::new(
            self.item_width(chart_count).resolve(container_width),
            self.chart_height(container_height, chart_count),
        )
    }

    #[must_use]
    pub fn item_width(&self, chart_count: usize) -> ItemWidth {
        if self.cols <= 1 || chart_count <= 1 {
            return ItemWidth::Full;
        }
        let columns = chart_count.min(self.cols);
        ItemWidth::Share {
            columns,
            gaps: columns - 1,
        }
    }
}

/// Pixel box of one chart and the legend drag handle fitted to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub legend_top: i32,
    pub legend_font_size: u32,
}

impl ChartFrame {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let (legend_top, legend_font_size) = legend_drag_position(height);
        Self {
            width,
            height,
            legend_top,
            legend_font_size,
        }
    }
}

/// At most one chart of a set is expanded to fill the container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnlargeShrinkState {
    expanded: Option<String>,
}

/// Effect of one toggle on the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnlargeToggle {
    /// Chart restored to normal size, if any.
    pub restored: Option<String>,
    /// Chart now filling the container, if any.
    pub expanded: Option<String>,
}

impl EnlargeShrinkState {
    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Toolbox state of `chart_id`: shrink while it is the expanded chart.
    #[must_use]
    pub fn status(&self, chart_id: &str) -> EnlargeShrink {
        if self.expanded.as_deref() == Some(chart_id) {
            EnlargeShrink::Shrink
        } else {
            EnlargeShrink::Enlarge
        }
    }

    /// Expands `chart_id`, or restores it when it is already expanded.
    /// Expanding restores any previously expanded chart first.
    pub fn toggle(&mut self, chart_id: &str) -> EnlargeToggle {
        match self.expanded.take() {
            Some(current) if current == chart_id => EnlargeToggle {
                restored: Some(current),
                expanded: None,
            },
            previous => {
                self.expanded = Some(chart_id.to_owned());
                EnlargeToggle {
                    restored: previous,
                    expanded: Some(chart_id.to_owned()),
                }
            }
        }
    }

    /// Forgets `chart_id` if it was expanded, e.g. when it is deleted.
    pub fn forget(&mut self, chart_id: &str) {
        if self.expanded.as_deref() == Some(chart_id) {
            self.expanded = None;
        }
    }
}
