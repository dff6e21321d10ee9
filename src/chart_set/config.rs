use serde::{Deserialize, Serialize};

use crate::layout::ContainerLayout;
use crate::model::{Language, SeriesPoint, Theme};
use crate::option::TickSegment;
use crate::template::DEFAULT_PALETTE;

/// Which charts show window-selection markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowSelectionScope {
    /// Every chart with data.
    #[default]
    All,
    /// Only charts assigned to a named group of the partition.
    Groups,
}

fn default_true() -> bool {
    true
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|color| (*color).to_owned()).collect()
}

/// Construction-time settings of a [`crate::chart_set::ChartSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSetConfig {
    /// Propagate window selection across the charts of a group.
    #[serde(default = "default_true")]
    pub linkage: bool,
    #[serde(default = "default_true")]
    pub window_selection: bool,
    #[serde(default)]
    pub window_selection_scope: WindowSelectionScope,
    /// 1-based chart sequence numbers per linkage group.
    #[serde(default)]
    pub groups: Option<Vec<Vec<i64>>>,
    #[serde(default)]
    pub theme: Theme,
    /// Whether the host offers a light/dark toggle; requires paired colors.
    #[serde(default)]
    pub theme_toggle: bool,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub segment: Option<TickSegment>,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    #[serde(default)]
    pub use_merged_legend: bool,
    /// Overrides the theme background when non-empty.
    #[serde(default)]
    pub background_color: String,
    #[serde(default)]
    pub layout: ContainerLayout,
}

impl Default for ChartSetConfig {
    fn default() -> Self {
        Self {
            linkage: true,
            window_selection: true,
            window_selection_scope: WindowSelectionScope::default(),
            groups: None,
            theme: Theme::default(),
            theme_toggle: false,
            language: Language::default(),
            segment: None,
            palette: default_palette(),
            use_merged_legend: false,
            background_color: String::new(),
            layout: ContainerLayout::default(),
        }
    }
}

impl ChartSetConfig {
    #[must_use]
    pub fn with_linkage(mut self, linkage: bool) -> Self {
        self.linkage = linkage;
        self
    }

    #[must_use]
    pub fn with_window_selection(mut self, enabled: bool) -> Self {
        self.window_selection = enabled;
        self
    }

    #[must_use]
    pub fn with_window_selection_scope(mut self, scope: WindowSelectionScope) -> Self {
        self.window_selection_scope = scope;
        self
    }

    #[must_use]
    pub fn with_groups(mut self, groups: Vec<Vec<i64>>) -> Self {
        self.groups = Some(groups);
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_theme_toggle(mut self, enabled: bool) -> Self {
        self.theme_toggle = enabled;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    #[must_use]
    pub fn with_segment(mut self, segment: TickSegment) -> Self {
        self.segment = Some(segment);
        self
    }

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
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ContainerLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// Name and data of a series, deduplicated by name across the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesTag {
    pub name: String,
    pub data: Vec<SeriesPoint>,
}
