use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::window::WindowMarker;

/// Marker state of one chart inside a [`SelectionUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEntry {
    pub chart_id: String,
    /// Deep copy of the chart's markers; empty when none are placed.
    pub markers: Vec<WindowMarker>,
    pub is_source_of_this_update: bool,
}

/// Consolidated window selection of one linkage group, emitted once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionUpdate {
    pub group: String,
    pub entries: Vec<SelectionEntry>,
}

impl SelectionUpdate {
    #[must_use]
    pub fn entry(&self, chart_id: &str) -> Option<&SelectionEntry> {
        self.entries.iter().find(|entry| entry.chart_id == chart_id)
    }

    /// Listener payload: the entry array.
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}
