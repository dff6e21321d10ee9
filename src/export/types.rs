use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::option::format_number;

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    #[must_use]
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Number(_) => CellKind::Number,
            Self::Text(_) => CellKind::Text,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Number,
    Text,
}

/// Value of a caller-supplied column: one value for every row, or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    One(Cell),
    Many(Vec<Cell>),
}

impl ColumnValue {
    /// The list form; a single value becomes a one-element list.
    #[must_use]
    pub fn to_list(&self) -> Vec<Cell> {
        match self {
            Self::One(cell) => vec![cell.clone()],
            Self::Many(cells) => cells.clone(),
        }
    }
}

/// A caller-supplied column placed before or after the series columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraColumn {
    pub name: String,
    pub value: ColumnValue,
    /// In linked mode the pre-add primary-key column holds the segment ids
    /// other columns are joined on.
    #[serde(default)]
    pub is_primary_key: bool,
}

impl ExtraColumn {
    #[must_use]
    pub fn new(name: impl Into<String>, value: ColumnValue) -> Self {
        Self {
            name: name.into(),
            value,
            is_primary_key: false,
        }
    }

    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }
}

/// Table view options of one chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabularViewSpec {
    /// Header of the x column; defaults to the first series' x-axis name.
    #[serde(default)]
    pub head_x_name: Option<String>,
    /// Header of the segment column in linked mode.
    #[serde(default)]
    pub segment_label: Option<String>,
    #[serde(default)]
    pub pre_add: Vec<ExtraColumn>,
    #[serde(default)]
    pub post_add: Vec<ExtraColumn>,
}

impl TabularViewSpec {
    #[must_use]
    pub fn with_head_x_name(mut self, name: impl Into<String>) -> Self {
        self.head_x_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_segment_label(mut self, label: impl Into<String>) -> Self {
        self.segment_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_pre_add(mut self, columns: Vec<ExtraColumn>) -> Self {
        self.pre_add = columns;
        self
    }

    #[must_use]
    pub fn with_post_add(mut self, columns: Vec<ExtraColumn>) -> Self {
        self.post_add = columns;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableHead {
    pub label: String,
    pub prop: String,
}

impl TableHead {
    #[must_use]
    pub fn new(label: impl Into<String>, prop: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            prop: prop.into(),
        }
    }
}

pub type TableRow = IndexMap<String, Cell>;

/// Header plus rows keyed by header prop, in header order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub head: Vec<TableHead>,
    pub body: Vec<TableRow>,
}

impl Table {
    /// Cells of one column, top to bottom.
    #[must_use]
    pub fn column(&self, prop: &str) -> Vec<&Cell> {
        self.body.iter().filter_map(|row| row.get(prop)).collect()
    }

    #[must_use]
    pub fn props(&self) -> Vec<&str> {
        self.head.iter().map(|head| head.prop.as_str()).collect()
    }

    pub fn to_json_pretty(&self) -> crate::error::ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
