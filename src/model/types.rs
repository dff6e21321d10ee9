use std::fmt;

use serde::{Deserialize, Serialize};

/// Color theme of a chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn background_color(self) -> &'static str {
        match self {
            Self::Light => "#fff",
            Self::Dark => "#100C2A",
        }
    }

    /// Color used for marker graphics and secondary tooltip text.
    #[must_use]
    pub const fn accent_color(self) -> &'static str {
        match self {
            Self::Light => "#909399",
            Self::Dark => "#B0B3B8",
        }
    }
}

/// Language of toolbox titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "zh-cn")]
    ZhCn,
    #[serde(rename = "en-us")]
    EnUs,
}

/// Whether the chart's toolbox offers enlarging (normal size) or shrinking
/// (currently expanded to fill the container).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnlargeShrink {
    #[default]
    Enlarge,
    Shrink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesClassType {
    #[default]
    Line,
    Bar,
}

impl SeriesClassType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
        }
    }
}

/// Series role, which drives y-axis allocation and render style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesDataType {
    /// Continuous analog value.
    #[default]
    Pulse,
    /// Boolean-like value drawn as a step area on a compressed axis band.
    Switch,
    /// Exists only to carry reference-line annotations.
    MarkLine,
}

/// Key of one point on the category x-axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for XValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.0}")
            }
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for XValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for XValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for XValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for XValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: XValue,
    pub y: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(x: impl Into<XValue>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}
