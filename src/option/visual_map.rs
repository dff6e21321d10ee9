use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ChartResult;
use crate::model::{SeriesSpec, VisualMapSpec, compare_intervals};

use super::ChartOptionParams;

/// Default color of baseline alarm regions.
pub const DEFAULT_ALARM_COLOR: &str = "#FF0000";

/// One recolored interval of a piecewise visual map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualMapPiece {
    pub gte: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
    pub color: String,
}

impl VisualMapPiece {
    #[must_use]
    pub fn closed(gte: f64, lte: f64, color: impl Into<String>) -> Self {
        Self {
            gte,
            lte: Some(lte),
            lt: None,
            color: color.into(),
        }
    }

    #[must_use]
    pub fn half_open(gte: f64, lt: f64, color: impl Into<String>) -> Self {
        Self {
            gte,
            lte: None,
            lt: Some(lt),
            color: color.into(),
        }
    }
}

/// Data dimension a visual map reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    XIndex = 0,
    YValue = 1,
}

/// Computes the pieces for one series' alarm definition.
///
/// Baseline runs covering a single point use an exclusive upper bound
/// (`lt = end + 1`) so the piece never has zero width; longer runs are closed.
pub fn visual_map_pieces(spec: &SeriesSpec) -> ChartResult<Vec<VisualMapPiece>> {
    let Some(visual_map) = &spec.visual_map else {
        return Ok(Vec::new());
    };
    match visual_map {
        VisualMapSpec::Pieces { pieces, .. } => Ok(pieces
            .iter()
            .map(|band| VisualMapPiece::closed(band.min, band.max, band.color.clone()))
            .collect()),
        VisualMapSpec::Baseline {
            baseline,
            compare,
            color,
            ..
        } => {
            let color = color.as_deref().unwrap_or(DEFAULT_ALARM_COLOR);
            let runs = compare_intervals(baseline, &spec.values(), *compare)?;
            Ok(runs
                .iter()
                .map(|[start, end]| {
                    if start == end {
                        VisualMapPiece::half_open(*start as f64, (*end + 1) as f64, color)
                    } else {
                        VisualMapPiece::closed(*start as f64, *end as f64, color)
                    }
                })
                .collect())
        }
    }
}

/// Hidden piecewise visual maps for every series with an alarm definition.
pub(super) fn visual_map_entries(
    series: &[SeriesSpec],
    params: &ChartOptionParams,
) -> ChartResult<Vec<Value>> {
    let mut entries = Vec::new();
    for (index, spec) in series.iter().enumerate() {
        let Some(visual_map) = &spec.visual_map else {
            continue;
        };
        let dimension = match visual_map {
            VisualMapSpec::Pieces { .. } => Dimension::YValue,
            VisualMapSpec::Baseline { .. } => Dimension::XIndex,
        };
        let pieces = visual_map_pieces(spec)?;
        entries.push(json!({
            "show": false,
            "type": "piecewise",
            "seriesIndex": index,
            "dimension": dimension as u8,
            "pieces": pieces,
            "outOfRange": { "color": params.color_at(index) },
        }));
    }
    Ok(entries)
}
