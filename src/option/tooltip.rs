use serde::{Deserialize, Serialize};

use crate::model::{SeriesSpec, Theme, VisualMapBand, VisualMapSpec, XAxisDomain};

use super::{ChartOptionParams, ExtraTooltipRow};

const LINE_BREAK: &str = "<br/>";

/// Comparison text appended to a series line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TooltipComparison {
    None,
    /// Baseline value at the hovered index.
    Baseline(Vec<f64>),
    /// The alarm band containing the hovered value.
    Bands(Vec<VisualMapBand>),
}

impl TooltipComparison {
    fn text(&self, index: usize, value: Option<f64>) -> Option<String> {
        match self {
            Self::None => None,
            Self::Baseline(baseline) => baseline.get(index).map(|base| format_number(*base)),
            Self::Bands(bands) => {
                let value = value?;
                bands.iter().find(|band| band.contains(value)).map(|band| {
                    format!("{}~{}", format_number(band.min), format_number(band.max))
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipSeriesLine {
    pub name: String,
    pub color: String,
    pub values: Vec<f64>,
    pub comparison: TooltipComparison,
}

/// Tooltip content composed per hovered point.
///
/// Renderer JSON cannot carry a formatter, so adapters call
/// [`CompositeTooltip::compose`] from their own formatter hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeTooltip {
    pub axis_labels: Vec<String>,
    pub series: Vec<TooltipSeriesLine>,
    pub extra: Vec<ExtraTooltipRow>,
    pub secondary_color: String,
}

impl CompositeTooltip {
    /// Builds the tooltip when a series asks for comparison display or extra
    /// rows are present; otherwise the renderer's default tooltip stays.
    #[must_use]
    pub fn build(
        series: &[SeriesSpec],
        domain: &XAxisDomain,
        params: &ChartOptionParams,
    ) -> Option<Self> {
        let requested = series.iter().any(|spec| {
            spec.visual_map
                .as_ref()
                .is_some_and(VisualMapSpec::show_on_tooltip)
        });
        if !requested && params.extra_tooltip.is_empty() {
            return None;
        }

        let axis_labels = (0..domain.len())
            .filter_map(|index| domain.label(index).map(str::to_owned))
            .collect();
        let lines = series
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.series_show)
            .map(|(index, spec)| TooltipSeriesLine {
                name: spec.name.clone(),
                color: params.color_at(index).to_owned(),
                values: spec.values(),
                comparison: comparison_for(spec),
            })
            .collect();

        Some(Self {
            axis_labels,
            series: lines,
            extra: params.extra_tooltip.clone(),
            secondary_color: secondary_color(params.theme).to_owned(),
        })
    }

    /// Tooltip markup for the point at `index`, `None` outside the domain.
    #[must_use]
    pub fn compose(&self, index: usize) -> Option<String> {
        let label = self.axis_labels.get(index)?;
        let mut lines = Vec::with_capacity(1 + self.series.len() + self.extra.len());
        lines.push(label.clone());

        for line in &self.series {
            let value = line.values.get(index).copied();
            let mut text = format!(
                "{}{}: {}",
                color_dot(&line.color),
                line.name,
                value.map_or_else(|| "-".to_owned(), format_number)
            );
            if let Some(comparison) = line.comparison.text(index, value) {
                text.push_str(&format!(
                    " <span style=\"color:{}\">({comparison})</span>",
                    self.secondary_color
                ));
            }
            lines.push(text);
        }

        for row in &self.extra {
            let value = row.values.get(index).map_or("-", String::as_str);
            lines.push(format!("{}: {value}", row.label));
        }
        Some(lines.join(LINE_BREAK))
    }
}

fn comparison_for(spec: &SeriesSpec) -> TooltipComparison {
    match &spec.visual_map {
        Some(VisualMapSpec::Baseline {
            baseline,
            show_on_tooltip: true,
            ..
        }) => TooltipComparison::Baseline(baseline.clone()),
        Some(VisualMapSpec::Pieces {
            pieces,
            show_on_tooltip: true,
        }) => TooltipComparison::Bands(pieces.clone()),
        _ => TooltipComparison::None,
    }
}

fn secondary_color(theme: Theme) -> &'static str {
    theme.accent_color()
}

fn color_dot(color: &str) -> String {
    format!(
        "<span style=\"display:inline-block;margin-right:4px;border-radius:10px;width:10px;height:10px;background-color:{color};\"></span>"
    )
}

/// Integral values print without a fraction.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
