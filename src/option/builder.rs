use serde_json::{Value, json};
use tracing::trace;

use crate::error::ChartResult;
use crate::model::{SeriesSpec, XAxisDomain};
use crate::template::BaseTemplate;

use super::mark_line::apply_series_mark_lines;
use super::series::series_entries;
use super::toolbox::apply_language;
use super::visual_map::visual_map_entries;
use super::x_axis::apply_x_axis;
use super::y_axis::y_axis_entries;
use super::{
    ChartOption, ChartOptionParams, CompositeTooltip, ResponsiveSizing, TickLabelFormatter,
    YAxisLayout, set_path,
};

/// Synthesizes one renderer option from a chart's series.
///
/// The builder owns an already deep-cloned template and never mutates it:
/// every [`ChartOptionBuilder::build`] starts from a fresh copy, so reusing a
/// builder across frames yields identical snapshots for identical input.
#[derive(Debug, Clone)]
pub struct ChartOptionBuilder {
    template: BaseTemplate,
    params: ChartOptionParams,
}

impl ChartOptionBuilder {
    #[must_use]
    pub fn new(template: BaseTemplate, params: ChartOptionParams) -> Self {
        Self { template, params }
    }

    #[must_use]
    pub fn params(&self) -> &ChartOptionParams {
        &self.params
    }

    pub fn build(&self, series: &[SeriesSpec]) -> ChartResult<ChartOption> {
        let params = &self.params;
        let mut option = self.template.option.clone();

        set_path(&mut option, &["legend", "show"], json!(!params.use_merged_legend));

        let domain = XAxisDomain::derive(series);
        apply_x_axis(&mut option, &domain, series, params.segment);
        let tick_formatter = TickLabelFormatter::new(&domain, params.segment);

        let layout = YAxisLayout::compute(series);
        if !series.is_empty() {
            set_path(
                &mut option,
                &["yAxis"],
                Value::Array(y_axis_entries(series, &layout, params)),
            );
        }
        set_path(&mut option, &["grid", "left"], json!(layout.grid_left));

        let mut entries = series_entries(series, params);
        apply_series_mark_lines(&mut entries, series, &layout);
        set_path(&mut option, &["series"], Value::Array(entries));

        let visual_maps = visual_map_entries(series, params)?;
        if !visual_maps.is_empty() {
            set_path(&mut option, &["visualMap"], Value::Array(visual_maps));
        }

        let tooltip = CompositeTooltip::build(series, &domain, params);

        let sizing = ResponsiveSizing::for_height(params.rendered_height.unwrap_or(f64::INFINITY));
        sizing.apply(&mut option);

        set_path(
            &mut option,
            &["backgroundColor"],
            json!(params.theme.background_color()),
        );
        if let Some(pair) = &self.template.theme_color {
            let color = pair.resolve(params.theme);
            set_path(&mut option, &["textStyle", "color"], json!(color));
            set_path(&mut option, &["legend", "textStyle", "color"], json!(color));
        }

        apply_language(&mut option, params.language, params.enlarge_shrink);

        trace!(
            series = series.len(),
            domain_len = domain.len(),
            visible_y_axes = layout.visible_count,
            composite_tooltip = tooltip.is_some(),
            "chart option built"
        );

        Ok(ChartOption {
            json: option,
            domain,
            y_axis_layout: layout,
            tick_formatter,
            tooltip,
            theme: params.theme,
            enlarge_shrink: params.enlarge_shrink,
            series_count: series.len(),
        })
    }
}
