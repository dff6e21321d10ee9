use crate::model::{EnlargeShrink, MarkLineSpec, SeriesSpec, Theme, XAxisDomain};
use crate::option::ExtraTooltipRow;
use crate::window::WindowMarkerController;

/// One rendered chart: its series, cached x-axis domain and marker pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    id: String,
    seq: usize,
    group: String,
    series: Vec<SeriesSpec>,
    chart_mark_lines: Vec<MarkLineSpec>,
    extra_tooltip: Vec<ExtraTooltipRow>,
    theme: Theme,
    enlarge_shrink: EnlargeShrink,
    domain: XAxisDomain,
    markers: WindowMarkerController,
}

impl ChartInstance {
    #[must_use]
    pub fn new(id: impl Into<String>, seq: usize, group: impl Into<String>, theme: Theme) -> Self {
        let id = id.into();
        Self {
            markers: WindowMarkerController::new(id.clone()),
            id,
            seq,
            group: group.into(),
            series: Vec::new(),
            chart_mark_lines: Vec::new(),
            extra_tooltip: Vec::new(),
            theme,
            enlarge_shrink: EnlargeShrink::default(),
            domain: XAxisDomain::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creation sequence number, 1-based, as used by group partitions.
    #[must_use]
    pub fn seq(&self) -> usize {
        self.seq
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn series(&self) -> &[SeriesSpec] {
        &self.series
    }

    #[must_use]
    pub fn chart_mark_lines(&self) -> &[MarkLineSpec] {
        &self.chart_mark_lines
    }

    #[must_use]
    pub fn extra_tooltip(&self) -> &[ExtraTooltipRow] {
        &self.extra_tooltip
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn enlarge_shrink(&self) -> EnlargeShrink {
        self.enlarge_shrink
    }

    #[must_use]
    pub fn domain(&self) -> &XAxisDomain {
        &self.domain
    }

    #[must_use]
    pub fn markers(&self) -> &WindowMarkerController {
        &self.markers
    }

    /// Whether the chart carries data a marker can bind to: a first series
    /// with a non-empty name.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.series
            .first()
            .is_some_and(|series| !series.name.is_empty())
    }

    pub(crate) fn marker_parts(&mut self) -> (&mut WindowMarkerController, &XAxisDomain, Theme) {
        (&mut self.markers, &self.domain, self.theme)
    }

    pub(crate) fn push_series(&mut self, series: SeriesSpec) {
        self.series.push(series);
        self.refresh_domain();
    }

    pub(crate) fn set_series(&mut self, series: Vec<SeriesSpec>) {
        self.series = series;
        self.refresh_domain();
    }

    pub(crate) fn series_mut(&mut self) -> &mut [SeriesSpec] {
        &mut self.series
    }

    pub(crate) fn set_chart_mark_lines(&mut self, mark_lines: Vec<MarkLineSpec>) {
        self.chart_mark_lines = mark_lines;
    }

    pub(crate) fn set_extra_tooltip(&mut self, rows: Vec<ExtraTooltipRow>) {
        self.extra_tooltip = rows;
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub(crate) fn set_enlarge_shrink(&mut self, state: EnlargeShrink) {
        self.enlarge_shrink = state;
    }

    /// Re-derives the cached domain; markers are dropped when it becomes empty.
    pub(crate) fn refresh_domain(&mut self) {
        self.domain = XAxisDomain::derive(&self.series);
        if self.domain.is_empty() {
            self.markers.clear();
        }
    }
}
