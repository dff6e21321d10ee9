//! A set of linked charts: instances, templates, groups and coordinators.

mod config;
mod instance;

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

pub use config::{ChartSetConfig, SeriesTag, WindowSelectionScope};
pub use instance::ChartInstance;

use crate::error::{ChartError, ChartResult};
use crate::export::{Table, TabularViewSpec, assemble_table};
use crate::layout::{ChartFrame, EnlargeShrinkState, EnlargeToggle};
use crate::linkage::{FrameRequest, GROUP_DEFAULT, LinkageCoordinator, LinkageGroups, SelectionUpdate};
use crate::model::{MarkLineSpec, SeriesSpec, Theme};
use crate::option::{ChartOption, ChartOptionBuilder, ChartOptionParams, ExtraTooltipRow, YAxisLayout};
use crate::persist::{KeyValueStore, MemoryStore, YAxisLimitCache, YAxisLimitUpdate};
use crate::render::RenderingService;
use crate::template::TemplateRegistry;
use crate::window::WindowMarkerPair;

pub const CHART_ID_PREFIX: &str = "echart";

type SelectionListener = Box<dyn FnMut(&SelectionUpdate)>;
type LimitCache = YAxisLimitCache<Box<dyn KeyValueStore>>;

/// Owns every chart of one linked set.
///
/// Chart ids are `echart{seq}` with a sequence that only grows, so ids are
/// never reused after deletion. Group membership comes from the partition
/// given at construction and never changes. Cached y-axis limits are applied
/// whenever series enter a chart.
pub struct ChartSet {
    config: ChartSetConfig,
    templates: TemplateRegistry,
    groups: LinkageGroups,
    coordinators: IndexMap<String, LinkageCoordinator>,
    charts: IndexMap<String, ChartInstance>,
    max_seq: usize,
    enlarge: EnlargeShrinkState,
    listener: Option<SelectionListener>,
    limits: LimitCache,
}

impl fmt::Debug for ChartSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartSet")
            .field("config", &self.config)
            .field("groups", &self.groups)
            .field("charts", &self.charts.keys().collect::<Vec<_>>())
            .field("max_seq", &self.max_seq)
            .field("y_axis_limits", &self.limits.load())
            .finish_non_exhaustive()
    }
}

impl ChartSet {
    pub fn new(config: ChartSetConfig) -> ChartResult<Self> {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        let groups = LinkageGroups::from_partition(config.groups.clone())?;
        let coordinators = groups
            .names()
            .iter()
            .map(|name| (name.clone(), LinkageCoordinator::new(name.clone(), config.linkage)))
            .collect();
        Ok(Self {
            templates: TemplateRegistry::new(config.theme_toggle),
            config,
            groups,
            coordinators,
            charts: IndexMap::new(),
            max_seq: 0,
            enlarge: EnlargeShrinkState::default(),
            listener: None,
            limits: YAxisLimitCache::new(store),
        })
    }

    /// Installs the receiver of selection emissions.
    pub fn set_listener(&mut self, listener: impl FnMut(&SelectionUpdate) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    #[must_use]
    pub fn config(&self) -> &ChartSetConfig {
        &self.config
    }

    #[must_use]
    pub fn groups(&self) -> &LinkageGroups {
        &self.groups
    }

    #[must_use]
    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn set_base_template(&mut self, overrides: &Value) -> ChartResult<()> {
        self.templates.set_base_template(overrides)
    }

    #[must_use]
    pub fn chart(&self, chart_id: &str) -> Option<&ChartInstance> {
        self.charts.get(chart_id)
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartInstance> {
        self.charts.values()
    }

    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// Highest sequence number handed out so far.
    #[must_use]
    pub fn max_chart_seq(&self) -> usize {
        self.max_seq
    }

    #[must_use]
    pub fn coordinator(&self, group: &str) -> Option<&LinkageCoordinator> {
        self.coordinators.get(group)
    }

    fn instance(&self, chart_id: &str) -> ChartResult<&ChartInstance> {
        self.charts
            .get(chart_id)
            .ok_or_else(|| ChartError::Validation(format!("unknown chart id `{chart_id}`")))
    }

    fn instance_mut(&mut self, chart_id: &str) -> ChartResult<&mut ChartInstance> {
        self.charts
            .get_mut(chart_id)
            .ok_or_else(|| ChartError::Validation(format!("unknown chart id `{chart_id}`")))
    }

    /// Creates a chart and returns its id.
    pub fn add_chart(&mut self, mut series: Vec<SeriesSpec>) -> ChartResult<String> {
        ensure_unique_names(&series)?;
        self.max_seq += 1;
        let seq = self.max_seq;
        let id = format!("{CHART_ID_PREFIX}{seq}");
        let group = self.groups.group_for_seq(seq).to_owned();
        let linkage = self.config.linkage;
        self.coordinators
            .entry(group.clone())
            .or_insert_with(|| LinkageCoordinator::new(group.clone(), linkage));

        self.limits.apply_to(&mut series);
        let mut instance = ChartInstance::new(id.clone(), seq, group, self.config.theme);
        instance.set_series(series);
        debug!(chart_id = %id, group = %instance.group(), "chart added");
        self.charts.insert(id.clone(), instance);
        Ok(id)
    }

    /// Appends one series; names stay unique within a chart.
    pub fn add_series(&mut self, chart_id: &str, mut series: SeriesSpec) -> ChartResult<()> {
        self.limits.apply_to(std::slice::from_mut(&mut series));
        let instance = self.instance_mut(chart_id)?;
        if instance.series().iter().any(|existing| existing.name == series.name) {
            return Err(ChartError::Validation(format!(
                "chart `{chart_id}` already has a series named `{}`",
                series.name
            )));
        }
        instance.push_series(series);
        Ok(())
    }

    pub fn replace_series(&mut self, chart_id: &str, mut series: Vec<SeriesSpec>) -> ChartResult<()> {
        ensure_unique_names(&series)?;
        self.limits.apply_to(&mut series);
        self.instance_mut(chart_id)?.set_series(series);
        Ok(())
    }

    pub fn clear_series(&mut self, chart_id: &str) -> ChartResult<()> {
        self.instance_mut(chart_id)?.set_series(Vec::new());
        Ok(())
    }

    /// Chart-level reference lines drawn on the chart's first series.
    pub fn set_chart_mark_lines(
        &mut self,
        chart_id: &str,
        mark_lines: Vec<MarkLineSpec>,
    ) -> ChartResult<()> {
        self.instance_mut(chart_id)?.set_chart_mark_lines(mark_lines);
        Ok(())
    }

    pub fn set_extra_tooltip(
        &mut self,
        chart_id: &str,
        rows: Vec<ExtraTooltipRow>,
    ) -> ChartResult<()> {
        self.instance_mut(chart_id)?.set_extra_tooltip(rows);
        Ok(())
    }

    /// Removes a chart and its marker state.
    pub fn delete_chart(&mut self, chart_id: &str) -> ChartResult<ChartInstance> {
        let instance = self
            .charts
            .shift_remove(chart_id)
            .ok_or_else(|| ChartError::Validation(format!("unknown chart id `{chart_id}`")))?;
        self.enlarge.forget(chart_id);
        debug!(chart_id, "chart deleted");
        Ok(instance)
    }

    /// First occurrence of every series name across the set, in chart order.
    #[must_use]
    pub fn distinct_series_tags(&self) -> Vec<SeriesTag> {
        let mut tags: IndexMap<&str, SeriesTag> = IndexMap::new();
        for series in self.charts.values().flat_map(ChartInstance::series) {
            tags.entry(series.name.as_str()).or_insert_with(|| SeriesTag {
                name: series.name.clone(),
                data: series.data.clone(),
            });
        }
        tags.into_values().collect()
    }

    /// Replaces the data of every series whose name matches a tag.
    pub fn update_all_series(&mut self, tags: &[SeriesTag]) {
        for instance in self.charts.values_mut() {
            for series in instance.series_mut() {
                if let Some(tag) = tags.iter().find(|tag| tag.name == series.name) {
                    series.data.clone_from(&tag.data);
                }
            }
            instance.refresh_domain();
        }
    }

    /// Largest count of margin-relevant y-axes over all charts.
    #[must_use]
    pub fn max_visible_y_axis_count(&self) -> usize {
        self.charts
            .values()
            .map(|instance| YAxisLayout::compute(instance.series()).visible_count)
            .max()
            .unwrap_or(0)
    }

    fn option_params(&self, instance: &ChartInstance, rendered_height: Option<f64>) -> ChartOptionParams {
        let mut params = ChartOptionParams::default()
            .with_theme(instance.theme())
            .with_palette(self.config.palette.clone())
            .with_merged_legend(self.config.use_merged_legend)
            .with_extra_tooltip(instance.extra_tooltip().to_vec())
            .with_enlarge_shrink(instance.enlarge_shrink())
            .with_language(self.config.language);
        if let Some(segment) = self.config.segment {
            params = params.with_segment(segment);
        }
        if let Some(height) = rendered_height {
            params = params.with_rendered_height(height);
        }
        params
    }

    /// Builds the option of one chart, aligned with the set's widest y-axis
    /// margin.
    pub fn build_option<S: RenderingService + ?Sized>(
        &self,
        chart_id: &str,
        service: &S,
    ) -> ChartResult<ChartOption> {
        let instance = self.instance(chart_id)?;
        let params = self.option_params(instance, service.rendered_height(chart_id).ok());
        let option = ChartOptionBuilder::new(self.templates.snapshot(), params)
            .build(instance.series())?
            .with_chart_mark_lines(instance.chart_mark_lines())?
            .with_grid_left_align(self.max_visible_y_axis_count())
            .with_background_color(&self.config.background_color);
        Ok(option)
    }

    fn shows_markers(&self, instance: &ChartInstance) -> bool {
        let in_scope = match self.config.window_selection_scope {
            WindowSelectionScope::All => true,
            WindowSelectionScope::Groups => instance.group() != GROUP_DEFAULT,
        };
        self.config.window_selection
            && in_scope
            && instance.has_data()
            && !instance.domain().is_empty()
    }

    /// Renders one chart and places its markers when window selection applies.
    pub fn render_chart<S: RenderingService + ?Sized>(
        &mut self,
        chart_id: &str,
        service: &mut S,
    ) -> ChartResult<ChartOption> {
        if !service.has_instance(chart_id) {
            return Err(ChartError::InstanceNotFound(chart_id.to_owned()));
        }
        let option = self.build_option(chart_id, &*service)?;
        service.render_option(chart_id, &option)?;

        let shows_markers = self.shows_markers(self.instance(chart_id)?);
        let instance = self.instance_mut(chart_id)?;
        if shows_markers {
            let (markers, domain, theme) = instance.marker_parts();
            markers.place(service, domain, theme, None)?;
        } else {
            instance.marker_parts().0.clear();
        }
        Ok(option)
    }

    /// Renders every chart, logging and skipping failures, then emits the
    /// selection of each group once. Returns the number of charts rendered.
    pub fn render_all<S: RenderingService + ?Sized>(&mut self, service: &mut S) -> usize {
        let ids: Vec<String> = self.charts.keys().cloned().collect();
        let mut rendered = 0;
        for chart_id in &ids {
            match self.render_chart(chart_id, service) {
                Ok(_) => rendered += 1,
                Err(err) => warn!(chart_id = %chart_id, error = %err, "chart render skipped"),
            }
        }
        let groups: Vec<String> = self.coordinators.keys().cloned().collect();
        for group in groups {
            self.emit_group(&group, &[]);
        }
        rendered
    }

    /// Places the markers of one chart at explicit indices and emits its group.
    pub fn place_markers<S: RenderingService + ?Sized>(
        &mut self,
        chart_id: &str,
        service: &mut S,
        indices: [usize; 2],
    ) -> ChartResult<WindowMarkerPair> {
        let instance = self.instance(chart_id)?;
        if !self.shows_markers(instance) {
            return Err(ChartError::Validation(format!(
                "chart `{chart_id}` does not show window markers"
            )));
        }
        let group = instance.group().to_owned();
        let (markers, domain, theme) = self.instance_mut(chart_id)?.marker_parts();
        let pair = markers.place(service, domain, theme, Some(indices))?.clone();
        self.emit_group(&group, &[chart_id.to_owned()]);
        Ok(pair)
    }

    /// Records a marker drag; see [`LinkageCoordinator::on_marker_drag`].
    pub fn on_marker_drag(
        &mut self,
        chart_id: &str,
        marker_id: &str,
        pixel_x: f64,
    ) -> ChartResult<FrameRequest> {
        Ok(self
            .coordinator_for(chart_id)?
            .on_marker_drag(chart_id, marker_id, pixel_x))
    }

    /// Records a zoom or pan; see [`LinkageCoordinator::on_zoom`].
    pub fn on_zoom(&mut self, chart_id: &str) -> ChartResult<FrameRequest> {
        Ok(self.coordinator_for(chart_id)?.on_zoom(chart_id))
    }

    fn coordinator_for(&mut self, chart_id: &str) -> ChartResult<&mut LinkageCoordinator> {
        let group = self.instance(chart_id)?.group().to_owned();
        let linkage = self.config.linkage;
        Ok(self
            .coordinators
            .entry(group.clone())
            .or_insert_with(|| LinkageCoordinator::new(group, linkage)))
    }

    /// Runs the pending frame of every group and hands each emission to the
    /// listener.
    pub fn run_frame<S: RenderingService + ?Sized>(&mut self, service: &mut S) -> Vec<SelectionUpdate> {
        let mut updates = Vec::new();
        for coordinator in self.coordinators.values_mut() {
            if let Some(update) = coordinator.run_frame(&mut self.charts, service) {
                updates.push(update);
            }
        }
        if let Some(listener) = self.listener.as_mut() {
            for update in &updates {
                listener(update);
            }
        }
        updates
    }

    fn emit_group(&mut self, group: &str, sources: &[String]) {
        let Some(coordinator) = self.coordinators.get(group) else {
            return;
        };
        let update = coordinator.selection_update(&self.charts, sources);
        if update.entries.is_empty() {
            return;
        }
        if let Some(listener) = self.listener.as_mut() {
            listener(&update);
        }
    }

    /// Switches every chart to `theme` and re-renders the set.
    pub fn set_theme<S: RenderingService + ?Sized>(&mut self, theme: Theme, service: &mut S) -> usize {
        self.config.theme = theme;
        for instance in self.charts.values_mut() {
            instance.set_theme(theme);
        }
        self.render_all(service)
    }

    /// Expands a chart to fill the container, or restores it.
    ///
    /// Affected charts are re-rendered with their new toolbox state and
    /// height; render failures are logged.
    pub fn toggle_enlarge<S: RenderingService + ?Sized>(
        &mut self,
        chart_id: &str,
        service: &mut S,
    ) -> ChartResult<EnlargeToggle> {
        self.instance(chart_id)?;
        let toggle = self.enlarge.toggle(chart_id);
        for affected in [&toggle.restored, &toggle.expanded].into_iter().flatten() {
            let state = self.enlarge.status(affected);
            let Some(instance) = self.charts.get_mut(affected) else {
                continue;
            };
            instance.set_enlarge_shrink(state);
            if let Err(err) = self.render_chart(affected, service) {
                warn!(chart_id = %affected, error = %err, "re-render after enlarge toggle failed");
            }
        }
        Ok(toggle)
    }

    /// Pixel frame of one chart inside a container laid out per the set's
    /// layout config.
    pub fn chart_frame(
        &self,
        chart_id: &str,
        container_width: f64,
        container_height: f64,
    ) -> ChartResult<ChartFrame> {
        self.instance(chart_id)?;
        Ok(self.config.layout.frame(
            container_width,
            container_height,
            self.charts.len(),
            self.enlarge.expanded() == Some(chart_id),
        ))
    }

    /// Table view of one chart's series.
    pub fn tabular_view(&self, chart_id: &str, spec: &TabularViewSpec) -> ChartResult<Table> {
        let instance = self.instance(chart_id)?;
        assemble_table(instance.series(), instance.domain(), spec)
    }

    /// Replaces the host store backing the y-axis limit cache and applies its
    /// limits to every existing chart.
    pub fn set_y_axis_limit_store(&mut self, store: impl KeyValueStore + 'static) {
        let store: Box<dyn KeyValueStore> = Box::new(store);
        self.limits = YAxisLimitCache::new(store);
        self.apply_y_axis_limits();
    }

    #[must_use]
    pub fn y_axis_limit_cache(&self) -> &LimitCache {
        &self.limits
    }

    /// Re-reads the cache and overrides the limits of every matching series.
    pub fn apply_y_axis_limits(&mut self) {
        for instance in self.charts.values_mut() {
            self.limits.apply_to(instance.series_mut());
        }
    }

    /// Commits limit edits to the cache and applies the result to every chart.
    pub fn commit_y_axis_limits(&mut self, updates: &[YAxisLimitUpdate]) -> ChartResult<usize> {
        let committed = self.limits.commit(updates)?;
        if committed > 0 {
            self.apply_y_axis_limits();
        }
        Ok(committed)
    }
}

fn ensure_unique_names(series: &[SeriesSpec]) -> ChartResult<()> {
    for (index, spec) in series.iter().enumerate() {
        if series[..index].iter().any(|earlier| earlier.name == spec.name) {
            return Err(ChartError::Validation(format!(
                "series name `{}` is used more than once in one chart",
                spec.name
            )));
        }
    }
    Ok(())
}
