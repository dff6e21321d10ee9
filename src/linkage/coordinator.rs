use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::chart_set::ChartInstance;
use crate::render::RenderingService;

use super::{SelectionEntry, SelectionUpdate};

/// Frame batching state of one coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatchState {
    #[default]
    Idle,
    Batching,
}

/// What the host must do after reporting an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameRequest {
    /// First event of a frame: call `run_frame` on the next animation frame.
    Schedule,
    /// A frame is already scheduled and will pick this event up.
    Coalesced,
}

/// Latest reported drag of one source chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingDrag {
    pub source: String,
    pub marker_id: String,
    pub pixel_x: f64,
}

/// Whether a chart takes part in a selection update started by `source`.
///
/// With linkage off only the source itself is updated. A chart without a
/// named first series or with an empty domain is always skipped.
#[must_use]
pub fn needs_update(instance: &ChartInstance, source: &str, linkage_enabled: bool) -> bool {
    (linkage_enabled || instance.id() == source)
        && instance.has_data()
        && !instance.domain().is_empty()
}

/// Fans window-selection events out to the charts of one linkage group.
///
/// Handlers only record events; all chart mutation happens in
/// [`LinkageCoordinator::run_frame`], once per animation frame. Every group
/// owns its own coordinator, so groups never share a batching flag.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkageCoordinator {
    group: String,
    linkage_enabled: bool,
    state: BatchState,
    pending_zoom: Option<String>,
    pending_drags: IndexMap<String, PendingDrag>,
}

impl LinkageCoordinator {
    #[must_use]
    pub fn new(group: impl Into<String>, linkage_enabled: bool) -> Self {
        Self {
            group: group.into(),
            linkage_enabled,
            state: BatchState::Idle,
            pending_zoom: None,
            pending_drags: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn linkage_enabled(&self) -> bool {
        self.linkage_enabled
    }

    #[must_use]
    pub fn state(&self) -> BatchState {
        self.state
    }

    #[must_use]
    pub fn pending_drag(&self, source: &str) -> Option<&PendingDrag> {
        self.pending_drags.get(source)
    }

    /// Records a marker drag; a later drag from the same source replaces it.
    pub fn on_marker_drag(&mut self, source: &str, marker_id: &str, pixel_x: f64) -> FrameRequest {
        self.pending_drags.insert(
            source.to_owned(),
            PendingDrag {
                source: source.to_owned(),
                marker_id: marker_id.to_owned(),
                pixel_x,
            },
        );
        self.request_frame()
    }

    /// Records a zoom or pan on `source`.
    pub fn on_zoom(&mut self, source: &str) -> FrameRequest {
        self.pending_zoom = Some(source.to_owned());
        self.request_frame()
    }

    fn request_frame(&mut self) -> FrameRequest {
        match self.state {
            BatchState::Idle => {
                self.state = BatchState::Batching;
                FrameRequest::Schedule
            }
            BatchState::Batching => FrameRequest::Coalesced,
        }
    }

    /// Executes the batched events of one frame.
    ///
    /// Zoom is applied first, then drags in arrival order. A failure on one
    /// chart is logged and skipped without affecting the rest of the group.
    /// Returns the single emission of the frame, or `None` when nothing was
    /// batched.
    pub fn run_frame<S: RenderingService + ?Sized>(
        &mut self,
        charts: &mut IndexMap<String, ChartInstance>,
        service: &mut S,
    ) -> Option<SelectionUpdate> {
        if self.state == BatchState::Idle {
            return None;
        }
        self.state = BatchState::Idle;
        let zoom = self.pending_zoom.take();
        let drags = std::mem::take(&mut self.pending_drags);

        let mut sources: Vec<String> = Vec::new();
        if let Some(source) = zoom {
            self.apply_zoom(&source, charts, service);
            sources.push(source);
        }
        for drag in drags.into_values() {
            self.apply_drag(&drag, charts, service);
            if !sources.contains(&drag.source) {
                sources.push(drag.source);
            }
        }

        let update = self.selection_update(charts, &sources);
        debug!(
            group = %self.group,
            charts = update.entries.len(),
            sources = sources.len(),
            "window selection frame applied"
        );
        Some(update)
    }

    /// Snapshot of every chart of the group, flagging `sources`.
    #[must_use]
    pub fn selection_update(
        &self,
        charts: &IndexMap<String, ChartInstance>,
        sources: &[String],
    ) -> SelectionUpdate {
        let entries = charts
            .values()
            .filter(|instance| instance.group() == self.group)
            .map(|instance| SelectionEntry {
                chart_id: instance.id().to_owned(),
                markers: instance
                    .markers()
                    .pair()
                    .map(|pair| pair.markers().to_vec())
                    .unwrap_or_default(),
                is_source_of_this_update: sources.iter().any(|source| source == instance.id()),
            })
            .collect();
        SelectionUpdate {
            group: self.group.clone(),
            entries,
        }
    }

    fn should_update<S: RenderingService + ?Sized>(
        &self,
        instance: &ChartInstance,
        source: &str,
        service: &S,
    ) -> bool {
        instance.group() == self.group
            && needs_update(instance, source, self.linkage_enabled)
            && service.has_instance(instance.id())
    }

    fn apply_zoom<S: RenderingService + ?Sized>(
        &self,
        source: &str,
        charts: &mut IndexMap<String, ChartInstance>,
        service: &mut S,
    ) {
        let computing = charts.values().find(|instance| {
            instance.group() == self.group
                && (self.linkage_enabled || instance.id() == source)
                && instance.markers().pair().is_some()
                && service.has_instance(instance.id())
        });
        let Some(computing) = computing else {
            trace!(group = %self.group, source, "zoom ignored: no chart with placed markers");
            return;
        };
        let geometry = match computing
            .markers()
            .recompute_from_pixels(&*service, computing.domain())
        {
            Ok(geometry) => geometry,
            Err(err) => {
                warn!(chart_id = %computing.id(), error = %err, "zoom geometry failed");
                return;
            }
        };

        for instance in charts.values_mut() {
            if !self.should_update(instance, source, &*service) {
                continue;
            }
            let (markers, domain, theme) = instance.marker_parts();
            if let Err(err) = markers.apply_pair(service, domain, theme, &geometry) {
                warn!(chart_id = %instance.id(), error = %err, "zoom update skipped");
            }
        }
    }

    fn apply_drag<S: RenderingService + ?Sized>(
        &self,
        drag: &PendingDrag,
        charts: &mut IndexMap<String, ChartInstance>,
        service: &mut S,
    ) {
        let Some(source) = charts.get_mut(&drag.source) else {
            trace!(chart_id = %drag.source, "drag source no longer exists");
            return;
        };
        if !self.should_update(source, &drag.source, &*service) {
            return;
        }
        let (markers, domain, theme) = source.marker_parts();
        let dragged = match markers.on_drag(service, domain, theme, &drag.marker_id, drag.pixel_x) {
            Ok(marker) => marker,
            Err(err) => {
                warn!(chart_id = %drag.source, error = %err, "marker drag skipped");
                return;
            }
        };

        for instance in charts.values_mut() {
            if instance.id() == drag.source || !self.should_update(instance, &drag.source, &*service) {
                continue;
            }
            let (markers, domain, theme) = instance.marker_parts();
            if let Err(err) = markers.follow_drag(service, domain, theme, &dragged) {
                warn!(chart_id = %instance.id(), error = %err, "linked drag update skipped");
            }
        }
    }
}
