use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::model::{Theme, XAxisDomain};
use crate::render::RenderingService;
use crate::template::X_AXIS_ID;

use super::graphic::marker_graphics;
use super::{MARKER_END_ID, MARKER_START_ID, WindowMarker, WindowMarkerPair};

/// Owns the window-selection marker pair of one chart instance.
///
/// Geometry always comes from the rendering service; the controller only
/// clamps the results into the chart's x-axis domain. It never notifies
/// other charts.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowMarkerController {
    chart_id: String,
    pair: Option<WindowMarkerPair>,
}

/// Default marker indices: floor of one and two thirds of the domain length.
#[must_use]
pub fn default_marker_indices(domain_len: usize) -> [usize; 2] {
    [domain_len / 3, domain_len * 2 / 3]
}

impl WindowMarkerController {
    #[must_use]
    pub fn new(chart_id: impl Into<String>) -> Self {
        Self {
            chart_id: chart_id.into(),
            pair: None,
        }
    }

    #[must_use]
    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    #[must_use]
    pub fn pair(&self) -> Option<&WindowMarkerPair> {
        self.pair.as_ref()
    }

    pub fn clear(&mut self) {
        self.pair = None;
    }

    /// Places both markers and renders them.
    ///
    /// Index precedence: `requested`, then the current pair, then the domain
    /// thirds. Indices beyond the domain are clamped onto its last key.
    pub fn place<S: RenderingService + ?Sized>(
        &mut self,
        service: &mut S,
        domain: &XAxisDomain,
        theme: Theme,
        requested: Option<[usize; 2]>,
    ) -> ChartResult<&WindowMarkerPair> {
        let indices = requested
            .or_else(|| self.pair.as_ref().map(WindowMarkerPair::indices))
            .unwrap_or_else(|| default_marker_indices(domain.len()));
        let last = domain.last_index().unwrap_or(0);
        let marker_at = |marker_id: &str, index: usize| -> ChartResult<WindowMarker> {
            let index = index.min(last);
            let pixel_x =
                service.convert_axis_index_to_pixel(&self.chart_id, X_AXIS_ID, index as f64)?;
            Ok(WindowMarker::new(
                marker_id,
                pixel_x,
                index,
                domain.key(index).unwrap_or_default(),
            ))
        };
        let start = marker_at(MARKER_START_ID, indices[0])?;
        let end = marker_at(MARKER_END_ID, indices[1])?;

        debug!(
            chart_id = %self.chart_id,
            start = start.axis_index,
            end = end.axis_index,
            "window markers placed"
        );
        let pair = self.pair.insert(WindowMarkerPair::new(start, end));
        let graphics = marker_graphics(
            pair,
            service.rendered_height(&self.chart_id)?,
            theme.accent_color(),
        );
        service.update_graphics(&self.chart_id, &graphics)?;
        Ok(pair)
    }

    /// Moves one marker to `pixel_x` and returns its clamped state.
    ///
    /// A pixel that resolves outside the domain snaps both index and pixel
    /// onto the nearest boundary.
    pub fn on_drag<S: RenderingService + ?Sized>(
        &mut self,
        service: &mut S,
        domain: &XAxisDomain,
        theme: Theme,
        marker_id: &str,
        pixel_x: f64,
    ) -> ChartResult<WindowMarker> {
        let resolved = resolve_pixel(service, &self.chart_id, domain, pixel_x)?;
        let pair = self.placed_pair_mut()?;
        let (dragged, _) = pair.split_mut(marker_id)?;
        assign_geometry(dragged, resolved);
        let dragged = dragged.clone();
        self.render_graphics(service, theme)?;
        Ok(dragged)
    }

    /// Re-resolves both markers from their current pixels, as needed after
    /// a zoom or pan changed the axis geometry. The controller is unchanged.
    pub fn recompute_from_pixels<S: RenderingService + ?Sized>(
        &self,
        service: &S,
        domain: &XAxisDomain,
    ) -> ChartResult<WindowMarkerPair> {
        resolve_pair(service, &self.chart_id, domain, self.placed_pair()?)
    }

    /// Adopts the pixel positions of a pair computed on another chart.
    ///
    /// Each pixel is resolved against this chart's own axis and clamped into
    /// `domain`, so a shorter chart never holds an index past its last key.
    pub fn apply_pair<S: RenderingService + ?Sized>(
        &mut self,
        service: &mut S,
        domain: &XAxisDomain,
        theme: Theme,
        pair: &WindowMarkerPair,
    ) -> ChartResult<()> {
        let resolved = resolve_pair(&*service, &self.chart_id, domain, pair)?;
        self.pair = Some(resolved);
        self.render_graphics(service, theme)
    }

    /// Moves this chart's marker to the pixel of a marker dragged on another
    /// chart and re-resolves the other marker from its own pixel position.
    /// Both are clamped into this chart's `domain`.
    pub fn follow_drag<S: RenderingService + ?Sized>(
        &mut self,
        service: &mut S,
        domain: &XAxisDomain,
        theme: Theme,
        dragged: &WindowMarker,
    ) -> ChartResult<()> {
        let other_pixel = {
            let pair = self.placed_pair_mut()?;
            let (_, other) = pair.split_mut(&dragged.marker_id)?;
            other.pixel_x
        };
        let own_resolved = resolve_pixel(&*service, &self.chart_id, domain, dragged.pixel_x)?;
        let other_resolved = resolve_pixel(&*service, &self.chart_id, domain, other_pixel)?;

        let pair = self.placed_pair_mut()?;
        let (own, other) = pair.split_mut(&dragged.marker_id)?;
        assign_geometry(own, own_resolved);
        assign_geometry(other, other_resolved);
        self.render_graphics(service, theme)
    }

    fn render_graphics<S: RenderingService + ?Sized>(
        &self,
        service: &mut S,
        theme: Theme,
    ) -> ChartResult<()> {
        let pair = self.placed_pair()?;
        let graphics = marker_graphics(
            pair,
            service.rendered_height(&self.chart_id)?,
            theme.accent_color(),
        );
        service.update_graphics(&self.chart_id, &graphics)
    }

    fn placed_pair(&self) -> ChartResult<&WindowMarkerPair> {
        self.pair.as_ref().ok_or_else(|| not_placed(&self.chart_id))
    }

    fn placed_pair_mut(&mut self) -> ChartResult<&mut WindowMarkerPair> {
        self.pair.as_mut().ok_or_else(|| not_placed(&self.chart_id))
    }
}

fn not_placed(chart_id: &str) -> ChartError {
    ChartError::Validation(format!("window markers are not placed on chart `{chart_id}`"))
}

/// Pixel to clamped marker geometry; the marker id is left empty.
fn resolve_pixel<S: RenderingService + ?Sized>(
    service: &S,
    chart_id: &str,
    domain: &XAxisDomain,
    pixel_x: f64,
) -> ChartResult<WindowMarker> {
    let raw = service.convert_pixel_to_axis_index(chart_id, X_AXIS_ID, pixel_x)?;
    let (axis_index, clamped) = domain.clamp_index(raw);
    let pixel_x = if clamped {
        service.convert_axis_index_to_pixel(chart_id, X_AXIS_ID, axis_index as f64)?
    } else {
        pixel_x
    };
    Ok(WindowMarker::new(
        String::new(),
        pixel_x,
        axis_index,
        domain.key(axis_index).unwrap_or_default(),
    ))
}

fn resolve_pair<S: RenderingService + ?Sized>(
    service: &S,
    chart_id: &str,
    domain: &XAxisDomain,
    pair: &WindowMarkerPair,
) -> ChartResult<WindowMarkerPair> {
    let resolve = |marker: &WindowMarker| -> ChartResult<WindowMarker> {
        let resolved = resolve_pixel(service, chart_id, domain, marker.pixel_x)?;
        Ok(WindowMarker {
            marker_id: marker.marker_id.clone(),
            ..resolved
        })
    };
    Ok(WindowMarkerPair::new(
        resolve(pair.start())?,
        resolve(pair.end())?,
    ))
}

/// Copies position fields only; the marker id stays.
fn assign_geometry(target: &mut WindowMarker, resolved: WindowMarker) {
    target.pixel_x = resolved.pixel_x;
    target.axis_index = resolved.axis_index;
    target.axis_value = resolved.axis_value;
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{WindowMarkerController, default_marker_indices};
    use crate::model::{Theme, XAxisDomain};
    use crate::render::{LinearAxis, RecordingRenderingService};
    use crate::window::{MARKER_END_ID, MARKER_START_ID};

    fn domain(len: usize) -> XAxisDomain {
        XAxisDomain::new((1..=len).map(|i| i.to_string()).collect(), false)
    }

    fn service() -> RecordingRenderingService {
        RecordingRenderingService::new().with_instance("echart1", LinearAxis::new(60.0, 10.0), 300.0)
    }

    #[test]
    fn default_placement_uses_domain_thirds() {
        assert_eq!(default_marker_indices(9), [3, 6]);
        assert_eq!(default_marker_indices(1), [0, 0]);
        assert_eq!(default_marker_indices(0), [0, 0]);

        let mut service = service();
        let mut controller = WindowMarkerController::new("echart1");
        let pair = controller
            .place(&mut service, &domain(9), Theme::Light, None)
            .unwrap();
        assert_eq!(pair.indices(), [3, 6]);
        assert_eq!(pair.start().axis_value, "4");
        assert_relative_eq!(pair.end().pixel_x, 120.0);
        assert!(service.last_graphics("echart1").is_some());
    }

    #[test]
    fn single_key_domain_makes_markers_coincide() {
        let mut service = service();
        let mut controller = WindowMarkerController::new("echart1");
        let pair = controller
            .place(&mut service, &domain(1), Theme::Dark, None)
            .unwrap();
        assert_eq!(pair.start().pixel_x, pair.end().pixel_x);
        assert_eq!(pair.start().axis_value, "1");
    }

    #[test]
    fn drag_past_the_left_edge_is_clamped_idempotently() {
        let mut service = service();
        let mut controller = WindowMarkerController::new("echart1");
        let domain = domain(10);
        controller
            .place(&mut service, &domain, Theme::Light, None)
            .unwrap();

        let first = controller
            .on_drag(&mut service, &domain, Theme::Light, MARKER_START_ID, 10.0)
            .unwrap();
        assert_eq!(first.axis_index, 0);
        assert_eq!(first.axis_value, "1");
        assert_relative_eq!(first.pixel_x, 60.0);

        let again = controller
            .on_drag(&mut service, &domain, Theme::Light, MARKER_START_ID, -500.0)
            .unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn drag_leaves_the_other_marker_untouched() {
        let mut service = service();
        let mut controller = WindowMarkerController::new("echart1");
        let domain = domain(10);
        let before = controller
            .place(&mut service, &domain, Theme::Light, Some([2, 5]))
            .unwrap()
            .start()
            .clone();
        controller
            .on_drag(&mut service, &domain, Theme::Light, MARKER_END_ID, 140.0)
            .unwrap();
        let pair = controller.pair().unwrap();
        assert_eq!(pair.start(), &before);
        assert_eq!(pair.end().axis_index, 8);
    }

    #[test]
    fn recompute_after_zoom_keeps_pixels_and_moves_indices() {
        let mut service = service();
        let mut controller = WindowMarkerController::new("echart1");
        let domain = domain(20);
        controller
            .place(&mut service, &domain, Theme::Light, Some([2, 4]))
            .unwrap();
        service
            .set_axis("echart1", LinearAxis::new(60.0, 5.0))
            .unwrap();
        let pair = controller.recompute_from_pixels(&service, &domain).unwrap();
        assert_eq!(pair.indices(), [4, 8]);
        assert_relative_eq!(pair.start().pixel_x, 80.0);
        assert_eq!(pair.start().marker_id, MARKER_START_ID);
    }

    #[test]
    fn follow_drag_resolves_against_the_own_domain() {
        let mut service = service();
        let mut controller = WindowMarkerController::new("echart1");
        let domain = domain(5);
        controller
            .place(&mut service, &domain, Theme::Light, Some([1, 2]))
            .unwrap();

        let dragged = super::WindowMarker::new(MARKER_END_ID, 400.0, 34, "35");
        controller
            .follow_drag(&mut service, &domain, Theme::Light, &dragged)
            .unwrap();
        let pair = controller.pair().unwrap();
        assert_eq!(pair.end().axis_index, 4);
        assert_eq!(pair.end().axis_value, "5");
        assert_relative_eq!(pair.end().pixel_x, 100.0);
        assert_eq!(pair.start().axis_index, 1);
    }

    #[test]
    fn applied_pair_keeps_ids_and_clamps_indices() {
        let mut service = service();
        let mut controller = WindowMarkerController::new("echart1");
        let foreign = super::WindowMarkerPair::new(
            super::WindowMarker::new(MARKER_START_ID, 80.0, 2, "3"),
            super::WindowMarker::new(MARKER_END_ID, 900.0, 84, "85"),
        );
        controller
            .apply_pair(&mut service, &domain(6), Theme::Light, &foreign)
            .unwrap();
        let pair = controller.pair().unwrap();
        assert_eq!(pair.indices(), [2, 5]);
        assert_eq!(pair.end().marker_id, MARKER_END_ID);
        assert_eq!(pair.end().axis_value, "6");
    }

    #[test]
    fn drag_before_placement_is_rejected() {
        let mut service = service();
        let mut controller = WindowMarkerController::new("echart1");
        assert!(controller
            .on_drag(&mut service, &domain(3), Theme::Light, MARKER_START_ID, 70.0)
            .is_err());
    }
}
