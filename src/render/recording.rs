use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ChartError, ChartResult};
use crate::render::RenderingService;

/// Linear category-axis geometry: `pixel = origin + index * step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearAxis {
    pub origin: f64,
    pub step: f64,
}

impl LinearAxis {
    #[must_use]
    pub const fn new(origin: f64, step: f64) -> Self {
        Self { origin, step }
    }

    #[must_use]
    pub fn to_pixel(self, index: f64) -> f64 {
        self.origin + index * self.step
    }

    #[must_use]
    pub fn to_index(self, pixel: f64) -> f64 {
        if self.step == 0.0 {
            return 0.0;
        }
        (pixel - self.origin) / self.step
    }
}

impl Default for LinearAxis {
    fn default() -> Self {
        Self::new(60.0, 10.0)
    }
}

/// Everything the fake saw for one chart element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordedInstance {
    pub axis: LinearAxis,
    pub height: f64,
    pub renders: Vec<Value>,
    pub graphics: Vec<Value>,
    pub failing: bool,
}

/// In-memory rendering service for headless use and tests.
///
/// It validates nothing about the option tree; it records each call and
/// answers geometry queries from a per-chart [`LinearAxis`].
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderingService {
    instances: IndexMap<String, RecordedInstance>,
}

impl RecordingRenderingService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_instance(mut self, chart_id: impl Into<String>, axis: LinearAxis, height: f64) -> Self {
        self.insert_instance(chart_id, axis, height);
        self
    }

    pub fn insert_instance(&mut self, chart_id: impl Into<String>, axis: LinearAxis, height: f64) {
        self.instances.insert(
            chart_id.into(),
            RecordedInstance {
                axis,
                height,
                ..RecordedInstance::default()
            },
        );
    }

    pub fn remove_instance(&mut self, chart_id: &str) -> Option<RecordedInstance> {
        self.instances.shift_remove(chart_id)
    }

    /// Changes the axis geometry, as a zoom or pan would.
    pub fn set_axis(&mut self, chart_id: &str, axis: LinearAxis) -> ChartResult<()> {
        self.instance_mut(chart_id)?.axis = axis;
        Ok(())
    }

    /// Makes every render call on `chart_id` fail until cleared.
    pub fn set_failing(&mut self, chart_id: &str, failing: bool) -> ChartResult<()> {
        self.instance_mut(chart_id)?.failing = failing;
        Ok(())
    }

    #[must_use]
    pub fn instance(&self, chart_id: &str) -> Option<&RecordedInstance> {
        self.instances.get(chart_id)
    }

    #[must_use]
    pub fn render_count(&self, chart_id: &str) -> usize {
        self.instances
            .get(chart_id)
            .map_or(0, |instance| instance.renders.len())
    }

    #[must_use]
    pub fn last_render(&self, chart_id: &str) -> Option<&Value> {
        self.instances
            .get(chart_id)
            .and_then(|instance| instance.renders.last())
    }

    #[must_use]
    pub fn last_graphics(&self, chart_id: &str) -> Option<&Value> {
        self.instances
            .get(chart_id)
            .and_then(|instance| instance.graphics.last())
    }

    fn instance_ref(&self, chart_id: &str) -> ChartResult<&RecordedInstance> {
        self.instances
            .get(chart_id)
            .ok_or_else(|| ChartError::InstanceNotFound(chart_id.to_owned()))
    }

    fn instance_mut(&mut self, chart_id: &str) -> ChartResult<&mut RecordedInstance> {
        self.instances
            .get_mut(chart_id)
            .ok_or_else(|| ChartError::InstanceNotFound(chart_id.to_owned()))
    }

    fn writable(&mut self, chart_id: &str) -> ChartResult<&mut RecordedInstance> {
        let instance = self.instance_mut(chart_id)?;
        if instance.failing {
            return Err(ChartError::InstanceNotFound(chart_id.to_owned()));
        }
        Ok(instance)
    }
}

impl RenderingService for RecordingRenderingService {
    fn render(&mut self, chart_id: &str, option: &Value) -> ChartResult<()> {
        self.writable(chart_id)?.renders.push(option.clone());
        Ok(())
    }

    fn update_graphics(&mut self, chart_id: &str, graphics: &Value) -> ChartResult<()> {
        self.writable(chart_id)?.graphics.push(graphics.clone());
        Ok(())
    }

    fn has_instance(&self, chart_id: &str) -> bool {
        self.instances.contains_key(chart_id)
    }

    fn convert_axis_index_to_pixel(
        &self,
        chart_id: &str,
        _axis_id: &str,
        index: f64,
    ) -> ChartResult<f64> {
        Ok(self.instance_ref(chart_id)?.axis.to_pixel(index))
    }

    fn convert_pixel_to_axis_index(
        &self,
        chart_id: &str,
        _axis_id: &str,
        pixel: f64,
    ) -> ChartResult<f64> {
        Ok(self.instance_ref(chart_id)?.axis.to_index(pixel))
    }

    fn rendered_height(&self, chart_id: &str) -> ChartResult<f64> {
        Ok(self.instance_ref(chart_id)?.height)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::{LinearAxis, RecordingRenderingService};
    use crate::error::ChartError;
    use crate::render::RenderingService;

    #[test]
    fn linear_axis_round_trips_indices() {
        let service = RecordingRenderingService::new().with_instance("echart1", LinearAxis::new(50.0, 4.0), 300.0);
        let pixel = service.convert_axis_index_to_pixel("echart1", "x", 25.0).unwrap();
        assert_relative_eq!(pixel, 150.0);
        let index = service.convert_pixel_to_axis_index("echart1", "x", 148.0).unwrap();
        assert_relative_eq!(index, 24.5);
    }

    #[test]
    fn failing_instance_rejects_renders() {
        let mut service = RecordingRenderingService::new().with_instance("echart1", LinearAxis::default(), 300.0);
        service.set_failing("echart1", true).unwrap();
        let err = service.render("echart1", &json!({})).unwrap_err();
        assert!(matches!(err, ChartError::InstanceNotFound(id) if id == "echart1"));
        assert_eq!(service.render_count("echart1"), 0);
    }
}
