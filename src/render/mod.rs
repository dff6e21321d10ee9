mod recording;

pub use recording::{LinearAxis, RecordedInstance, RecordingRenderingService};

use serde_json::{Value, json};

use crate::error::ChartResult;
use crate::option::ChartOption;

/// Capability surface of the external chart-rendering engine.
///
/// The crate never draws. It hands configuration snapshots to an
/// implementation of this trait and asks it for the pixel geometry of the
/// category x-axis. Every call is addressed by chart element id so
/// implementations can resolve the live instance after a remount.
pub trait RenderingService {
    /// Applies an option tree; idempotent, last write wins.
    fn render(&mut self, chart_id: &str, option: &Value) -> ChartResult<()>;

    /// Applies a built snapshot. Adapters that support callbacks override
    /// this to install the tick formatter and composite tooltip.
    fn render_option(&mut self, chart_id: &str, option: &ChartOption) -> ChartResult<()> {
        self.render(chart_id, option.json())
    }

    /// Replaces the overlay graphics of a chart.
    fn update_graphics(&mut self, chart_id: &str, graphics: &Value) -> ChartResult<()> {
        self.render(chart_id, &json!({ "graphic": graphics }))
    }

    fn has_instance(&self, chart_id: &str) -> bool;

    fn convert_axis_index_to_pixel(&self, chart_id: &str, axis_id: &str, index: f64)
    -> ChartResult<f64>;

    /// Inverse transform; may return fractional or out-of-range indices.
    fn convert_pixel_to_axis_index(&self, chart_id: &str, axis_id: &str, pixel: f64)
    -> ChartResult<f64>;

    fn rendered_height(&self, chart_id: &str) -> ChartResult<f64>;
}
