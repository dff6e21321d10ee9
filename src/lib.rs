//! chart-linkage: option synthesis and window-selection linkage for sets of
//! category charts.
//!
//! The crate builds ECharts-shaped option trees from abstract series data and
//! keeps a two-marker window selection consistent across linked charts. All
//! drawing is delegated to a host-provided [`render::RenderingService`].

pub mod chart_set;
pub mod error;
pub mod export;
pub mod layout;
pub mod linkage;
pub mod model;
pub mod option;
pub mod persist;
pub mod render;
pub mod telemetry;
pub mod template;
pub mod window;

pub use chart_set::{ChartSet, ChartSetConfig};
pub use error::{ChartError, ChartResult};
pub use option::{ChartOption, ChartOptionBuilder, ChartOptionParams};
pub use render::RenderingService;
pub use template::TemplateRegistry;
