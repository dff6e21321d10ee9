//! Chart data model: series, x-axis domain, and comparison intervals.

pub mod domain;
pub mod intervals;
pub mod series;
pub mod types;

pub use domain::XAxisDomain;
pub use intervals::{IndexInterval, IntervalList, compare_intervals};
pub use series::{
    CompareMode, MarkLineKey, MarkLineSpec, SEGMENT_KEY_DELIMITER, SeriesLinkSpec, SeriesSpec,
    VisualMapBand, VisualMapSpec, split_segment_key,
};
pub use types::{
    EnlargeShrink, Language, SeriesClassType, SeriesDataType, SeriesPoint, Theme, XValue,
};
