//! Base option template, caller overrides and theme colors.

mod defaults;
mod merge;
mod registry;

pub use defaults::{
    DEFAULT_PALETTE, FEATURE_DATA_ZOOM, FEATURE_DELETE, FEATURE_ENLARGE_SHRINK, FEATURE_RESTORE,
    FEATURE_SAVE_AS_IMAGE, X_AXIS_ID, base_option, mark_line_template,
};
pub(crate) use defaults::{ENLARGE_ICON, SHRINK_ICON};
pub use merge::{ValueShape, merge_value};
pub use registry::{BaseTemplate, COLOR_KEY, TemplateRegistry, ThemeColorPair};
