//! Cross-chart window-selection linkage.

mod coordinator;
mod groups;
mod update;

pub use coordinator::{BatchState, FrameRequest, LinkageCoordinator, PendingDrag, needs_update};
pub use groups::{GROUP_DEFAULT, LinkageGroups};
pub use update::{SelectionEntry, SelectionUpdate};
