//! Table view of one chart's series for data-view export.

mod assemble;
mod types;

pub use assemble::{DEFAULT_SEGMENT_LABEL, SEGMENT_PROP, X_PROP, assemble_table};
pub use types::{
    Cell, CellKind, ColumnValue, ExtraColumn, Table, TableHead, TableRow, TabularViewSpec,
};
