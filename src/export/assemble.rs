use std::collections::HashMap;

use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::model::{SeriesSpec, XAxisDomain, split_segment_key};

use super::{Cell, CellKind, ColumnValue, ExtraColumn, Table, TableHead, TableRow, TabularViewSpec};

pub const X_PROP: &str = "xProp";
pub const SEGMENT_PROP: &str = "auto";
pub const DEFAULT_SEGMENT_LABEL: &str = "Segment";

/// Flattens one chart's series into a header/row table.
///
/// Linked domains (`segmentId--x` keys) get a segment column and an x
/// column, with caller columns joined per segment id; other domains get one
/// row per key. Caller columns are type-checked before any row is built.
/// Series without a point at a row yield an empty cell.
pub fn assemble_table(
    series: &[SeriesSpec],
    domain: &XAxisDomain,
    spec: &TabularViewSpec,
) -> ChartResult<Table> {
    ensure_consistent(&spec.pre_add, "preAdd")?;
    ensure_consistent(&spec.post_add, "postAdd")?;

    let head_x_name = spec
        .head_x_name
        .clone()
        .or_else(|| series.first().and_then(|first| first.x_axis_name.clone()))
        .unwrap_or_default();

    let table = if domain.is_linked() {
        linked_table(series, domain, spec, &head_x_name)
    } else {
        simple_table(series, domain, spec, &head_x_name)
    };
    debug!(
        linked = domain.is_linked(),
        columns = table.head.len(),
        rows = table.body.len(),
        "table view assembled"
    );
    Ok(table)
}

/// All cells of one side must share a value type.
fn ensure_consistent(columns: &[ExtraColumn], side: &str) -> ChartResult<()> {
    let mut expected: Option<CellKind> = None;
    for column in columns {
        let cells = match &column.value {
            ColumnValue::One(cell) => std::slice::from_ref(cell),
            ColumnValue::Many(cells) => cells.as_slice(),
        };
        for cell in cells {
            let kind = cell.kind();
            if *expected.get_or_insert(kind) != kind {
                return Err(ChartError::Validation(format!(
                    "{side} column `{}` mixes string and number values",
                    column.name
                )));
            }
        }
    }
    Ok(())
}

fn series_heads(series: &[SeriesSpec]) -> impl Iterator<Item = TableHead> + '_ {
    series
        .iter()
        .enumerate()
        .map(|(index, spec)| TableHead::new(spec.name.as_str(), series_prop(index)))
}

fn series_prop(index: usize) -> String {
    format!("prop{index}")
}

fn pre_prop(index: usize) -> String {
    format!("preAdd{index}")
}

fn post_prop(index: usize) -> String {
    format!("postAdd{index}")
}

fn push_series_cells(row: &mut TableRow, series: &[SeriesSpec], index: usize) {
    for (series_index, spec) in series.iter().enumerate() {
        let cell = spec.value_at(index).map_or_else(Cell::empty, Cell::Number);
        row.insert(series_prop(series_index), cell);
    }
}

/// Scalar values repeat on every row; lists are index-aligned.
fn aligned_cell(value: &ColumnValue, row_index: usize) -> Cell {
    match value {
        ColumnValue::One(cell) => cell.clone(),
        ColumnValue::Many(cells) => cells.get(row_index).cloned().unwrap_or_else(Cell::empty),
    }
}

fn simple_table(
    series: &[SeriesSpec],
    domain: &XAxisDomain,
    spec: &TabularViewSpec,
    head_x_name: &str,
) -> Table {
    let mut head: Vec<TableHead> = spec
        .pre_add
        .iter()
        .enumerate()
        .map(|(index, column)| TableHead::new(column.name.as_str(), pre_prop(index)))
        .collect();
    head.push(TableHead::new(head_x_name, X_PROP));
    head.extend(series_heads(series));
    head.extend(
        spec.post_add
            .iter()
            .enumerate()
            .map(|(index, column)| TableHead::new(column.name.as_str(), post_prop(index))),
    );

    let body = domain
        .keys()
        .iter()
        .enumerate()
        .map(|(row_index, key)| {
            let mut row = TableRow::with_capacity(head.len());
            for (index, column) in spec.pre_add.iter().enumerate() {
                row.insert(pre_prop(index), aligned_cell(&column.value, row_index));
            }
            row.insert(X_PROP.to_owned(), Cell::Text(key.clone()));
            push_series_cells(&mut row, series, row_index);
            for (index, column) in spec.post_add.iter().enumerate() {
                row.insert(post_prop(index), aligned_cell(&column.value, row_index));
            }
            row
        })
        .collect();

    Table { head, body }
}

/// Caller columns joined on the segment ids of the pre-add primary-key column.
struct SegmentJoin {
    positions: HashMap<String, usize>,
}

impl SegmentJoin {
    fn from_columns(columns: &[ExtraColumn]) -> Option<Self> {
        let primary = columns.iter().find(|column| column.is_primary_key)?;
        let mut positions = HashMap::new();
        for (index, cell) in primary.value.to_list().iter().enumerate() {
            positions.entry(cell.to_string()).or_insert(index);
        }
        Some(Self { positions })
    }

    fn cell(&self, value: &ColumnValue, segment: &str) -> Cell {
        self.positions
            .get(segment)
            .and_then(|position| match value {
                ColumnValue::One(cell) => (*position == 0).then(|| cell.clone()),
                ColumnValue::Many(cells) => cells.get(*position).cloned(),
            })
            .unwrap_or_else(Cell::empty)
    }
}

fn linked_table(
    series: &[SeriesSpec],
    domain: &XAxisDomain,
    spec: &TabularViewSpec,
    head_x_name: &str,
) -> Table {
    let join = SegmentJoin::from_columns(&spec.pre_add);
    let joined = |value: &ColumnValue, segment: &str, row_index: usize| match &join {
        Some(join) => join.cell(value, segment),
        None => aligned_cell(value, row_index),
    };

    let mut head = Vec::new();
    if spec.pre_add.is_empty() {
        let label = spec.segment_label.as_deref().unwrap_or(DEFAULT_SEGMENT_LABEL);
        head.push(TableHead::new(label, SEGMENT_PROP));
    } else {
        head.extend(spec.pre_add.iter().enumerate().map(|(index, column)| {
            let prop = if column.is_primary_key {
                SEGMENT_PROP.to_owned()
            } else {
                pre_prop(index)
            };
            TableHead::new(column.name.as_str(), prop)
        }));
    }
    head.push(TableHead::new(head_x_name, X_PROP));
    head.extend(series_heads(series));
    head.extend(
        spec.post_add
            .iter()
            .enumerate()
            .map(|(index, column)| TableHead::new(column.name.as_str(), post_prop(index))),
    );

    let body = domain
        .keys()
        .iter()
        .enumerate()
        .map(|(row_index, key)| {
            let (segment, x) = split_segment_key(key);
            let mut row = TableRow::with_capacity(head.len());
            if spec.pre_add.is_empty() {
                row.insert(SEGMENT_PROP.to_owned(), Cell::Text(segment.to_owned()));
            }
            for (index, column) in spec.pre_add.iter().enumerate() {
                if column.is_primary_key {
                    row.insert(SEGMENT_PROP.to_owned(), Cell::Text(segment.to_owned()));
                } else {
                    row.insert(pre_prop(index), joined(&column.value, segment, row_index));
                }
            }
            row.insert(X_PROP.to_owned(), Cell::Text(x.to_owned()));
            push_series_cells(&mut row, series, row_index);
            for (index, column) in spec.post_add.iter().enumerate() {
                row.insert(post_prop(index), joined(&column.value, segment, row_index));
            }
            row
        })
        .collect();

    Table { head, body }
}

#[cfg(test)]
mod tests {
    use super::{X_PROP, assemble_table};
    use crate::error::ChartError;
    use crate::export::{Cell, ColumnValue, ExtraColumn, TabularViewSpec};
    use crate::model::{SeriesSpec, XAxisDomain};

    #[test]
    fn mixed_column_types_fail_before_any_row() {
        let series = vec![SeriesSpec::from_values("s1", &[1.0, 2.0])];
        let domain = XAxisDomain::derive(&series);
        let spec = TabularViewSpec::default().with_pre_add(vec![
            ExtraColumn::new("a", ColumnValue::One(Cell::from("x"))),
            ExtraColumn::new("b", ColumnValue::One(Cell::from(2.0))),
        ]);
        let err = assemble_table(&series, &domain, &spec).unwrap_err();
        assert!(matches!(err, ChartError::Validation(_)));
    }

    #[test]
    fn sparse_series_leave_empty_cells() {
        let series = vec![
            SeriesSpec::from_values("long", &[1.0, 2.0, 3.0]),
            SeriesSpec::from_values("short", &[9.0]),
        ];
        let domain = XAxisDomain::derive(&series);
        let table = assemble_table(&series, &domain, &TabularViewSpec::default()).unwrap();
        assert_eq!(table.body.len(), 3);
        assert_eq!(table.body[2]["prop1"], Cell::empty());
        assert_eq!(table.body[0]["prop1"], Cell::Number(9.0));
        assert_eq!(table.body[1][X_PROP], Cell::from("2"));
    }
}
