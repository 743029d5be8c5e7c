use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Column, ExperimentRun, ExperimentTable, Value};
use crate::error::{AnalysisError, Result};

/// Partitions `table` by `group_key`, projects away `drop_columns` and orders each
/// partition ascending by `sort_key`.
///
/// Groups come out in first-seen order and are built lazily as the iterator is
/// advanced. Equal sort keys keep their input order.
pub fn report<'a>(
    table: &'a ExperimentTable,
    group_key: &str,
    drop_columns: &[&str],
    sort_key: &str,
) -> Result<GroupedReport<'a>> {
    let group_column: Column = group_key.parse()?;
    let sort_column: Column = sort_key.parse()?;
    let dropped = drop_columns
        .iter()
        .map(|name| name.parse::<Column>())
        .collect::<Result<Vec<_>>>()?;

    if table.is_empty() {
        return Err(AnalysisError::EmptyTable);
    }

    let columns: Vec<Column> = table
        .schema()
        .iter()
        .copied()
        .filter(|c| !dropped.contains(c))
        .collect();

    let row_keys: Vec<String> = table
        .runs()
        .iter()
        .map(|run| group_key_of(&run.value(group_column)))
        .collect();

    let groups: Vec<Value> = table
        .runs()
        .iter()
        .map(|run| normalized(run.value(group_column)))
        .unique_by(group_key_of)
        .collect();

    debug!(
        "Grouping {} rows by '{}' into {} groups, sorted by '{}'",
        table.len(),
        group_column,
        groups.len(),
        sort_column
    );

    Ok(GroupedReport {
        table,
        sort_column,
        columns,
        row_keys,
        groups: groups.into_iter(),
    })
}

/// -0.0 and 0.0 are one group
fn normalized(value: Value) -> Value {
    match value {
        Value::Float(v) if v == 0.0 => Value::Float(0.0),
        other => other,
    }
}

// Display form is unique per distinct value within a single column
fn group_key_of(value: &Value) -> String {
    normalized(value.clone()).to_string()
}

pub struct GroupedReport<'a> {
    table: &'a ExperimentTable,
    sort_column: Column,
    columns: Vec<Column>,
    row_keys: Vec<String>,
    groups: std::vec::IntoIter<Value>,
}

impl<'a> GroupedReport<'a> {
    /// Columns every group will carry after projection
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

impl<'a> Iterator for GroupedReport<'a> {
    type Item = ReportGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.groups.next()?;
        let key = group_key_of(&group);

        let mut rows: Vec<(usize, &'a ExperimentRun)> = self
            .table
            .runs()
            .iter()
            .enumerate()
            .filter(|(index, _)| self.row_keys[*index] == key)
            .collect();

        let sort_column = self.sort_column;
        rows.sort_by(|(_, a), (_, b)| a.value(sort_column).total_cmp(&b.value(sort_column)));

        Some(ReportGroup {
            group,
            columns: self.columns.clone(),
            rows,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.groups.size_hint()
    }
}

impl ExactSizeIterator for GroupedReport<'_> {}

/// One partition of the report: its identifier and the projected, ordered rows
#[derive(Debug, Clone)]
pub struct ReportGroup<'a> {
    group: Value,
    columns: Vec<Column>,
    rows: Vec<(usize, &'a ExperimentRun)>,
}

impl<'a> ReportGroup<'a> {
    pub fn group(&self) -> &Value {
        &self.group
    }

    pub fn name(&self) -> String {
        self.group.to_string()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of each row in the source table, in report order
    pub fn source_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|(index, _)| *index)
    }

    pub fn records(&self) -> impl Iterator<Item = &'a ExperimentRun> + '_ {
        self.rows.iter().map(|(_, run)| *run)
    }

    /// Projected cells of each row, in report order
    pub fn rows(&self) -> impl Iterator<Item = ReportRow> + '_ {
        self.rows.iter().map(move |(index, run)| ReportRow {
            index: *index,
            values: self.columns.iter().map(|c| run.value(*c)).collect(),
        })
    }

    pub fn to_view(&self) -> GroupView {
        GroupView {
            group: self.group.clone(),
            columns: self.columns.clone(),
            rows: self.rows().map(|row| row.values).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub index: usize,
    pub values: Vec<Value>,
}

/// Owned, serializable snapshot of a group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub group: Value,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}
