use std::io::Write;

use colored::Colorize;

use crate::error::Result;
use crate::report::grouped::{GroupView, ReportGroup};

/// Writes each group's identifier followed by its rows as an aligned table.
/// The leading column is the row's position in the source table.
pub fn write_text<'a, W, I>(out: &mut W, groups: I, colored: bool) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = ReportGroup<'a>>,
{
    let mut written = 0;
    for group in groups {
        let name = group.name();
        if colored {
            writeln!(out, "{}", name.bold())?;
        } else {
            writeln!(out, "{}", name)?;
        }
        write_group_table(out, &group)?;
        written += 1;
    }
    Ok(written)
}

fn write_group_table<W: Write>(out: &mut W, group: &ReportGroup<'_>) -> Result<()> {
    let headers: Vec<&str> = group.columns().iter().map(|c| c.name()).collect();
    let rows: Vec<(String, Vec<String>)> = group
        .rows()
        .map(|row| {
            (
                row.index.to_string(),
                row.values.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect();

    let index_width = rows.iter().map(|(i, _)| i.len()).max().unwrap_or(0);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|(_, cells)| cells[col].len())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut line = format!("{:>width$}", "", width = index_width);
    for (header, width) in headers.iter().zip(&widths) {
        line.push_str(&format!("  {:>width$}", header, width = width));
    }
    writeln!(out, "{}", line)?;

    for (index, cells) in &rows {
        let mut line = format!("{:>width$}", index, width = index_width);
        for (cell, width) in cells.iter().zip(&widths) {
            line.push_str(&format!("  {:>width$}", cell, width = width));
        }
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Machine-readable form: an array of `{ group, columns, rows }` objects
pub fn write_json<'a, W, I>(out: &mut W, groups: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = ReportGroup<'a>>,
{
    let views: Vec<GroupView> = groups.into_iter().map(|g| g.to_view()).collect();
    serde_json::to_writer_pretty(&mut *out, &views)?;
    writeln!(out)?;
    Ok(views.len())
}
