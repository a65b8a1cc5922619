use std::io::{self, Write};

use fitsweep_core::{render_value, Metric, ResultTable};

use crate::sweep::PointFailure;

const MISSING: &str = "null";

/// Writes the full console report: the table dump followed by one
/// coordinate block per metric.
pub fn write_report<W: Write>(table: &ResultTable, out: &mut W) -> io::Result<()> {
    write_table_dump(table, out)?;
    for metric in Metric::ALL {
        writeln!(out)?;
        write_coordinate_block(table, metric, out)?;
    }
    Ok(())
}

/// Column-aligned dump of every row.
pub fn write_table_dump<W: Write>(table: &ResultTable, out: &mut W) -> io::Result<()> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(table.len() + 1);
    rows.push(ResultTable::COLUMNS.iter().map(|c| c.to_string()).collect());
    for record in table.records() {
        let mut row = vec![render_value(record.parameter.value())];
        row.extend(Metric::ALL.iter().map(|metric| cell(record.metrics.get(*metric))));
        rows.push(row);
    }
    let mut widths = [0usize; 5];
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.len());
        }
    }

    writeln!(out, "shape: ({}, {})", table.len(), ResultTable::COLUMNS.len())?;
    for (idx, row) in rows.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(value, width)| format!("{value:>width$}"))
            .collect();
        writeln!(out, "{}", line.join(" | "))?;
        if idx == 0 {
            let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
            writeln!(out, "{}", rule.join("-+-"))?;
        }
    }
    Ok(())
}

/// `(dram_fit, metric)` pairs for one column, one per line, in table order.
pub fn write_coordinate_block<W: Write>(
    table: &ResultTable,
    metric: Metric,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "# {metric} vs dram_fit")?;
    for (parameter, value) in table.column_pairs(metric) {
        writeln!(out, "({}, {})", parameter, cell(value))?;
    }
    Ok(())
}

/// Lists each incomplete sweep point with its parameter and cause.
pub fn write_failures<W: Write>(
    failures: &[PointFailure],
    total: usize,
    out: &mut W,
) -> io::Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "{} of {} sweep points incomplete:",
        failures.len(),
        total
    )?;
    for failure in failures {
        writeln!(out, "  dram_fit={}: {}", failure.parameter, failure.error)?;
    }
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map(render_value).unwrap_or_else(|| MISSING.to_string())
}
