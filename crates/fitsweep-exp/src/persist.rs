use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use fitsweep_core::{
    render_value, ErrorInfo, Metric, MetricQuadruple, ResultTable, SweepError, SweepParameter,
    SweepRecord,
};

/// Writes the table as comma separated values with a `dram_fit,res,lat,spfm,lfm`
/// header. Missing metrics become empty fields. An existing file is replaced.
pub fn write_table(table: &ResultTable, path: &Path) -> Result<(), SweepError> {
    ensure_parent(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|err| wrap_csv("persist-create", path, err))?;
    writer
        .write_record(ResultTable::COLUMNS)
        .map_err(|err| wrap_csv("persist-write-header", path, err))?;
    for record in table.records() {
        let mut row = Vec::with_capacity(ResultTable::COLUMNS.len());
        row.push(render_value(record.parameter.value()));
        for metric in Metric::ALL {
            row.push(record.metrics.get(metric).map(render_value).unwrap_or_default());
        }
        writer
            .write_record(&row)
            .map_err(|err| wrap_csv("persist-write-row", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| wrap_csv("persist-flush", path, err.into()))?;
    Ok(())
}

/// Reads a table previously written by [`write_table`].
pub fn read_table(path: &Path) -> Result<ResultTable, SweepError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|err| wrap_csv("persist-read", path, err))?;
    let headers = reader
        .headers()
        .map_err(|err| wrap_csv("persist-read", path, err))?
        .clone();
    if headers.iter().ne(ResultTable::COLUMNS) {
        return Err(SweepError::Persistence(
            ErrorInfo::new("persist-header", "unexpected result table header")
                .with_context("path", path.display().to_string())
                .with_context("found", headers.iter().collect::<Vec<_>>().join(","))
                .with_hint(ResultTable::COLUMNS.join(",")),
        ));
    }
    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|err| wrap_csv("persist-record", path, err))?;
        records.push(parse_record(&record, row, path)?);
    }
    Ok(ResultTable::from_records(records))
}

fn parse_record(record: &StringRecord, row: usize, path: &Path) -> Result<SweepRecord, SweepError> {
    let parameter = parse_field(record, 0, row, path)?.ok_or_else(|| {
        field_error(path, row, ResultTable::COLUMNS[0], "parameter value is empty")
    })?;
    let mut metrics = MetricQuadruple::missing();
    for (offset, metric) in Metric::ALL.into_iter().enumerate() {
        metrics.set(metric, parse_field(record, offset + 1, row, path)?);
    }
    Ok(SweepRecord {
        parameter: SweepParameter::new(parameter),
        metrics,
    })
}

fn parse_field(
    record: &StringRecord,
    idx: usize,
    row: usize,
    path: &Path,
) -> Result<Option<f64>, SweepError> {
    let column = ResultTable::COLUMNS[idx];
    let raw = record
        .get(idx)
        .ok_or_else(|| field_error(path, row, column, "field missing from row"))?
        .trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|err| field_error(path, row, column, &format!("{raw:?}: {err}")))
}

fn field_error(path: &Path, row: usize, column: &str, detail: &str) -> SweepError {
    SweepError::Persistence(
        ErrorInfo::new("persist-field", "invalid result table field")
            .with_context("path", path.display().to_string())
            .with_context("row", row.to_string())
            .with_context("column", column)
            .with_hint(detail),
    )
}

fn ensure_parent(path: &Path) -> Result<(), SweepError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            SweepError::Persistence(
                ErrorInfo::new("persist-create", "failed to create output directory")
                    .with_context("path", parent.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?
    }
    Ok(())
}

fn wrap_csv(code: &str, path: &Path, err: csv::Error) -> SweepError {
    SweepError::Persistence(
        ErrorInfo::new(code, "result table I/O failure")
            .with_context("path", path.display().to_string())
            .with_hint(err.to_string()),
    )
}
