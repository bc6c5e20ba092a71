use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::LoadError;
use super::table::RawTable;

pub(super) fn read_csv_path(path: &Path) -> Result<RawTable, LoadError> {
    let reader = builder().from_path(path)?;
    collect(reader)
}

pub(super) fn read_csv<R: Read>(input: R) -> Result<RawTable, LoadError> {
    collect(builder().from_reader(input))
}

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}

fn collect<R: Read>(mut reader: csv::Reader<R>) -> Result<RawTable, LoadError> {
    let headers = to_strings(reader.headers()?);
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(to_strings(&record?));
    }
    Ok(RawTable::new(headers, rows))
}

fn to_strings(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}
