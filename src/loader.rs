//! Dataset Loader - reads CSV text or JSON records into a `Dataset`

use crate::error::{DashboardError, Result};
use crate::record::{Dataset, DeviceRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Load a headered CSV file from disk.
pub fn load_csv_path(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        DashboardError::Load(format!("Failed to open {}: {}", path.display(), e))
    })?;
    info!("Loading devices from {}", path.display());
    load_csv_reader(file)
}

/// Load headered CSV from any reader.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(DashboardError::Load("CSV has no header row".to_string()));
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = pad_to_headers(result?, headers.len());
        let device: DeviceRecord = record.deserialize(Some(&headers))?;
        rows.push(device);
    }

    Ok(finish(rows))
}

/// Load from a JSON array of flat objects keyed by column header.
pub fn from_json_records(value: Value) -> Result<Dataset> {
    let Value::Array(items) = value else {
        return Err(DashboardError::Load("Expected a JSON array of records".to_string()));
    };

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let item = stringify_scalars(item);
        rows.push(serde_json::from_value::<DeviceRecord>(item)?);
    }

    Ok(finish(rows))
}

fn finish(rows: Vec<DeviceRecord>) -> Dataset {
    let total = rows.len();
    let dataset = Dataset::new(rows);
    let dropped = total - dataset.len();
    if dropped > 0 {
        debug!("Dropped {} rows without a model name", dropped);
    }
    info!("Data loaded: {} devices", dataset.len());
    dataset
}

/// Short rows are padded with empty cells so deserialization sees every column.
fn pad_to_headers(mut record: StringRecord, width: usize) -> StringRecord {
    while record.len() < width {
        record.push_field("");
    }
    record
}

/// Numbers and booleans become strings; nulls and nested values become missing.
fn stringify_scalars(item: Value) -> Value {
    match item {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let v = match v {
                        Value::String(s) => Value::String(s),
                        Value::Number(n) => Value::String(n.to_string()),
                        Value::Bool(b) => Value::String(b.to_string()),
                        _ => Value::Null,
                    };
                    (k, v)
                })
                .collect(),
        ),
        other => other,
    }
}
