// src/dataset/arrow.rs

use anyhow::{anyhow, Context, Result};
use arrow::array::{Array, ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

use super::{Dataset, DatasetRow, COLUMNS};
use crate::reference::Region;

/// Arrow schema of the exported table, columns in output order.
pub fn dataset_schema() -> Arc<Schema> {
    let types = [
        DataType::Utf8,
        DataType::Utf8,
        DataType::Int32,
        DataType::Float64,
        DataType::Float64,
        DataType::Float64,
        DataType::Utf8,
        DataType::Float64,
    ];
    let fields: Vec<Field> = COLUMNS
        .iter()
        .zip(types)
        .map(|(name, dt)| Field::new(*name, dt, false))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Convert the dataset into a single record batch.
pub fn to_record_batch(dataset: &Dataset) -> Result<RecordBatch> {
    let rows = dataset.rows();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.country()))),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.region().as_str()),
        )),
        Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year()))),
        Arc::new(Float64Array::from_iter_values(
            rows.iter().map(|r| r.duties_collected()),
        )),
        Arc::new(Float64Array::from_iter_values(
            rows.iter().map(|r| r.trade_volume()),
        )),
        Arc::new(Float64Array::from_iter_values(
            rows.iter().map(|r| r.effective_duty_rate()),
        )),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.main_exports()),
        )),
        Arc::new(Float64Array::from_iter_values(
            rows.iter().map(|r| r.duties_trade_ratio()),
        )),
    ];
    RecordBatch::try_new(dataset_schema(), columns).context("building dataset record batch")
}

fn column<'a, T: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .ok_or_else(|| anyhow!("missing column {:?}", name))?
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| anyhow!("column {:?} has unexpected type", name))
}

/// Read rows back out of a record batch with the dataset schema.
pub fn rows_from_record_batch(batch: &RecordBatch) -> Result<Vec<DatasetRow>> {
    let country = column::<StringArray>(batch, COLUMNS[0])?;
    let region = column::<StringArray>(batch, COLUMNS[1])?;
    let year = column::<Int32Array>(batch, COLUMNS[2])?;
    let duties = column::<Float64Array>(batch, COLUMNS[3])?;
    let trade = column::<Float64Array>(batch, COLUMNS[4])?;
    let rate = column::<Float64Array>(batch, COLUMNS[5])?;
    let exports = column::<StringArray>(batch, COLUMNS[6])?;
    let stored_ratio = column::<Float64Array>(batch, COLUMNS[7])?;

    (0..batch.num_rows())
        .map(|i| {
            let region: Region = region
                .value(i)
                .parse()
                .with_context(|| format!("row {}", i))?;
            Ok(DatasetRow::new(
                country.value(i),
                region,
                year.value(i),
                duties.value(i),
                trade.value(i),
                rate.value(i),
                exports.value(i),
            )
            .with_stored_ratio(stored_ratio.value(i)))
        })
        .collect()
}
