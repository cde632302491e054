//! Field extraction utilities for Arrow record batches
//!
//! Every Arrow column is mapped onto `Value`: integer types become `Int`,
//! floating point types become `Float`, everything else is cast to Utf8 and
//! becomes `Str`. Nulls become `Missing`.

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::{Record, Value};

/// Downcast an array to a specific Arrow array type
fn downcast_array<'a, T: 'static>(array: &'a ArrayRef, type_name: &str) -> Result<&'a T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        ArrowError::CastError(format!("failed to downcast array to {type_name}")).into()
    })
}

/// Extract every cell of `array` as a `Value`
///
/// # Errors
/// Returns an error if the column cannot be cast to its target representation
pub fn column_values(array: &ArrayRef) -> Result<Vec<Value>> {
    match array.data_type() {
        DataType::Null => Ok(vec![Value::Missing; array.len()]),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => {
            let converted = cast(array, &DataType::Int64)?;
            let ints = downcast_array::<Int64Array>(&converted, "Int64")?;
            Ok((0..ints.len())
                .map(|i| {
                    if ints.is_null(i) {
                        Value::Missing
                    } else {
                        Value::Int(ints.value(i))
                    }
                })
                .collect())
        }
        DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            let converted = cast(array, &DataType::Float64)?;
            let floats = downcast_array::<Float64Array>(&converted, "Float64")?;
            Ok((0..floats.len())
                .map(|i| {
                    if floats.is_null(i) {
                        Value::Missing
                    } else {
                        Value::Float(floats.value(i))
                    }
                })
                .collect())
        }
        _ => {
            let converted = cast(array, &DataType::Utf8)?;
            let strings = downcast_array::<StringArray>(&converted, "Utf8")?;
            Ok((0..strings.len())
                .map(|i| {
                    if strings.is_null(i) {
                        Value::Missing
                    } else {
                        Value::Str(strings.value(i).to_string())
                    }
                })
                .collect())
        }
    }
}

/// Convert a record batch into records, one per row, fields in schema order
///
/// # Errors
/// Returns an error if any column cannot be converted
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<Record>> {
    let schema = batch.schema();
    let columns = batch
        .columns()
        .iter()
        .map(column_values)
        .collect::<Result<Vec<_>>>()?;

    let mut records = vec![Record::new(); batch.num_rows()];
    for (field, values) in schema.fields().iter().zip(columns) {
        for (record, value) in records.iter_mut().zip(values) {
            record.set(field.name().as_str(), value);
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int32Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use std::sync::Arc;

    #[test]
    fn test_batch_to_records() {
        let schema = Schema::new(vec![
            Field::new("year", DataType::Int32, true),
            Field::new("database", DataType::Utf8, true),
            Field::new("views", DataType::Float64, true),
        ]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(Int32Array::from(vec![Some(2020), None])),
                Arc::new(StringArray::from(vec![Some("Scopus"), None])),
                Arc::new(Float64Array::from(vec![Some(1.5), Some(0.0)])),
            ],
        )
        .unwrap();

        let records = batch_to_records(&batch).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("year"), &Value::Int(2020));
        assert_eq!(records[0].get("database"), &Value::from("Scopus"));
        assert_eq!(records[0].get("views"), &Value::Float(1.5));
        assert_eq!(records[1].get("year"), &Value::Missing);
        assert_eq!(records[1].get("database"), &Value::Missing);
        assert!(records[1].contains("database"));
    }

    #[test]
    fn test_boolean_column_becomes_strings() {
        let array: ArrayRef = Arc::new(arrow::array::BooleanArray::from(vec![Some(true), None]));
        let values = column_values(&array).unwrap();
        assert_eq!(values, vec![Value::from("true"), Value::Missing]);
    }
}
