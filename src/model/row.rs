// File: ./src/model/row.rs
//! Raw rows as delivered by the calendar provider.
//!
//! The provider hands out rows either positionally (a cursor over the
//! [`INSTANCE_FIELDS`] projection) or as labeled maps keyed by the same
//! column names. Both shapes are funnelled into [`InstanceRow`], so the
//! column order only matters in [`InstanceRow::from_source`].
use crate::error::DataAccessError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Content URI of the provider's instances table (`CalendarContract.Instances.CONTENT_URI`).
pub const INSTANCES_URI: &str = "content://com.android.calendar/instances/when";

pub const COL_ID: &str = "_id";
pub const COL_CALENDAR_ID: &str = "calendar_id";
pub const COL_CALENDAR_DISPLAY_NAME: &str = "calendar_displayName";
pub const COL_TITLE: &str = "title";
pub const COL_DESCRIPTION: &str = "description";
pub const COL_BEGIN: &str = "begin";
pub const COL_END: &str = "end";
pub const COL_CALENDAR_COLOR: &str = "calendar_color";

/// Projection the host must query with. Order is significant for positional rows.
pub const INSTANCE_FIELDS: [&str; 8] = [
    COL_ID,
    COL_CALENDAR_ID,
    COL_CALENDAR_DISPLAY_NAME,
    COL_TITLE,
    COL_DESCRIPTION,
    COL_BEGIN,
    COL_END,
    COL_CALENDAR_COLOR,
];

/// One cell of a provider row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowValue {
    Null,
    Integer(i64),
    Text(String),
    Blob(Vec<u8>),
}

impl RowValue {
    /// Reads the cell the way the provider cursor's `getString` does:
    /// integers are rendered in decimal and NULL reads as empty.
    pub fn read_string(&self, column: &str) -> Result<String, DataAccessError> {
        match self {
            RowValue::Text(s) => Ok(s.clone()),
            RowValue::Integer(n) => Ok(n.to_string()),
            RowValue::Null => Ok(String::new()),
            RowValue::Blob(_) => Err(DataAccessError::TypeMismatch {
                column: column.to_string(),
                expected: "string",
            }),
        }
    }

    /// Reads the cell the way the provider cursor's `getLong` does:
    /// numeric text is parsed, NULL is rejected.
    pub fn read_long(&self, column: &str) -> Result<i64, DataAccessError> {
        match self {
            RowValue::Integer(n) => Ok(*n),
            RowValue::Text(s) => {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| DataAccessError::TypeMismatch {
                        column: column.to_string(),
                        expected: "64-bit integer",
                    })
            }
            RowValue::Null => Err(DataAccessError::NullValue(column.to_string())),
            RowValue::Blob(_) => Err(DataAccessError::TypeMismatch {
                column: column.to_string(),
                expected: "64-bit integer",
            }),
        }
    }
}

impl From<&str> for RowValue {
    fn from(s: &str) -> Self {
        RowValue::Text(s.to_string())
    }
}

impl From<String> for RowValue {
    fn from(s: String) -> Self {
        RowValue::Text(s)
    }
}

impl From<i64> for RowValue {
    fn from(n: i64) -> Self {
        RowValue::Integer(n)
    }
}

/// Positional, typed access to a row, mirroring a provider cursor.
pub trait RowSource {
    fn column_count(&self) -> usize;
    fn get_string(&self, index: usize) -> Result<String, DataAccessError>;
    fn get_long(&self, index: usize) -> Result<i64, DataAccessError>;
}

fn column_name(index: usize) -> String {
    INSTANCE_FIELDS
        .get(index)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("#{}", index))
}

fn cell(row: &[RowValue], index: usize) -> Result<&RowValue, DataAccessError> {
    row.get(index).ok_or(DataAccessError::ColumnCount {
        expected: INSTANCE_FIELDS.len(),
        found: row.len(),
    })
}

impl RowSource for [RowValue] {
    fn column_count(&self) -> usize {
        self.len()
    }

    fn get_string(&self, index: usize) -> Result<String, DataAccessError> {
        cell(self, index)?.read_string(&column_name(index))
    }

    fn get_long(&self, index: usize) -> Result<i64, DataAccessError> {
        cell(self, index)?.read_long(&column_name(index))
    }
}

impl RowSource for Vec<RowValue> {
    fn column_count(&self) -> usize {
        self.len()
    }

    fn get_string(&self, index: usize) -> Result<String, DataAccessError> {
        self.as_slice().get_string(index)
    }

    fn get_long(&self, index: usize) -> Result<i64, DataAccessError> {
        self.as_slice().get_long(index)
    }
}

/// The eight projected columns, by name. Timestamps are still raw provider millis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRow {
    pub id: String,
    pub calendar_id: String,
    pub calendar_display_name: String,
    pub title: String,
    pub description: String,
    pub begin: i64,
    pub end: i64,
    pub color: String,
}

impl InstanceRow {
    /// Reads a positional row laid out as [`INSTANCE_FIELDS`].
    pub fn from_source<R: RowSource + ?Sized>(row: &R) -> Result<Self, DataAccessError> {
        let found = row.column_count();
        if found != INSTANCE_FIELDS.len() {
            return Err(DataAccessError::ColumnCount {
                expected: INSTANCE_FIELDS.len(),
                found,
            });
        }

        Ok(Self {
            id: row.get_string(0)?,
            calendar_id: row.get_string(1)?,
            calendar_display_name: row.get_string(2)?,
            title: row.get_string(3)?,
            description: row.get_string(4)?,
            begin: row.get_long(5)?,
            end: row.get_long(6)?,
            color: row.get_string(7)?,
        })
    }

    /// Reads a labeled row keyed by provider column names. Extra keys are ignored.
    pub fn from_named(row: &HashMap<String, RowValue>) -> Result<Self, DataAccessError> {
        let get = |name: &str| {
            row.get(name)
                .ok_or_else(|| DataAccessError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            id: get(COL_ID)?.read_string(COL_ID)?,
            calendar_id: get(COL_CALENDAR_ID)?.read_string(COL_CALENDAR_ID)?,
            calendar_display_name: get(COL_CALENDAR_DISPLAY_NAME)?
                .read_string(COL_CALENDAR_DISPLAY_NAME)?,
            title: get(COL_TITLE)?.read_string(COL_TITLE)?,
            description: get(COL_DESCRIPTION)?.read_string(COL_DESCRIPTION)?,
            begin: get(COL_BEGIN)?.read_long(COL_BEGIN)?,
            end: get(COL_END)?.read_long(COL_END)?,
            color: get(COL_CALENDAR_COLOR)?.read_string(COL_CALENDAR_COLOR)?,
        })
    }

    /// Reads a row exported as JSON: either an object keyed by column names
    /// or an array in projection order.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DataAccessError> {
        let to_cell = |column: &str, v: &serde_json::Value| {
            serde_json::from_value::<RowValue>(v.clone()).map_err(|_| {
                DataAccessError::TypeMismatch {
                    column: column.to_string(),
                    expected: "provider cell",
                }
            })
        };

        match value {
            serde_json::Value::Object(map) => {
                // Only projected columns are converted; anything else is ignored.
                let mut cells = HashMap::with_capacity(INSTANCE_FIELDS.len());
                for name in INSTANCE_FIELDS {
                    if let Some(v) = map.get(name) {
                        cells.insert(name.to_string(), to_cell(name, v)?);
                    }
                }
                Self::from_named(&cells)
            }
            serde_json::Value::Array(items) => {
                let cells = items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| to_cell(&column_name(i), v))
                    .collect::<Result<Vec<_>, _>>()?;
                Self::from_source(&cells)
            }
            _ => Err(DataAccessError::TypeMismatch {
                column: "row".to_string(),
                expected: "object or array",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standup_cells() -> Vec<RowValue> {
        vec![
            "1".into(),
            "10".into(),
            "Work".into(),
            "Standup".into(),
            "Daily sync".into(),
            1_700_000_000_000i64.into(),
            1_700_003_600_000i64.into(),
            "#FF0000".into(),
        ]
    }

    #[test]
    fn test_positional_row_reads_every_column() {
        let row = InstanceRow::from_source(&standup_cells()).unwrap();
        assert_eq!(row.id, "1");
        assert_eq!(row.calendar_id, "10");
        assert_eq!(row.calendar_display_name, "Work");
        assert_eq!(row.title, "Standup");
        assert_eq!(row.description, "Daily sync");
        assert_eq!(row.begin, 1_700_000_000_000);
        assert_eq!(row.end, 1_700_003_600_000);
        assert_eq!(row.color, "#FF0000");
    }

    #[test]
    fn test_short_row_is_rejected() {
        let mut cells = standup_cells();
        cells.truncate(7);
        assert_eq!(
            InstanceRow::from_source(&cells),
            Err(DataAccessError::ColumnCount {
                expected: 8,
                found: 7
            })
        );
    }

    #[test]
    fn test_integer_cells_coerce_to_strings() {
        let mut cells = standup_cells();
        cells[0] = RowValue::Integer(42);
        cells[7] = RowValue::Integer(-16776961);
        let row = InstanceRow::from_source(&cells).unwrap();
        assert_eq!(row.id, "42");
        assert_eq!(row.color, "-16776961");
    }

    #[test]
    fn test_null_description_reads_empty() {
        let mut cells = standup_cells();
        cells[4] = RowValue::Null;
        let row = InstanceRow::from_source(&cells).unwrap();
        assert_eq!(row.description, "");
    }

    #[test]
    fn test_bad_timestamp_types() {
        let mut cells = standup_cells();
        cells[5] = RowValue::Text("soon".to_string());
        assert!(matches!(
            InstanceRow::from_source(&cells),
            Err(DataAccessError::TypeMismatch { ref column, .. }) if column == "begin"
        ));

        let mut cells = standup_cells();
        cells[6] = RowValue::Null;
        assert_eq!(
            InstanceRow::from_source(&cells),
            Err(DataAccessError::NullValue("end".to_string()))
        );
    }

    #[test]
    fn test_named_row_reports_missing_column() {
        let mut named: HashMap<String, RowValue> = INSTANCE_FIELDS
            .iter()
            .map(|n| n.to_string())
            .zip(standup_cells())
            .collect();
        named.insert("extra".to_string(), RowValue::Null);
        assert!(InstanceRow::from_named(&named).is_ok());

        named.remove(COL_TITLE);
        assert_eq!(
            InstanceRow::from_named(&named),
            Err(DataAccessError::MissingColumn("title".to_string()))
        );
    }

    #[test]
    fn test_json_object_and_array_rows_agree() {
        let object = serde_json::json!({
            "_id": "1",
            "calendar_id": 10,
            "calendar_displayName": "Work",
            "title": "Standup",
            "description": null,
            "begin": 1_700_000_000_000i64,
            "end": "1700003600000",
            "calendar_color": "#FF0000"
        });
        let array = serde_json::json!([
            "1", 10, "Work", "Standup", null, 1_700_000_000_000i64, "1700003600000", "#FF0000"
        ]);

        let a = InstanceRow::from_json(&object).unwrap();
        let b = InstanceRow::from_json(&array).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.calendar_id, "10");
        assert_eq!(a.end, 1_700_003_600_000);
    }

    #[test]
    fn test_blob_cells_are_rejected() {
        let mut cells = standup_cells();
        cells[3] = RowValue::Blob(vec![0xDE, 0xAD]);
        assert!(matches!(
            InstanceRow::from_source(&cells),
            Err(DataAccessError::TypeMismatch { ref column, .. }) if column == "title"
        ));
    }

    #[test]
    fn test_json_object_ignores_unprojected_keys() {
        let object = serde_json::json!({
            "_id": "1",
            "calendar_id": "10",
            "calendar_displayName": "Work",
            "title": "Standup",
            "description": "",
            "begin": 0,
            "end": 1000,
            "calendar_color": "#FF0000",
            "allDay": 1.5,
            "rrule": { "freq": "DAILY" }
        });
        let row = InstanceRow::from_json(&object).unwrap();
        assert_eq!(row.title, "Standup");

        let missing = serde_json::json!({ "_id": "1", "allDay": 1.5 });
        assert_eq!(
            InstanceRow::from_json(&missing),
            Err(DataAccessError::MissingColumn("calendar_id".to_string()))
        );
    }

    #[test]
    fn test_json_scalar_row_is_rejected() {
        assert!(InstanceRow::from_json(&serde_json::json!("row")).is_err());
    }
}
