// File: src/model/adapter.rs
//! Conversion from provider rows to [`Instance`] values.
use crate::error::DataAccessError;
use crate::model::instance::Instance;
use crate::model::row::{COL_BEGIN, COL_END, InstanceRow, RowSource, RowValue};
use crate::system::SystemResolver;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

/// Shifts raw provider millis by the host's offset.
///
/// The offset is the one in effect *now*, not at `millis`; an event on the
/// other side of a DST switch ends up one hour off. The result is expressed
/// in that same offset.
pub fn normalize_millis(
    millis: i64,
    offset: FixedOffset,
    column: &str,
) -> Result<DateTime<FixedOffset>, DataAccessError> {
    let out_of_range = || DataAccessError::OutOfRange {
        column: column.to_string(),
        millis,
    };
    let offset_millis = i64::from(offset.local_minus_utc()) * 1000;
    let shifted = millis.checked_sub(offset_millis).ok_or_else(out_of_range)?;
    let utc = DateTime::from_timestamp_millis(shifted).ok_or_else(out_of_range)?;
    Ok(utc.with_timezone(&offset))
}

impl Instance {
    /// Builds an instance from already-labeled columns.
    pub fn from_instance_row(
        row: InstanceRow,
        resolver: &dyn SystemResolver,
    ) -> Result<Self, DataAccessError> {
        // One offset per row so start and end stay consistent.
        let offset = resolver.current_offset();
        let date_start = normalize_millis(row.begin, offset, COL_BEGIN)?;
        let date_end = normalize_millis(row.end, offset, COL_END)?;

        log::trace!(
            "Read instance {} of calendar {} ({} -> {})",
            row.id,
            row.calendar_id,
            date_start,
            date_end
        );

        Ok(Self::new(
            row.id,
            row.calendar_id,
            row.calendar_display_name,
            row.title,
            row.description,
            date_start,
            date_end,
            row.color,
        ))
    }

    /// Builds an instance from a positional provider row.
    pub fn from_row<R: RowSource + ?Sized>(
        row: &R,
        resolver: &dyn SystemResolver,
    ) -> Result<Self, DataAccessError> {
        Self::from_instance_row(InstanceRow::from_source(row)?, resolver)
    }

    /// Builds an instance from a row keyed by provider column names.
    pub fn from_named_row(
        row: &HashMap<String, RowValue>,
        resolver: &dyn SystemResolver,
    ) -> Result<Self, DataAccessError> {
        Self::from_instance_row(InstanceRow::from_named(row)?, resolver)
    }

    pub fn from_json_row(
        row: &serde_json::Value,
        resolver: &dyn SystemResolver,
    ) -> Result<Self, DataAccessError> {
        Self::from_instance_row(InstanceRow::from_json(row)?, resolver)
    }
}

/// Reads every row, stopping at the first malformed one.
pub fn read_instances<'a, R, I>(
    rows: I,
    resolver: &dyn SystemResolver,
) -> Result<Vec<Instance>, DataAccessError>
where
    R: RowSource + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    rows.into_iter()
        .map(|row| Instance::from_row(row, resolver))
        .collect()
}
