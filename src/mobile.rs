/* mincal/src/mobile.rs
 *
 * UniFFI interface exposing the widget core to the Android host.
 */

use crate::color_utils::{TransparencyRange, with_transparency};
use crate::config::WidgetConfig;
use crate::context::StandardContext;
use crate::error::DataAccessError;
use crate::format::Format;
use crate::header::{MonthAndYearHeader, day_header_labels};
use crate::intent::{IntentOutcome, process_intent, should_redraw_on};
use crate::model::{INSTANCE_FIELDS, INSTANCES_URI, Instance, RowValue, count_in_day};
use crate::system::{FixedResolver, SystemResolver};
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;

#[derive(Debug, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MobileError {
    Generic(String),
}
impl From<String> for MobileError {
    fn from(e: String) -> Self {
        Self::Generic(e)
    }
}
impl From<&str> for MobileError {
    fn from(e: &str) -> Self {
        Self::Generic(e.to_string())
    }
}
impl From<anyhow::Error> for MobileError {
    fn from(e: anyhow::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
impl From<DataAccessError> for MobileError {
    fn from(e: DataAccessError) -> Self {
        Self::Generic(e.to_string())
    }
}
impl std::fmt::Display for MobileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MobileError::Generic(s) => s,
            }
        )
    }
}
impl std::error::Error for MobileError {}

/// One cursor cell, as read on the Kotlin side.
#[derive(uniffi::Enum)]
pub enum MobileRowValue {
    Null,
    Integer { value: i64 },
    Text { value: String },
}

impl From<MobileRowValue> for RowValue {
    fn from(v: MobileRowValue) -> Self {
        match v {
            MobileRowValue::Null => RowValue::Null,
            MobileRowValue::Integer { value } => RowValue::Integer(value),
            MobileRowValue::Text { value } => RowValue::Text(value),
        }
    }
}

#[derive(uniffi::Record)]
pub struct MobileInstance {
    pub id: String,
    pub calendar_id: String,
    pub calendar_display_name: String,
    pub title: String,
    pub description: String,
    // Epoch millis after offset normalization
    pub start_millis: i64,
    pub end_millis: i64,
    pub offset_seconds: i32,
    pub start_iso: String,
    pub end_iso: String,
    pub color: String,
}

impl From<&Instance> for MobileInstance {
    fn from(i: &Instance) -> Self {
        Self {
            id: i.id().to_string(),
            calendar_id: i.calendar_id().to_string(),
            calendar_display_name: i.calendar_display_name().to_string(),
            title: i.title().to_string(),
            description: i.description().to_string(),
            start_millis: i.date_start().timestamp_millis(),
            end_millis: i.date_end().timestamp_millis(),
            offset_seconds: i.date_start().offset().local_minus_utc(),
            start_iso: i.date_start().to_rfc3339(),
            end_iso: i.date_end().to_rfc3339(),
            color: i.color().to_string(),
        }
    }
}

#[derive(uniffi::Record)]
pub struct MobileFormat {
    pub month_header_label_length: u32,
    pub day_header_label_length: u32,
    pub header_text_relative_size: f32,
    pub day_cell_text_relative_size: f32,
}

impl From<Format> for MobileFormat {
    fn from(f: Format) -> Self {
        let clamp = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        Self {
            month_header_label_length: clamp(f.month_header_label_length),
            day_header_label_length: clamp(f.day_header_label_length),
            header_text_relative_size: f.header_text_relative_size,
            day_cell_text_relative_size: f.day_cell_text_relative_size,
        }
    }
}

#[derive(uniffi::Record)]
pub struct MobileHeader {
    pub month: String,
    pub year: String,
    pub year_relative_size: f32,
    pub text_relative_size: f32,
    pub text_colour: String,
}

#[derive(uniffi::Enum)]
pub enum MobileIntentOutcome {
    Ignored,
    Open {
        code: i32,
        action: String,
        redraw: bool,
    },
    AskForPermissions,
}

impl From<IntentOutcome> for MobileIntentOutcome {
    fn from(o: IntentOutcome) -> Self {
        match o {
            IntentOutcome::Ignored => MobileIntentOutcome::Ignored,
            IntentOutcome::Open { view, redraw } => MobileIntentOutcome::Open {
                code: view.code(),
                action: view.action().to_string(),
                redraw,
            },
            IntentOutcome::AskForPermissions => MobileIntentOutcome::AskForPermissions,
        }
    }
}

fn resolver_for(offset_millis: i64) -> Result<FixedResolver, MobileError> {
    FixedResolver::from_offset_millis(Utc::now(), offset_millis)
        .ok_or_else(|| MobileError::from(format!("Invalid UTC offset: {} ms", offset_millis)))
}

fn read_rows(
    rows: Vec<Vec<MobileRowValue>>,
    resolver: &dyn SystemResolver,
) -> Result<Vec<Instance>, MobileError> {
    rows.into_iter()
        .map(|cells| {
            let cells: Vec<RowValue> = cells.into_iter().map(RowValue::from).collect();
            Instance::from_row(&cells, resolver).map_err(MobileError::from)
        })
        .collect()
}

#[derive(uniffi::Object)]
pub struct MincalMobile {
    ctx: StandardContext,
}

#[uniffi::export]
impl MincalMobile {
    #[uniffi::constructor]
    pub fn new(android_files_dir: String) -> Self {
        crate::logging::init(log::LevelFilter::Debug);
        Self {
            ctx: StandardContext::new(Some(PathBuf::from(android_files_dir))),
        }
    }

    pub fn instance_fields(&self) -> Vec<String> {
        INSTANCE_FIELDS.iter().map(|s| s.to_string()).collect()
    }

    pub fn instances_uri(&self) -> String {
        INSTANCES_URI.to_string()
    }

    /// `offset_millis` is `TimeZone.getDefault().getOffset(now)`.
    pub fn read_instance(
        &self,
        cells: Vec<MobileRowValue>,
        offset_millis: i64,
    ) -> Result<MobileInstance, MobileError> {
        let resolver = resolver_for(offset_millis)?;
        let cells: Vec<RowValue> = cells.into_iter().map(RowValue::from).collect();
        let instance = Instance::from_row(&cells, &resolver)?;
        Ok(MobileInstance::from(&instance))
    }

    pub fn read_instances(
        &self,
        rows: Vec<Vec<MobileRowValue>>,
        offset_millis: i64,
    ) -> Result<Vec<MobileInstance>, MobileError> {
        let resolver = resolver_for(offset_millis)?;
        let instances = read_rows(rows, &resolver)?;
        log::debug!("Read {} instances", instances.len());
        Ok(instances.iter().map(MobileInstance::from).collect())
    }

    pub fn count_instances_in_day(
        &self,
        rows: Vec<Vec<MobileRowValue>>,
        offset_millis: i64,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<u32, MobileError> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| MobileError::from(format!("Invalid date {}-{}-{}", year, month, day)))?;
        let resolver = resolver_for(offset_millis)?;
        let instances = read_rows(rows, &resolver)?;
        Ok(u32::try_from(count_in_day(&instances, date)).unwrap_or(u32::MAX))
    }

    /// Symbol drawn under a day holding `count` instances, or `None` for an empty day.
    pub fn day_symbol(&self, count: u32) -> Result<Option<String>, MobileError> {
        let config = WidgetConfig::load(&self.ctx)?;
        let count = usize::try_from(count).unwrap_or(usize::MAX);
        Ok(config
            .instances_symbol_set
            .symbol_for(count)
            .map(|c| c.to_string()))
    }

    pub fn format_for_width(&self, width: Option<i32>) -> MobileFormat {
        Format::for_width(width).into()
    }

    pub fn month_and_year_header(
        &self,
        offset_millis: i64,
        width: Option<i32>,
    ) -> Result<MobileHeader, MobileError> {
        let config = WidgetConfig::load(&self.ctx)?;
        let resolver = resolver_for(offset_millis)?;
        let format = Format::for_width(width);
        let header = MonthAndYearHeader::resolve(
            resolver.now(),
            resolver.current_offset(),
            &format,
            config.calendar,
        );
        Ok(MobileHeader {
            month: header.month,
            year: header.year,
            year_relative_size: header.year_relative_size,
            text_relative_size: header.text_relative_size,
            text_colour: config.theme.main_text_colour().to_string(),
        })
    }

    pub fn day_header_labels(&self, width: Option<i32>) -> Result<Vec<String>, MobileError> {
        let config = WidgetConfig::load(&self.ctx)?;
        Ok(day_header_labels(
            config.first_day_of_week,
            &Format::for_width(width),
        ))
    }

    /// Background colour as "#AARRGGBB" for the configured theme and transparency.
    pub fn widget_background(&self) -> Result<String, MobileError> {
        let config = WidgetConfig::load(&self.ctx)?;
        with_transparency(
            config.theme.main_background(),
            config.widget_transparency(),
            TransparencyRange::COMPLETE,
        )
        .ok_or_else(|| MobileError::from("Invalid theme background colour"))
    }

    pub fn should_redraw(&self, action: String) -> bool {
        should_redraw_on(&action)
    }

    pub fn process_intent(
        &self,
        action: Option<String>,
        read_calendar_permitted: bool,
    ) -> MobileIntentOutcome {
        process_intent(action.as_deref(), read_calendar_permitted).into()
    }

    pub fn clear_configuration(&self) -> Result<(), MobileError> {
        WidgetConfig::clear(&self.ctx)?;
        Ok(())
    }
}
