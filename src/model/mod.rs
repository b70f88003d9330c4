// File: ./src/model/mod.rs
pub mod adapter;
pub mod instance;
pub mod row;

pub use adapter::{normalize_millis, read_instances};
pub use instance::{Instance, count_in_day};
pub use row::{INSTANCE_FIELDS, INSTANCES_URI, InstanceRow, RowSource, RowValue};
