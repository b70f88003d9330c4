// Crate root library declaration and module exports.
pub mod color_utils;
pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod header;
pub mod intent;
pub mod logging;
pub mod model;
pub mod storage;
pub mod system;

pub use error::DataAccessError;
pub use model::{Instance, InstanceRow, RowSource, RowValue};

// --- ANDROID SUPPORT ---
#[cfg(feature = "mobile")]
pub mod mobile;

#[cfg(feature = "mobile")]
uniffi::setup_scaffolding!();
