pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::OracleConfig;

pub use adapters::{CannedProvider, InMemoryRecordStore};
pub use app::{EntitlementService, InterpretService};
pub use core::{calendar::SexagenaryCalendar, tojeong::TojeongEngine};
pub use utils::error::{OracleError, Result};
