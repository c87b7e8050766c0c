//! Wiseway3 UPS monitoring core
//!
//! Turns raw SNMP readings from Wiseway3 uninterruptible power supplies into
//! monitoring services: typed value normalization, positional OID table
//! parsing with primary/fallback resolution, threshold evaluation and
//! status classification.
//!
//! # Pipeline
//!
//! ```text
//! raw row ─→ parse_section ─→ Section ─→ check plugins ─→ CheckOutput
//!               (OID table,              (CheckParams,
//!                converters,              device-reported
//!                fallbacks)               and static defaults)
//! ```
//!
//! # Example
//!
//! ```
//! use wiseway_ups::{checks, parse_section, CheckParams, Profile};
//!
//! let profile = Profile::Wiseway3Ext;
//! let row: Vec<String> = vec!["Wiseway3 10kVA".into()]; // truncated for brevity
//! let params = CheckParams::default();
//!
//! if let Some(section) = parse_section(profile.oid_table(), &row) {
//!     for plugin in checks::plugins(profile) {
//!         if (plugin.discovery)(&section) {
//!             let output = (plugin.check)(&params, &section);
//!             println!("{}: {}", plugin.service_name, output.overall_state());
//!         }
//!     }
//! }
//! ```

pub mod checks;
pub mod convert;
pub mod error;
pub mod levels;
pub mod oid;
pub mod params;
pub mod parse;
pub mod tables;
pub mod value;

pub use convert::{Converter, NOT_APPLICABLE};
pub use error::{Result, UpsError};
pub use levels::{check_levels, CheckOutput, CheckResult, LevelsSpec, Metric, SimpleLevels, State};
pub use oid::{OidDefinition, ValueKind, ValueMap};
pub use params::CheckParams;
pub use parse::{parse_section, Section};
pub use tables::Profile;
pub use value::Value;
