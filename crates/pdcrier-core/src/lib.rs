//! Core types for pdcrier, a PagerDuty incident creator for scripts and cron jobs.
//!
//! This crate holds everything that does not touch the network or the filesystem:
//!
//! - **Settings**: [`FileSettings`], [`SettingOverrides`] and the resolved [`Settings`]
//! - **Types**: the PagerDuty incident wire types and [`IncidentResult`]
//! - **Errors**: [`CrierError`] and the crate [`Result`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use pdcrier_core::{resolve, FileSettings, SettingOverrides};
//!
//! let file = FileSettings {
//!     service_id: Some("SVC1".into()),
//!     ..FileSettings::default()
//! };
//! let overrides = SettingOverrides {
//!     api_token: Some("TOK".into()),
//!     sender: Some("a@b.com".into()),
//!     ..SettingOverrides::default()
//! };
//! let settings = resolve(file, overrides)?;
//! assert_eq!(settings.service_id, "SVC1");
//! ```

#![doc(html_root_url = "https://docs.rs/pdcrier-core/0.3.0")]

mod error;
pub mod settings;
pub mod types;

pub use error::{CrierError, Result, SettingField};
pub use settings::{resolve, FileSettings, SettingOverrides, Settings};
pub use types::*;
