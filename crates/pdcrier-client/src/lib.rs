//! HTTP client for the PagerDuty REST API.
//!
//! This crate provides [`PagerDutyClient`] and the incident creator reached
//! through [`PagerDutyClient::incidents`].

#![doc(html_root_url = "https://docs.rs/pdcrier-client/0.3.0")]

mod client;
pub mod api;

pub use client::{PagerDutyClient, PagerDutyClientBuilder};
pub use pdcrier_core::{CrierError, IncidentResult, Result};
