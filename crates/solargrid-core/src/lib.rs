//! solargrid-core library.
//!
//! Deterministic mock data for the SolarGrid dashboard: a seeded Lehmer
//! generator, the grid views derived from it, fixed demo datasets, and the
//! locale catalog.
//!
//! # Conventions
//!
//! - **Errors**: [`error::CoreError`] for typed failures, `anyhow::Result`
//!   where a failure only needs context (config loading).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod grid;
pub mod i18n;
pub mod rng;

pub use rng::SeededRandom;
