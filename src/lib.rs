//! HighLandirect migration library
//!
//! Copies the legacy desktop database (customers, products, stores, orders,
//! order history and report memos) into the normalized schema used by the
//! web back-office.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod destination;
pub mod entities;
pub mod errors;
pub mod legacy;
pub mod migration;

pub use config::{load_config, MigrationConfig, OrderHistoryPolicy};
pub use errors::{MigrationError, MigrationResult};
pub use migration::{run_migration, MigrationReport, MigrationRequest};
