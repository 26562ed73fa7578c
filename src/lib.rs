//! splitledger - shared expense tracking from the terminal
//!
//! This library tracks expenses shared within groups, derives each member's
//! net balance, and suggests a short list of payments that would settle
//! everyone up.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (members, groups, expenses, settlements)
//! - `ledger`: Balance calculation and settlement suggestions
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`: Terminal tables
//! - `export`: JSON, YAML, and CSV balance reports
//! - `cli`: Command handlers for the `splitledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use splitledger::config::{paths::LedgerPaths, settings::Settings};
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
