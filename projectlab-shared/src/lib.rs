//! # ProjectLab Shared Library
//!
//! Shared data layer for the ProjectLab API server: database pool and
//! migration helpers, one model module per table, and the read-only query
//! layer composing results across tables.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and migration runner
//! - `models`: database models and CRUD operations
//! - `queries`: derived/composite read-only queries

pub mod db;
pub mod models;
pub mod queries;

/// Current version of the ProjectLab shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
