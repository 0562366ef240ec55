//! # ProjectLab API Server Library
//!
//! This library provides the core functionality for the ProjectLab API
//! server: per-entity CRUD endpoints over the six-table schema plus the
//! read-only query layer.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
