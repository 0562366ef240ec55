/// Read-only query layer
///
/// The derived and composite queries the API exposes beside plain entity
/// CRUD. Every operation is stateless and idempotent: identical input
/// against identical store state yields the identical result set (order
/// is normalized by id, but callers must not rely on it).
///
/// Each multi-hop query runs as ONE SQL statement (joins, GROUP-style
/// subquery counts, EXISTS/NOT EXISTS, array comparison for set
/// equality), so it executes against a single consistent snapshot rather
/// than stitching together separate reads. Operations that resolve a
/// reference entity by unique key (project id for the owner lookup,
/// email, username, iteration name) fail with [`QueryError::NotFound`]
/// when the reference does not resolve; plain listing queries keyed by id
/// return the empty collection instead.
///
/// # Modules
///
/// - `lookups`: single-hop point lookups
/// - `composite`: multi-hop set-composition queries

pub mod composite;
pub mod lookups;

use thiserror::Error;

/// Errors produced by the query layer
///
/// Store failures propagate unchanged; there are no retries and no local
/// recovery.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A reference entity required by the operation does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// A business precondition is unmet (e.g. the reference user has no
    /// salary row)
    #[error("{0}")]
    Domain(String),

    /// Underlying storage failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
