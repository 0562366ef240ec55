/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: health check endpoint
/// - `users`, `salaries`, `projects`, `project_members`, `iterations`,
///   `tasks`: per-entity CRUD endpoints
/// - `queries`: the read-only query layer

pub mod health;
pub mod iterations;
pub mod project_members;
pub mod projects;
pub mod queries;
pub mod salaries;
pub mod tasks;
pub mod users;
