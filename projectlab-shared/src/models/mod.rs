/// Database models for ProjectLab
///
/// This module contains all database models and their CRUD operations.
/// Updates are full-row replace: every field of the row is supplied and
/// written, there is no partial-patch path.
///
/// # Models
///
/// - `user`: user accounts
/// - `salary`: one optional salary row per user
/// - `project`: projects owned by a user
/// - `project_member`: join rows for the N-N user/project relationship
/// - `iteration`: iterations belonging to a project
/// - `task`: tasks belonging to an iteration, referencing creator/executor users
///
/// # Example
///
/// ```no_run
/// use projectlab_shared::models::user::{User, CreateUser};
/// use projectlab_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password: "hunter2hunter2".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod iteration;
pub mod project;
pub mod project_member;
pub mod salary;
pub mod task;
pub mod user;
