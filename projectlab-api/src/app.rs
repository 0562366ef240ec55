/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use projectlab_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = projectlab_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # Health check
/// └── /v1/                          # API v1 (versioned)
///     ├── /users                    # Entity CRUD, one sub-router per table
///     ├── /salaries
///     ├── /projects
///     ├── /project-members
///     ├── /iterations
///     ├── /tasks
///     └── /queries/                 # Read-only query layer
///         ├── GET /tasks-by-project
///         ├── GET /users-by-project
///         ├── GET /salaries-by-user
///         ├── GET /tasks-by-user
///         ├── GET /owner-by-project
///         ├── GET /users-by-salary-and-task-status
///         ├── GET /projects-by-iterations-and-users
///         ├── GET /users-by-two-task-statuses
///         ├── GET /projects-by-users-and-task-points
///         ├── GET /users-in-all-projects
///         ├── GET /users-in-same-projects-by-email
///         ├── GET /projects-by-salary-floor
///         ├── GET /users-not-in-any-project-of-user
///         └── GET /iterations-with-same-task-set
/// ```
///
/// Entity sub-routers expose `GET /` (list), `POST /` (create),
/// `PUT /:id` (full-row update), `DELETE /:id`.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route("/", post(routes::users::create_user))
        .route("/:id", put(routes::users::update_user))
        .route("/:id", delete(routes::users::delete_user));

    let salary_routes = Router::new()
        .route("/", get(routes::salaries::list_salaries))
        .route("/", post(routes::salaries::create_salary))
        .route("/:id", put(routes::salaries::update_salary))
        .route("/:id", delete(routes::salaries::delete_salary));

    let project_routes = Router::new()
        .route("/", get(routes::projects::list_projects))
        .route("/", post(routes::projects::create_project))
        .route("/:id", put(routes::projects::update_project))
        .route("/:id", delete(routes::projects::delete_project));

    let project_member_routes = Router::new()
        .route("/", get(routes::project_members::list_project_members))
        .route("/", post(routes::project_members::create_project_member))
        .route("/:id", put(routes::project_members::update_project_member))
        .route(
            "/:id",
            delete(routes::project_members::delete_project_member),
        );

    let iteration_routes = Router::new()
        .route("/", get(routes::iterations::list_iterations))
        .route("/", post(routes::iterations::create_iteration))
        .route("/:id", put(routes::iterations::update_iteration))
        .route("/:id", delete(routes::iterations::delete_iteration));

    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::create_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task));

    let query_routes = Router::new()
        .route(
            "/tasks-by-project",
            get(routes::queries::tasks_by_project),
        )
        .route(
            "/users-by-project",
            get(routes::queries::users_by_project),
        )
        .route(
            "/salaries-by-user",
            get(routes::queries::salaries_by_user),
        )
        .route("/tasks-by-user", get(routes::queries::tasks_by_user))
        .route(
            "/owner-by-project",
            get(routes::queries::owner_by_project),
        )
        .route(
            "/users-by-salary-and-task-status",
            get(routes::queries::users_by_salary_and_task_status),
        )
        .route(
            "/projects-by-iterations-and-users",
            get(routes::queries::projects_by_iterations_and_users),
        )
        .route(
            "/users-by-two-task-statuses",
            get(routes::queries::users_by_two_task_statuses),
        )
        .route(
            "/projects-by-users-and-task-points",
            get(routes::queries::projects_by_users_and_task_points),
        )
        .route(
            "/users-in-all-projects",
            get(routes::queries::users_in_all_projects),
        )
        .route(
            "/users-in-same-projects-by-email",
            get(routes::queries::users_in_same_projects_by_email),
        )
        .route(
            "/projects-by-salary-floor",
            get(routes::queries::projects_by_salary_floor),
        )
        .route(
            "/users-not-in-any-project-of-user",
            get(routes::queries::users_not_in_any_project_of_user),
        )
        .route(
            "/iterations-with-same-task-set",
            get(routes::queries::iterations_with_same_task_set),
        );

    let v1_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/salaries", salary_routes)
        .nest("/projects", project_routes)
        .nest("/project-members", project_member_routes)
        .nest("/iterations", iteration_routes)
        .nest("/tasks", task_routes)
        .nest("/queries", query_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // The browser UI is the sole external caller; it runs on its own
        // origin during development.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
