/// Common test utilities for integration tests
///
/// Each test gets its own throwaway database (created from the server
/// named by `DATABASE_URL`) so that whole-table queries like
/// users-in-all-projects see exactly the fixtures the test created.
/// The router is exercised in-process via `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use projectlab_api::app::{build_router, AppState};
use projectlab_api::config::{ApiConfig, Config, DatabaseConfig};
use projectlab_shared::db::{migrations, pool};
use projectlab_shared::models::iteration::{CreateIteration, Iteration};
use projectlab_shared::models::project::{CreateProject, Project};
use projectlab_shared::models::project_member::{CreateProjectMember, ProjectMember};
use projectlab_shared::models::salary::{CreateSalary, Salary};
use projectlab_shared::models::task::{CreateTask, Task};
use projectlab_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use std::sync::atomic::{AtomicU32, Ordering};
use tower::ServiceExt;

static NEXT_DB_ID: AtomicU32 = AtomicU32::new(0);

/// Test context containing a dedicated database and the router under test
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    database_url: String,
}

impl TestContext {
    /// Creates a new test context backed by a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is required for integration tests"))?;

        let database_url = unique_database_url(&base_url);
        migrations::ensure_database_exists(&database_url).await?;

        let db = PgPool::connect(&database_url).await?;
        migrations::run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: database_url.clone(),
                max_connections: 5,
            },
        };

        let app = build_router(AppState::new(db.clone(), config));

        Ok(Self {
            db,
            app,
            database_url,
        })
    }

    /// Sends a request through the router and returns status plus parsed
    /// JSON body (Null for empty bodies)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request("GET", uri, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request("DELETE", uri, None).await
    }

    /// URL of this test's dedicated database
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Drops the test database
    pub async fn cleanup(self) -> anyhow::Result<()> {
        pool::close_pool(self.db).await;
        migrations::drop_database(&self.database_url).await?;
        Ok(())
    }
}

fn unique_database_url(base_url: &str) -> String {
    let n = NEXT_DB_ID.fetch_add(1, Ordering::SeqCst);
    let db_name = format!("projectlab_test_{}_{}", std::process::id(), n);
    match base_url.rfind('/') {
        Some(idx) => format!("{}/{}", &base_url[..idx], db_name),
        None => format!("{}/{}", base_url, db_name),
    }
}

/// Creates a user fixture directly through the model layer
pub async fn create_user(ctx: &TestContext, username: &str, email: &str) -> User {
    User::create(
        &ctx.db,
        CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password: "hunter2hunter2".to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn create_salary(ctx: &TestContext, user_id: i64, amount: f64) -> Salary {
    Salary::create(&ctx.db, CreateSalary { user_id, amount })
        .await
        .unwrap()
}

pub async fn create_project(ctx: &TestContext, name: &str, owner_id: i64) -> Project {
    Project::create(
        &ctx.db,
        CreateProject {
            name: name.to_string(),
            description: format!("{} description", name),
            join_code: format!("{}-join", name),
            owner_id,
        },
    )
    .await
    .unwrap()
}

pub async fn create_member(ctx: &TestContext, user_id: i64, project_id: i64) -> ProjectMember {
    ProjectMember::create(
        &ctx.db,
        CreateProjectMember {
            user_id,
            project_id,
        },
    )
    .await
    .unwrap()
}

pub async fn create_iteration(ctx: &TestContext, name: &str, project_id: i64) -> Iteration {
    Iteration::create(
        &ctx.db,
        CreateIteration {
            name: name.to_string(),
            description: format!("{} description", name),
            project_id,
        },
    )
    .await
    .unwrap()
}

pub async fn create_task(
    ctx: &TestContext,
    iteration_id: i64,
    status: &str,
    points: i32,
    creator_id: i64,
    executor_id: Option<i64>,
) -> Task {
    Task::create(
        &ctx.db,
        CreateTask {
            iteration_id,
            points,
            title: format!("task-{}", status),
            description: "a task".to_string(),
            status: status.to_string(),
            creator_id,
            executor_id,
        },
    )
    .await
    .unwrap()
}
