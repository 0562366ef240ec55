/// Integration tests for the query layer
///
/// One throwaway database per test so that whole-table queries (e.g.
/// users-in-all-projects) see exactly the fixtures the test created.

mod common;

use axum::http::StatusCode;
use common::TestContext;

fn ids(list: &serde_json::Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_tasks_by_project() {
    let ctx = TestContext::new().await.unwrap();
    let user = common::create_user(&ctx, "alice", "alice@example.com").await;
    let p1 = common::create_project(&ctx, "p1", user.id).await;
    let p2 = common::create_project(&ctx, "p2", user.id).await;
    let it1 = common::create_iteration(&ctx, "it1", p1.id).await;
    let it2 = common::create_iteration(&ctx, "it2", p2.id).await;
    let t1 = common::create_task(&ctx, it1.id, "TODO", 1, user.id, None).await;
    let t2 = common::create_task(&ctx, it1.id, "DONE", 2, user.id, None).await;
    common::create_task(&ctx, it2.id, "TODO", 3, user.id, None).await;

    let (status, tasks) = ctx
        .get(&format!("/v1/queries/tasks-by-project?project_id={}", p1.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&tasks), vec![t1.id, t2.id]);

    // Unknown project id yields the empty collection, not an error
    let (status, tasks) = ctx
        .get("/v1/queries/tasks-by-project?project_id=9999")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(tasks.as_array().unwrap().is_empty());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_users_by_project_distinct_and_empty() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "alice@example.com").await;
    let bob = common::create_user(&ctx, "bob", "bob@example.com").await;
    let p1 = common::create_project(&ctx, "p1", alice.id).await;
    let p2 = common::create_project(&ctx, "p2", alice.id).await;

    // Duplicate membership rows are tolerated and deduplicated
    common::create_member(&ctx, alice.id, p1.id).await;
    common::create_member(&ctx, alice.id, p1.id).await;
    common::create_member(&ctx, bob.id, p1.id).await;

    let (status, users) = ctx
        .get(&format!("/v1/queries/users-by-project?project_id={}", p1.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&users), vec![alice.id, bob.id]);

    // Project with zero memberships
    let (status, users) = ctx
        .get(&format!("/v1/queries/users-by-project?project_id={}", p2.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(users.as_array().unwrap().is_empty());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_salaries_and_tasks_by_user() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "alice@example.com").await;
    let bob = common::create_user(&ctx, "bob", "bob@example.com").await;
    common::create_salary(&ctx, alice.id, 100.0).await;
    let project = common::create_project(&ctx, "p1", alice.id).await;
    let iteration = common::create_iteration(&ctx, "it1", project.id).await;
    let task = common::create_task(&ctx, iteration.id, "TODO", 1, alice.id, Some(bob.id)).await;

    let (status, salaries) = ctx
        .get(&format!("/v1/queries/salaries-by-user?user_id={}", alice.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(salaries.as_array().unwrap().len(), 1);
    assert_eq!(salaries[0]["amount"].as_f64(), Some(100.0));

    // Bob has no salary row
    let (status, salaries) = ctx
        .get(&format!("/v1/queries/salaries-by-user?user_id={}", bob.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(salaries.as_array().unwrap().is_empty());

    // Executor lookup: the task is bob's, not alice's (alice only created it)
    let (_, tasks) = ctx
        .get(&format!("/v1/queries/tasks-by-user?user_id={}", bob.id))
        .await;
    assert_eq!(ids(&tasks), vec![task.id]);

    let (_, tasks) = ctx
        .get(&format!("/v1/queries/tasks-by-user?user_id={}", alice.id))
        .await;
    assert!(tasks.as_array().unwrap().is_empty());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_owner_by_project() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "alice@example.com").await;
    let project = common::create_project(&ctx, "p1", alice.id).await;

    let (status, owner) = ctx
        .get(&format!("/v1/queries/owner-by-project?project_id={}", project.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(owner["id"].as_i64(), Some(alice.id));

    let (status, body) = ctx
        .get("/v1/queries/owner-by-project?project_id=9999")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_users_by_salary_and_task_status_scenario() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "a@x.com").await;
    common::create_salary(&ctx, alice.id, 100.0).await;
    let project = common::create_project(&ctx, "p1", alice.id).await;
    let iteration = common::create_iteration(&ctx, "it1", project.id).await;
    common::create_task(&ctx, iteration.id, "DONE", 1, alice.id, Some(alice.id)).await;
    common::create_task(&ctx, iteration.id, "TODO", 1, alice.id, Some(alice.id)).await;

    // Salary 100 > 50 and a DONE task as executor: included
    let (status, users) = ctx
        .get("/v1/queries/users-by-salary-and-task-status?salary=50")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&users), vec![alice.id]);

    // Salary 100 is not > 150: excluded
    let (_, users) = ctx
        .get("/v1/queries/users-by-salary-and-task-status?salary=150")
        .await;
    assert!(users.as_array().unwrap().is_empty());

    // Explicit status overrides the DONE default
    let (_, users) = ctx
        .get("/v1/queries/users-by-salary-and-task-status?salary=50&status=IN_PROGRESS")
        .await;
    assert!(users.as_array().unwrap().is_empty());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_users_with_done_tasks_but_no_salary_excluded() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "a@x.com").await;
    let project = common::create_project(&ctx, "p1", alice.id).await;
    let iteration = common::create_iteration(&ctx, "it1", project.id).await;
    common::create_task(&ctx, iteration.id, "DONE", 1, alice.id, Some(alice.id)).await;

    let (_, users) = ctx
        .get("/v1/queries/users-by-salary-and-task-status?salary=0")
        .await;
    assert!(users.as_array().unwrap().is_empty());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_projects_by_iterations_and_users_boundary() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "a@x.com").await;
    let p1 = common::create_project(&ctx, "p1", alice.id).await;
    common::create_member(&ctx, alice.id, p1.id).await;
    for i in 0..3 {
        common::create_iteration(&ctx, &format!("it{}", i), p1.id).await;
    }

    // A project with iterations but no members never qualifies
    let p2 = common::create_project(&ctx, "p2", alice.id).await;
    for i in 0..3 {
        common::create_iteration(&ctx, &format!("other{}", i), p2.id).await;
    }

    let (status, projects) = ctx
        .get("/v1/queries/projects-by-iterations-and-users?min_iterations=2")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&projects), vec![p1.id]);

    // The bound is strict: 3 is not > 3
    let (_, projects) = ctx
        .get("/v1/queries/projects-by-iterations-and-users?min_iterations=3")
        .await;
    assert!(projects.as_array().unwrap().is_empty());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_users_by_two_task_statuses() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "a@x.com").await;
    let bob = common::create_user(&ctx, "bob", "b@x.com").await;
    let project = common::create_project(&ctx, "p1", alice.id).await;
    let iteration = common::create_iteration(&ctx, "it1", project.id).await;
    common::create_task(&ctx, iteration.id, "DONE", 1, alice.id, Some(alice.id)).await;
    common::create_task(&ctx, iteration.id, "TODO", 1, alice.id, Some(alice.id)).await;
    common::create_task(&ctx, iteration.id, "DONE", 1, alice.id, Some(bob.id)).await;

    // Both statuses required: only alice has each
    let (status, users) = ctx
        .get("/v1/queries/users-by-two-task-statuses?first_status=DONE&second_status=TODO")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&users), vec![alice.id]);

    // Equal statuses reduce to a single-status filter
    let (_, users) = ctx
        .get("/v1/queries/users-by-two-task-statuses?first_status=DONE&second_status=DONE")
        .await;
    assert_eq!(ids(&users), vec![alice.id, bob.id]);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_projects_by_users_and_task_points() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "a@x.com").await;
    let bob = common::create_user(&ctx, "bob", "b@x.com").await;

    // p1: 2 members, one task with 8 points
    let p1 = common::create_project(&ctx, "p1", alice.id).await;
    common::create_member(&ctx, alice.id, p1.id).await;
    common::create_member(&ctx, bob.id, p1.id).await;
    let it1 = common::create_iteration(&ctx, "it1", p1.id).await;
    common::create_task(&ctx, it1.id, "TODO", 8, alice.id, None).await;

    // p2: 1 member, same points
    let p2 = common::create_project(&ctx, "p2", alice.id).await;
    common::create_member(&ctx, alice.id, p2.id).await;
    let it2 = common::create_iteration(&ctx, "it2", p2.id).await;
    common::create_task(&ctx, it2.id, "TODO", 8, alice.id, None).await;

    // Exact member count of 2 selects only p1
    let (status, projects) = ctx
        .get("/v1/queries/projects-by-users-and-task-points?users_count=2&points_threshold=5")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&projects), vec![p1.id]);

    // Points bound is strict: 8 is not > 8
    let (_, projects) = ctx
        .get("/v1/queries/projects-by-users-and-task-points?users_count=2&points_threshold=8")
        .await;
    assert!(projects.as_array().unwrap().is_empty());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_users_in_all_projects() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "a@x.com").await;
    let bob = common::create_user(&ctx, "bob", "b@x.com").await;

    // Zero projects: the membership condition is vacuously true for
    // every user
    let (status, users) = ctx.get("/v1/queries/users-in-all-projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&users), vec![alice.id, bob.id]);

    let p1 = common::create_project(&ctx, "p1", alice.id).await;
    let p2 = common::create_project(&ctx, "p2", alice.id).await;
    common::create_member(&ctx, alice.id, p1.id).await;
    common::create_member(&ctx, alice.id, p2.id).await;
    common::create_member(&ctx, bob.id, p1.id).await;

    // Only alice is in both projects
    let (_, users) = ctx.get("/v1/queries/users-in-all-projects").await;
    assert_eq!(ids(&users), vec![alice.id]);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_users_in_same_projects_by_email() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "a@x.com").await;
    let bob = common::create_user(&ctx, "bob", "b@x.com").await;
    let carol = common::create_user(&ctx, "carol", "c@x.com").await;
    let p1 = common::create_project(&ctx, "p1", alice.id).await;
    let p2 = common::create_project(&ctx, "p2", alice.id).await;
    common::create_member(&ctx, alice.id, p1.id).await;
    common::create_member(&ctx, bob.id, p1.id).await;
    common::create_member(&ctx, carol.id, p2.id).await;

    // Includes alice herself
    let (status, users) = ctx
        .get("/v1/queries/users-in-same-projects-by-email?email=a@x.com")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&users), vec![alice.id, bob.id]);

    let (status, body) = ctx
        .get("/v1/queries/users-in-same-projects-by-email?email=ghost@x.com")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, body) = ctx
        .get("/v1/queries/users-in-same-projects-by-email?email=not-an-email")
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_projects_by_salary_floor() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "a@x.com").await;
    let bob = common::create_user(&ctx, "bob", "b@x.com").await;
    let carol = common::create_user(&ctx, "carol", "c@x.com").await;
    common::create_salary(&ctx, alice.id, 100.0).await;
    common::create_salary(&ctx, bob.id, 50.0).await;
    common::create_salary(&ctx, carol.id, 150.0).await;

    // p1 has one member below and one member at the floor: the
    // any-member semantics still qualify it
    let p1 = common::create_project(&ctx, "p1", alice.id).await;
    common::create_member(&ctx, bob.id, p1.id).await;
    common::create_member(&ctx, alice.id, p1.id).await;

    // p2's only member is below the floor
    let p2 = common::create_project(&ctx, "p2", alice.id).await;
    common::create_member(&ctx, bob.id, p2.id).await;

    // p3's only member is above the floor
    let p3 = common::create_project(&ctx, "p3", alice.id).await;
    common::create_member(&ctx, carol.id, p3.id).await;

    let (status, projects) = ctx
        .get("/v1/queries/projects-by-salary-floor?email=a@x.com")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&projects), vec![p1.id, p3.id]);

    let (status, _) = ctx
        .get("/v1/queries/projects-by-salary-floor?email=ghost@x.com")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A reference user without a salary row is a domain error, not an
    // empty result
    common::create_user(&ctx, "dave", "d@x.com").await;
    let (status, body) = ctx
        .get("/v1/queries/projects-by-salary-floor?email=d@x.com")
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "domain_error");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_users_not_in_any_project_of_user() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "a@x.com").await;
    let bob = common::create_user(&ctx, "bob", "b@x.com").await;
    let carol = common::create_user(&ctx, "carol", "c@x.com").await;
    let p1 = common::create_project(&ctx, "p1", alice.id).await;
    let p2 = common::create_project(&ctx, "p2", alice.id).await;
    common::create_member(&ctx, alice.id, p1.id).await;
    common::create_member(&ctx, bob.id, p1.id).await;
    common::create_member(&ctx, carol.id, p2.id).await;

    // Bob shares p1 with alice; carol doesn't share anything. Alice is a
    // member of her own projects, so she is excluded too.
    let (status, users) = ctx
        .get("/v1/queries/users-not-in-any-project-of-user?username=alice")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&users), vec![carol.id]);

    let (status, _) = ctx
        .get("/v1/queries/users-not-in-any-project-of-user?username=ghost")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_iterations_with_same_task_set() {
    let ctx = TestContext::new().await.unwrap();
    let alice = common::create_user(&ctx, "alice", "a@x.com").await;
    let project = common::create_project(&ctx, "p1", alice.id).await;

    // it1 has tasks, it2 and it3 are both empty
    let it1 = common::create_iteration(&ctx, "it1", project.id).await;
    common::create_iteration(&ctx, "it2", project.id).await;
    common::create_iteration(&ctx, "it3", project.id).await;
    common::create_task(&ctx, it1.id, "TODO", 1, alice.id, None).await;

    // Always includes the named iteration itself; task sets are compared
    // by id, so no other iteration can share it1's
    let (status, names) = ctx
        .get("/v1/queries/iterations-with-same-task-set?iteration_name=it1")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names, serde_json::json!(["it1"]));

    // Two empty iterations have equal (empty) task sets
    let (_, names) = ctx
        .get("/v1/queries/iterations-with-same-task-set?iteration_name=it2")
        .await;
    assert_eq!(names, serde_json::json!(["it2", "it3"]));

    let (status, _) = ctx
        .get("/v1/queries/iterations-with-same-task-set?iteration_name=ghost")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}
