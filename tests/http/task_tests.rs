//! `/api/tasks` behaviour.

use crate::http::helpers::{TestApp, id_at};
use rstest::rstest;
use serde_json::{Value, json};

fn descriptions(task: &Value) -> Vec<&str> {
    task["checkboxes"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["description"].as_str())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test(flavor = "multi_thread")]
async fn index_of_an_empty_board_has_one_empty_page() {
    let app = TestApp::spawn().await.expect("spawn app");

    let (status, body) = app.get("/api/tasks").await.expect("list");

    assert_eq!(status, 200);
    assert!(body.get("success").is_none());
    assert_eq!(body["tasks"], json!([]));
    assert_eq!(
        body["meta"],
        json!({
            "current_page": 1,
            "from": null,
            "last_page": 1,
            "path": "/api/tasks",
            "per_page": 15,
            "to": null,
            "total": 0,
        })
    );
    assert_eq!(body["links"]["first"], json!("/api/tasks?page=1"));
    assert_eq!(body["links"]["prev"], Value::Null);
    assert_eq!(body["links"]["next"], Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn store_creates_a_waiting_task_with_checkboxes_and_placements() {
    let app = TestApp::spawn().await.expect("spawn app");
    let first = app.create_pipeline("Sales", "deal").await.expect("pipeline");
    let second = app.create_pipeline("Delivery", "project").await.expect("pipeline");
    let owner = app.user.id().to_string();

    let (status, body) = app
        .post(
            "/api/tasks",
            &json!({
                "name": "Call the customer",
                "user_id": owner,
                "position": 3,
                "checkboxes": ["checkbox1", "checkbox2"],
                "pipelines": [
                    { "pipeline_id": first, "stage_id": null },
                    { "pipeline_id": second, "stage_id": null },
                ],
            }),
        )
        .await
        .expect("create");

    assert_eq!(status, 200, "{body}");
    assert_eq!(body["success"], json!(true));
    let task = &body["task"];
    assert_eq!(task["name"], json!("Call the customer"));
    assert_eq!(task["user"]["id"], json!(owner));
    assert_eq!(task["user"]["email"], json!("user@user.ru"));
    assert_eq!(task["status"], json!("wait"));
    assert_eq!(task["position"], json!(3));
    assert_eq!(task["start_at"], Value::Null);
    assert_eq!(task["checkboxes"][0]["description"], json!("checkbox1"));
    assert_eq!(task["checkboxes"][0]["is_checked"], json!(false));
    assert_eq!(task["checkboxes"][1]["description"], json!("checkbox2"));
    assert_eq!(task["checkboxes"][1]["is_checked"], json!(false));
    assert_eq!(
        task["pipelines"],
        json!([
            { "pipeline_id": first, "stage_id": null },
            { "pipeline_id": second, "stage_id": null },
        ])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn store_defaults_the_owner_to_the_caller() {
    let app = TestApp::spawn().await.expect("spawn app");

    let created = app
        .create_task(&json!({ "name": "Mine" }))
        .await
        .expect("create");

    assert_eq!(created["task"]["user"]["id"], json!(app.user.id().to_string()));
    assert_eq!(created["task"]["position"], json!(0));
    assert_eq!(created["task"]["checkboxes"], json!([]));
}

#[rstest]
#[case(json!({}), "name")]
#[case(json!({ "name": "" }), "name")]
#[case(json!({ "name": "Task", "user_id": "7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11" }), "user_id")]
#[case(json!({ "name": "Task", "user_id": "42" }), "user_id")]
#[case(json!({ "name": "Task", "pipelines": [{ "stage_id": null }] }), "pipelines.0.pipeline_id")]
#[case(
    json!({ "name": "Task", "pipelines": [{ "pipeline_id": "7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11" }] }),
    "pipelines"
)]
#[case(json!({ "name": "Task", "position": "first" }), "position")]
#[case(json!({ "name": 7 }), "name")]
#[case(json!({ "name": "Task", "checkboxes": "buy milk" }), "checkboxes")]
#[case(json!({ "name": "Task", "checkboxes": ["ok", 3] }), "checkboxes.1")]
#[case(json!({ "name": "Task", "pipelines": ["sales"] }), "pipelines.0")]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_invalid_payloads(#[case] payload: Value, #[case] field: &str) {
    let app = TestApp::spawn().await.expect("spawn app");

    let (status, body) = app.post("/api/tasks", &payload).await.expect("create");

    assert_eq!(status, 422, "{body}");
    assert_eq!(body["success"], json!(false));
    assert!(body["errors"][field].is_array(), "{body}");
}

#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_a_body_that_is_not_an_object() {
    let app = TestApp::spawn().await.expect("spawn app");

    let (status, body) = app
        .post("/api/tasks", &json!(["Task"]))
        .await
        .expect("create");

    assert_eq!(status, 422, "{body}");
    assert_eq!(
        body,
        json!({ "success": false, "message": "The request body must be a JSON object." })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_a_stage_from_another_pipeline() {
    let app = TestApp::spawn().await.expect("spawn app");
    let sales = app.create_pipeline("Sales", "deal").await.expect("pipeline");
    let hiring = app.create_pipeline("Hiring", "lead").await.expect("pipeline");
    let stage = app.create_stage(&hiring, "Screening", "#abc").await.expect("stage");

    let (status, body) = app
        .post(
            "/api/tasks",
            &json!({
                "name": "Misplaced",
                "pipelines": [{ "pipeline_id": sales, "stage_id": stage }],
            }),
        )
        .await
        .expect("create");

    assert_eq!(status, 422);
    assert_eq!(
        body["errors"]["pipelines"],
        json!(["The selected stage does not belong to the selected pipeline."])
    );
}

#[rstest]
#[case(
    json!({ "name": "Task", "user_id": "7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11" }),
    "user_id",
    "The selected user id is invalid."
)]
#[case(
    json!({ "name": "Task", "pipelines": [{ "pipeline_id": "7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11" }] }),
    "pipelines",
    "The selected pipeline id is invalid."
)]
#[tokio::test(flavor = "multi_thread")]
async fn store_names_unknown_references_plainly(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] message: &str,
) {
    let app = TestApp::spawn().await.expect("spawn app");

    let (status, body) = app.post("/api/tasks", &payload).await.expect("create");

    assert_eq!(status, 422, "{body}");
    assert_eq!(body["message"], json!(message));
    assert_eq!(body["errors"][field], json!([message]));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_rewrites_fields_and_reconciles_the_checklist() {
    let app = TestApp::spawn().await.expect("spawn app");
    let manager = app.register_user("manager@user.ru").await.expect("user");
    let created = app
        .create_task(&json!({
            "name": "Draft",
            "checkboxes": ["first", "second", "third"],
        }))
        .await
        .expect("create");
    let task_id = id_at(&created, "/task/id").expect("task id");
    let second = id_at(&created, "/task/checkboxes/1/id").expect("checkbox id");
    let third = id_at(&created, "/task/checkboxes/2/id").expect("checkbox id");

    let (status, body) = app
        .put(
            &format!("/api/tasks/{task_id}"),
            &json!({
                "name": "Final",
                "user_id": manager.id().to_string(),
                "status": "in_progress",
                "position": 7,
                "start_at": "2026-10-01",
                "end_at": "2026-10-20",
                "checkboxes": [
                    { "id": second, "description": "second", "is_checked": false },
                    { "id": third, "description": "third, reworded", "is_checked": true },
                    { "id": null, "description": "new checkbox 1", "is_checked": true },
                    { "id": null, "description": "new checkbox 2", "is_checked": false },
                ],
            }),
        )
        .await
        .expect("update");

    assert_eq!(status, 200, "{body}");
    let task = &body["task"];
    assert_eq!(task["name"], json!("Final"));
    assert_eq!(task["position"], json!(7));
    assert_eq!(task["status"], json!("in_progress"));
    assert_eq!(task["user"]["id"], json!(manager.id().to_string()));
    assert_eq!(task["start_at"], json!("2026-10-01"));
    assert_eq!(task["end_at"], json!("2026-10-20"));
    assert_eq!(
        descriptions(task),
        vec!["second", "third, reworded", "new checkbox 1", "new checkbox 2"]
    );
    assert_eq!(task["checkboxes"][0]["id"], json!(second));
    assert_eq!(task["checkboxes"][1]["is_checked"], json!(true));
    assert_eq!(task["checkboxes"][2]["is_checked"], json!(true));

    let (_, shown) = app
        .get(&format!("/api/tasks/{task_id}"))
        .await
        .expect("show");
    assert_eq!(shown["task"], body["task"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_without_checkboxes_keeps_the_checklist() {
    let app = TestApp::spawn().await.expect("spawn app");
    let created = app
        .create_task(&json!({ "name": "Keep", "checkboxes": ["only"] }))
        .await
        .expect("create");
    let task_id = id_at(&created, "/task/id").expect("task id");

    let (status, body) = app
        .put(
            &format!("/api/tasks/{task_id}"),
            &json!({
                "name": "Keep",
                "user_id": app.user.id().to_string(),
                "status": "done",
                "position": 1,
            }),
        )
        .await
        .expect("update");

    assert_eq!(status, 200, "{body}");
    assert_eq!(descriptions(&body["task"]), vec!["only"]);
    assert_eq!(body["task"]["status"], json!("done"));
}

#[rstest]
#[case(json!({ "status": "archived" }), "status")]
#[case(json!({ "start_at": "2026-10-20", "end_at": "2026-10-01" }), "end_at")]
#[case(json!({ "start_at": "someday" }), "start_at")]
#[case(
    json!({ "checkboxes": [{ "id": "7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11", "description": "x" }] }),
    "checkboxes"
)]
#[case(json!({ "checkboxes": [{ "id": null }] }), "checkboxes.0.description")]
#[case(json!({ "position": "second" }), "position")]
#[case(json!({ "start_at": 20_261_001 }), "start_at")]
#[case(
    json!({ "checkboxes": [{ "description": "x", "is_checked": "maybe" }] }),
    "checkboxes.0.is_checked"
)]
#[case(json!({ "pipelines": { "pipeline_id": null } }), "pipelines")]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_invalid_changes(#[case] overrides: Value, #[case] field: &str) {
    let app = TestApp::spawn().await.expect("spawn app");
    let created = app
        .create_task(&json!({ "name": "Original" }))
        .await
        .expect("create");
    let task_id = id_at(&created, "/task/id").expect("task id");

    let mut payload = json!({
        "name": "Changed",
        "user_id": app.user.id().to_string(),
        "status": "paused",
        "position": 2,
    });
    if let (Some(target), Some(extra)) = (payload.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }

    let (status, body) = app
        .put(&format!("/api/tasks/{task_id}"), &payload)
        .await
        .expect("update");
    assert_eq!(status, 422, "{body}");
    assert!(body["errors"][field].is_array(), "{body}");

    let (_, unchanged) = app
        .get(&format!("/api/tasks/{task_id}"))
        .await
        .expect("show");
    assert_eq!(unchanged["task"]["name"], json!("Original"));
    assert_eq!(unchanged["task"]["status"], json!("wait"));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_requires_the_core_fields() {
    let app = TestApp::spawn().await.expect("spawn app");
    let created = app
        .create_task(&json!({ "name": "Original" }))
        .await
        .expect("create");
    let task_id = id_at(&created, "/task/id").expect("task id");

    let (status, body) = app
        .put(&format!("/api/tasks/{task_id}"), &json!({}))
        .await
        .expect("update");

    assert_eq!(status, 422);
    for field in ["name", "position", "status", "user_id"] {
        assert!(body["errors"][field].is_array(), "missing {field}: {body}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn update_of_a_missing_task_is_not_found() {
    let app = TestApp::spawn().await.expect("spawn app");

    let (status, body) = app
        .put(
            "/api/tasks/7f0b8a8e-4c55-4f57-9a53-2c1f0a6f2b11",
            &json!({
                "name": "Ghost",
                "user_id": app.user.id().to_string(),
                "status": "wait",
                "position": 0,
            }),
        )
        .await
        .expect("update");

    assert_eq!(status, 404);
    assert_eq!(body["message"], json!("Task not found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn destroy_removes_the_task() {
    let app = TestApp::spawn().await.expect("spawn app");
    let created = app
        .create_task(&json!({ "name": "Short-lived", "checkboxes": ["a"] }))
        .await
        .expect("create");
    let task_id = id_at(&created, "/task/id").expect("task id");
    let path = format!("/api/tasks/{task_id}");

    let (status, body) = app.delete(&path).await.expect("delete");
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true }));

    let (gone, _) = app.get(&path).await.expect("show");
    assert_eq!(gone, 404);
    let (again, _) = app.delete(&path).await.expect("delete");
    assert_eq!(again, 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn index_pages_through_tasks_in_position_order() {
    let app = TestApp::spawn().await.expect("spawn app");
    for position in [4, 2, 0, 3, 1] {
        app.create_task(&json!({ "name": format!("task {position}"), "position": position }))
            .await
            .expect("create");
    }

    let (status, body) = app
        .get("/api/tasks?page=2&per_page=2")
        .await
        .expect("list");

    assert_eq!(status, 200);
    let names: Vec<&str> = body["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .filter_map(|task| task["name"].as_str())
        .collect();
    assert_eq!(names, vec!["task 2", "task 3"]);
    assert_eq!(body["meta"]["total"], json!(5));
    assert_eq!(body["meta"]["last_page"], json!(3));
    assert_eq!(body["meta"]["from"], json!(3));
    assert_eq!(body["meta"]["to"], json!(4));
    assert_eq!(body["links"]["prev"], json!("/api/tasks?page=1&per_page=2"));
    assert_eq!(body["links"]["next"], json!("/api/tasks?page=3&per_page=2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn index_filters_by_pipeline_stage_and_status() {
    let app = TestApp::spawn().await.expect("spawn app");
    let pipeline = app.create_pipeline("Sales", "deal").await.expect("pipeline");
    let stage = app.create_stage(&pipeline, "Won", "#0f0").await.expect("stage");
    app.create_task(&json!({
        "name": "placed",
        "pipelines": [{ "pipeline_id": pipeline, "stage_id": stage }],
    }))
    .await
    .expect("create");
    app.create_task(&json!({
        "name": "unstaged",
        "pipelines": [{ "pipeline_id": pipeline }],
    }))
    .await
    .expect("create");
    app.create_task(&json!({ "name": "loose" }))
        .await
        .expect("create");

    let (_, by_pipeline) = app
        .get(&format!("/api/tasks?pipeline_id={pipeline}"))
        .await
        .expect("list");
    assert_eq!(by_pipeline["meta"]["total"], json!(2));

    let (_, by_stage) = app
        .get(&format!("/api/tasks?stage_id={stage}"))
        .await
        .expect("list");
    assert_eq!(by_stage["meta"]["total"], json!(1));
    assert_eq!(by_stage["tasks"][0]["name"], json!("placed"));

    let (_, waiting) = app.get("/api/tasks?status=wait").await.expect("list");
    assert_eq!(waiting["meta"]["total"], json!(3));
    let (_, done) = app.get("/api/tasks?status=done").await.expect("list");
    assert_eq!(done["tasks"], json!([]));
}

#[rstest]
#[case("/api/tasks?page=0", "page")]
#[case("/api/tasks?per_page=500", "per_page")]
#[case("/api/tasks?status=archived", "status")]
#[case("/api/tasks?user_id=1", "user_id")]
#[case("/api/tasks?page=abc", "page")]
#[case("/api/tasks?per_page=-5", "per_page")]
#[tokio::test(flavor = "multi_thread")]
async fn index_rejects_invalid_query_values(#[case] path: &str, #[case] field: &str) {
    let app = TestApp::spawn().await.expect("spawn app");

    let (status, body) = app.get(path).await.expect("list");

    assert_eq!(status, 422, "{body}");
    assert!(body["errors"][field].is_array(), "{body}");
    assert!(
        body["message"].as_str().is_some_and(|text| text.contains(field)),
        "{body}"
    );
}
