//! Task storage against `PostgreSQL`.

use crate::postgres::helpers::{build_task, seed_pipeline, seed_stage, seed_user, setup};
use chrono::NaiveDate;
use mockable::DefaultClock;
use taskboard::paging::PageRequest;
use taskboard::pipeline::domain::PipelineId;
use taskboard::task::{
    domain::{
        CheckboxDescription, CheckboxEdit, Placement, Placements, Schedule, TaskChanges, TaskId,
        TaskName, TaskStatus,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};

fn descriptions(task: &taskboard::task::domain::Task) -> Vec<String> {
    task.checklist()
        .items()
        .iter()
        .map(|item| item.description().as_str().to_owned())
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn stores_and_loads_a_task_with_children() {
    let Some(repos) = setup().await.expect("database setup") else {
        return;
    };
    let owner = seed_user(&repos, "user@user.ru").await.expect("user");
    let pipeline = seed_pipeline(&repos, "Sales").await.expect("pipeline");
    let stage = seed_stage(&repos, &pipeline, "New").await.expect("stage");
    let other = seed_pipeline(&repos, "Delivery").await.expect("pipeline");
    let task = build_task(
        &owner,
        "Call back",
        2,
        &["first", "second"],
        vec![
            Placement::new(pipeline.id(), Some(stage.id())),
            Placement::new(other.id(), None),
        ],
    )
    .expect("task");
    repos.tasks.store(&task).await.expect("store task");

    let loaded = repos
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup")
        .expect("stored task");
    assert_eq!(loaded.name().as_str(), "Call back");
    assert_eq!(loaded.owner_id(), owner.id());
    assert_eq!(loaded.status(), TaskStatus::Wait);
    assert_eq!(loaded.position(), 2);
    assert_eq!(descriptions(&loaded), vec!["first", "second"]);
    assert_eq!(loaded.checklist().items(), task.checklist().items());
    assert_eq!(loaded.placements(), task.placements());
    assert_eq!(loaded, task);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_reconciles_checkboxes_and_replaces_placements() {
    let Some(repos) = setup().await.expect("database setup") else {
        return;
    };
    let owner = seed_user(&repos, "user@user.ru").await.expect("user");
    let pipeline = seed_pipeline(&repos, "Sales").await.expect("pipeline");
    let other = seed_pipeline(&repos, "Delivery").await.expect("pipeline");
    let mut task = build_task(
        &owner,
        "Draft",
        0,
        &["drop me", "keep me"],
        vec![Placement::new(pipeline.id(), None)],
    )
    .expect("task");
    repos.tasks.store(&task).await.expect("store task");
    let kept = task
        .checklist()
        .items()
        .get(1)
        .map(taskboard::task::domain::Checkbox::id)
        .expect("second checkbox");

    let start = NaiveDate::from_ymd_opt(2026, 10, 1).expect("date");
    let end = NaiveDate::from_ymd_opt(2026, 10, 20).expect("date");
    task.apply(
        TaskChanges {
            name: TaskName::new("Final").expect("name"),
            owner_id: owner.id(),
            status: TaskStatus::InProgress,
            position: 5,
            schedule: Schedule::new(Some(start), Some(end)).expect("schedule"),
            checklist: Some(vec![
                CheckboxEdit::new(
                    Some(kept),
                    CheckboxDescription::new("kept, checked").expect("text"),
                    true,
                ),
                CheckboxEdit::new(None, CheckboxDescription::new("added").expect("text"), false),
            ]),
            placements: Some(
                Placements::new(vec![Placement::new(other.id(), None)]).expect("placements"),
            ),
        },
        &DefaultClock,
    )
    .expect("apply changes");
    repos.tasks.update(&task).await.expect("update task");

    let loaded = repos
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup")
        .expect("stored task");
    assert_eq!(loaded.name().as_str(), "Final");
    assert_eq!(loaded.status(), TaskStatus::InProgress);
    assert_eq!(loaded.position(), 5);
    assert_eq!(loaded.schedule().start_at(), Some(start));
    assert_eq!(loaded.schedule().end_at(), Some(end));
    assert_eq!(descriptions(&loaded), vec!["kept, checked", "added"]);
    assert_eq!(
        loaded.checklist().items().first().map(|item| item.id()),
        Some(kept)
    );
    assert!(
        loaded
            .checklist()
            .items()
            .first()
            .is_some_and(|item| item.is_checked())
    );
    assert!(loaded.placements().contains_pipeline(other.id()));
    assert!(!loaded.placements().contains_pipeline(pipeline.id()));
    assert_eq!(loaded, task);
}

#[tokio::test(flavor = "multi_thread")]
async fn lists_filtered_pages_in_position_order() {
    let Some(repos) = setup().await.expect("database setup") else {
        return;
    };
    let owner = seed_user(&repos, "user@user.ru").await.expect("user");
    let pipeline = seed_pipeline(&repos, "Sales").await.expect("pipeline");
    let stage = seed_stage(&repos, &pipeline, "Won").await.expect("stage");
    for position in [3, 1, 2] {
        let task = build_task(
            &owner,
            &format!("placed {position}"),
            position,
            &[],
            vec![Placement::new(pipeline.id(), Some(stage.id()))],
        )
        .expect("task");
        repos.tasks.store(&task).await.expect("store task");
    }
    let loose = build_task(&owner, "loose", 0, &[], Vec::new()).expect("task");
    repos.tasks.store(&loose).await.expect("store task");

    let everything = repos
        .tasks
        .list(&TaskFilter::new(), PageRequest::default())
        .await
        .expect("list");
    assert_eq!(everything.total(), 4);
    assert_eq!(
        everything.items().first().map(|task| task.id()),
        Some(loose.id())
    );

    let page = PageRequest::new(1, 2).expect("page request");
    let staged = repos
        .tasks
        .list(&TaskFilter::new().with_stage(stage.id()), page)
        .await
        .expect("list");
    let names: Vec<&str> = staged
        .items()
        .iter()
        .map(|task| task.name().as_str())
        .collect();
    assert_eq!(staged.total(), 3);
    assert_eq!(staged.last_page(), 2);
    assert_eq!(names, vec!["placed 1", "placed 2"]);

    let by_owner_and_status = repos
        .tasks
        .list(
            &TaskFilter::new()
                .with_pipeline(pipeline.id())
                .with_owner(owner.id())
                .with_status(TaskStatus::Done),
            PageRequest::default(),
        )
        .await
        .expect("list");
    assert_eq!(by_owner_and_status.total(), 0);
    assert!(by_owner_and_status.items().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn rejects_a_placement_on_an_unknown_pipeline() {
    let Some(repos) = setup().await.expect("database setup") else {
        return;
    };
    let owner = seed_user(&repos, "user@user.ru").await.expect("user");
    let task = build_task(
        &owner,
        "Dangling",
        0,
        &[],
        vec![Placement::new(PipelineId::new(), None)],
    )
    .expect("task");

    let err = repos
        .tasks
        .store(&task)
        .await
        .expect_err("dangling placement");
    assert!(
        matches!(err, TaskRepositoryError::UnknownReference(_)),
        "unexpected error: {err}"
    );
    let stored = repos.tasks.find_by_id(task.id()).await.expect("lookup");
    assert!(stored.is_none(), "failed store must not leave a partial task");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_and_reports_missing_tasks() {
    let Some(repos) = setup().await.expect("database setup") else {
        return;
    };
    let owner = seed_user(&repos, "user@user.ru").await.expect("user");
    let pipeline = seed_pipeline(&repos, "Sales").await.expect("pipeline");
    let task = build_task(
        &owner,
        "Short-lived",
        0,
        &["a", "b"],
        vec![Placement::new(pipeline.id(), None)],
    )
    .expect("task");
    repos.tasks.store(&task).await.expect("store task");

    repos.tasks.delete(task.id()).await.expect("delete task");
    assert!(
        repos
            .tasks
            .find_by_id(task.id())
            .await
            .expect("lookup")
            .is_none()
    );

    let missing = TaskId::new();
    let err = repos
        .tasks
        .delete(missing)
        .await
        .expect_err("missing task");
    assert!(matches!(err, TaskRepositoryError::NotFound(id) if id == missing));
}
