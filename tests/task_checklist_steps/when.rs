//! When steps for task checklist BDD scenarios.

use super::world::{ChecklistWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::task::services::{CheckboxEditRequest, TaskDetails, UpdateTaskRequest};

/// Builds an update that keeps every field of `details` except the
/// checklist.
fn unchanged(details: &TaskDetails) -> UpdateTaskRequest {
    let task = details.task();
    UpdateTaskRequest::new(
        task.name().as_str(),
        task.owner_id(),
        task.status().as_str(),
        task.position(),
    )
}

fn save(world: &mut ChecklistWorld, request: UpdateTaskRequest) -> Result<(), eyre::Report> {
    let task_id = world.task()?.task().id();
    let result = run_async(world.board.update(task_id, request));
    if let Ok(updated) = &result {
        world.task = Some(updated.clone());
    }
    world.last_update = Some(result);
    Ok(())
}

#[when(r#"the checklist is saved keeping "{kept}" checked and adding "{added}""#)]
fn save_keeping_and_adding(
    world: &mut ChecklistWorld,
    kept: String,
    added: String,
) -> Result<(), eyre::Report> {
    let details = world.task()?;
    let existing = details
        .task()
        .checklist()
        .items()
        .iter()
        .find(|item| item.description().as_str() == kept)
        .ok_or_else(|| eyre::eyre!("no checkbox named {kept}"))?;
    let request = unchanged(details).with_checkboxes(vec![
        CheckboxEditRequest::existing(existing.id(), kept.as_str(), true),
        CheckboxEditRequest::new_item(added, false),
    ]);
    save(world, request)
}

#[when(r#"the task is renamed to "{name}" without a checklist"#)]
fn rename_without_checklist(world: &mut ChecklistWorld, name: String) -> Result<(), eyre::Report> {
    let task = world.task()?.task();
    let request = UpdateTaskRequest::new(
        name,
        task.owner_id(),
        task.status().as_str(),
        task.position(),
    );
    save(world, request)
}

#[when(r#"the checklist is saved with the checkbox "{description}" from the other task"#)]
fn save_with_foreign_checkbox(
    world: &mut ChecklistWorld,
    description: String,
) -> Result<(), eyre::Report> {
    let foreign = world
        .other_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing other task in scenario world"))?
        .task()
        .checklist()
        .items()
        .iter()
        .find(|item| item.description().as_str() == description)
        .map(|item| item.id())
        .ok_or_else(|| eyre::eyre!("no checkbox named {description}"))?;
    let request = unchanged(world.task()?).with_checkboxes(vec![CheckboxEditRequest::existing(
        foreign,
        description,
        false,
    )]);
    save(world, request)
}
