//! Then steps for task checklist BDD scenarios.

use super::world::{ChecklistWorld, run_async, split_lines};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::task::{domain::Task, services::TaskBoardError};

fn descriptions(task: &Task) -> Vec<String> {
    task.checklist()
        .items()
        .iter()
        .map(|item| item.description().as_str().to_owned())
        .collect()
}

fn checkbox_state(world: &ChecklistWorld, description: &str) -> Result<bool, eyre::Report> {
    world
        .task()?
        .task()
        .checklist()
        .items()
        .iter()
        .find(|item| item.description().as_str() == description)
        .map(|item| item.is_checked())
        .ok_or_else(|| eyre::eyre!("no checkbox named {description}"))
}

#[then(r#"the checklist reads "{lines}""#)]
fn checklist_reads(world: &ChecklistWorld, lines: String) -> Result<(), eyre::Report> {
    let actual = descriptions(world.task()?.task());
    let expected = split_lines(&lines);
    if actual != expected {
        return Err(eyre::eyre!("expected checklist {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the stored checklist reads "{lines}""#)]
fn stored_checklist_reads(world: &ChecklistWorld, lines: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.task().id();
    let stored = run_async(world.board.find(task_id))
        .wrap_err("reload task")?
        .ok_or_else(|| eyre::eyre!("task disappeared"))?;
    let actual = descriptions(stored.task());
    let expected = split_lines(&lines);
    if actual != expected {
        return Err(eyre::eyre!("expected checklist {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the checkbox "{description}" is checked"#)]
fn checkbox_is_checked(world: &ChecklistWorld, description: String) -> Result<(), eyre::Report> {
    if !checkbox_state(world, &description)? {
        return Err(eyre::eyre!("expected {description} to be checked"));
    }
    Ok(())
}

#[then(r#"the checkbox "{description}" is unchecked"#)]
fn checkbox_is_unchecked(world: &ChecklistWorld, description: String) -> Result<(), eyre::Report> {
    if checkbox_state(world, &description)? {
        return Err(eyre::eyre!("expected {description} to be unchecked"));
    }
    Ok(())
}

#[then(r#"the task is named "{name}""#)]
fn task_is_named(world: &ChecklistWorld, name: String) -> Result<(), eyre::Report> {
    let actual = world.task()?.task().name().as_str();
    if actual != name {
        return Err(eyre::eyre!("expected name {name}, found {actual}"));
    }
    Ok(())
}

#[then("the update fails on the checkboxes field")]
fn update_fails_on_checkboxes(world: &ChecklistWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;
    match result {
        Err(err @ TaskBoardError::Domain(_)) if err.field() == Some("checkboxes") => Ok(()),
        other => Err(eyre::eyre!("expected a checkboxes error, got {other:?}")),
    }
}
