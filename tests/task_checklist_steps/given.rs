//! Given steps for task checklist BDD scenarios.

use super::world::{ChecklistWorld, run_async, split_lines};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::services::{CreateTaskRequest, TaskDetails};

fn create_task(
    world: &mut ChecklistWorld,
    name: String,
    lines: &str,
) -> Result<TaskDetails, eyre::Report> {
    let owner = world.owner()?;
    let request = CreateTaskRequest::new(name).with_checkboxes(split_lines(lines));
    run_async(world.board.create(owner.id(), request)).wrap_err("create task for scenario")
}

#[given(r#"a task "{name}" with checkboxes "{lines}""#)]
fn a_task_with_checkboxes(
    world: &mut ChecklistWorld,
    name: String,
    lines: String,
) -> Result<(), eyre::Report> {
    let created = create_task(world, name, &lines)?;
    world.task = Some(created);
    Ok(())
}

#[given(r#"another task "{name}" with checkboxes "{lines}""#)]
fn another_task_with_checkboxes(
    world: &mut ChecklistWorld,
    name: String,
    lines: String,
) -> Result<(), eyre::Report> {
    let created = create_task(world, name, &lines)?;
    world.other_task = Some(created);
    Ok(())
}
