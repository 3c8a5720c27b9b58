use crate::context::CliContext;
use crate::output::output_success;
use serde::Serialize;
use taskboard_core::BoardResult;
use taskboard_domain::TaskStatus;

#[derive(Serialize)]
struct MoveView {
    id: String,
    moved: bool,
    status: Option<TaskStatus>,
}

/// Move a task to another column. An unknown id reports `moved: false` and
/// still exits successfully; only a failed save is an error.
pub async fn move_task(ctx: &mut CliContext, id: &str, to: TaskStatus) -> BoardResult<()> {
    let known = ctx.repository.task(id).is_some();
    ctx.repository.update_task_status(id, to);

    if known {
        ctx.save().await?;
    }

    output_success(MoveView {
        id: id.to_string(),
        moved: known,
        status: ctx.repository.task(id).map(|t| t.status),
    });
    Ok(())
}
