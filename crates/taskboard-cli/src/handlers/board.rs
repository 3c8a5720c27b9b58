use crate::context::CliContext;
use crate::output::output_success;
use serde::Serialize;
use taskboard_core::BoardResult;
use taskboard_domain::{Swimlane, SwimlaneColor, Task};

#[derive(Serialize)]
struct LaneView {
    id: &'static str,
    title: &'static str,
    color: SwimlaneColor,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct BoardView {
    query: String,
    lanes: Vec<LaneView>,
}

/// Render the board: the four swimlanes with their filtered tasks.
pub fn show(ctx: &CliContext) {
    let lanes = Swimlane::all()
        .into_iter()
        .map(|lane| LaneView {
            id: lane.id.as_str(),
            title: lane.title,
            color: lane.color,
            tasks: ctx.repository.tasks_by_status(lane.id),
        })
        .collect();

    output_success(BoardView {
        query: ctx.repository.search_query().to_string(),
        lanes,
    });
}

/// Restore the seed board and persist it.
pub async fn reset(ctx: &mut CliContext) -> BoardResult<()> {
    ctx.repository.reset_tasks();
    ctx.save().await?;

    #[derive(Serialize)]
    struct ResetView {
        reset: bool,
        tasks: usize,
    }

    output_success(ResetView {
        reset: true,
        tasks: ctx.repository.tasks().len(),
    });
    Ok(())
}
