use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskboard_domain::TaskStatus;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A kanban-style task board", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Directory the board blob is stored in (or set TASKBOARD_DIR)
    #[arg(long, value_name = "DIR", env = "TASKBOARD_DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Storage key the board blob is stored under (or set TASKBOARD_KEY)
    #[arg(long, value_name = "KEY", env = "TASKBOARD_KEY", global = true)]
    pub key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the board as swimlanes
    Show {
        /// Filter tasks by a search query (title, description, tags, assignee)
        #[arg(long)]
        query: Option<String>,
    },
    /// Move a task to another status column
    Move {
        /// Task id
        #[arg(long)]
        id: String,
        /// Target status: todo, inprogress, approved, or reject
        #[arg(long, value_parser = parse_status)]
        to: TaskStatus,
    },
    /// Restore the seed board and clear the search query
    Reset,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::from_loose(s).ok_or_else(|| {
        format!("unrecognized status {s:?} (expected todo, inprogress, approved, or reject)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_is_lenient() {
        assert_eq!(parse_status("In Progress"), Ok(TaskStatus::InProgress));
        assert_eq!(parse_status("APPROVED"), Ok(TaskStatus::Approved));
        assert!(parse_status("done").is_err());
    }

    #[test]
    fn test_cli_parses_move() {
        let cli = Cli::try_parse_from([
            "taskboard", "--dir", "/tmp/b", "move", "--id", "1", "--to", "approved",
        ])
        .unwrap();
        match cli.command {
            Commands::Move { id, to } => {
                assert_eq!(id, "1");
                assert_eq!(to, TaskStatus::Approved);
            }
            _ => panic!("expected move command"),
        }
    }
}
