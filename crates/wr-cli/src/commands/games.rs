use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use wr_games::SessionStatus;

use super::Workspace;

pub fn run(dir: &Path) -> Result<(), String> {
    let ws = Workspace::open(dir)?;
    ws.print_mode_note();

    if ws.controller.is_empty() {
        println!("  No games configured.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Game", "Kind", "Progress", "Score"]);

    for session in ws.controller.sessions() {
        let progress = match session.status() {
            SessionStatus::NotStarted => "not started".to_string(),
            SessionStatus::InProgress { round } => {
                format!("round {}/{}", round + 1, session.num_rounds())
            }
            SessionStatus::Finished => "finished".to_string(),
        };
        let score = format!("{} / {}", session.total_score(), session.max_score());
        table.add_row(vec![
            session.id().to_string(),
            format!("{} {}", session.icon(), session.title()),
            session.def().kind.name().to_string(),
            progress,
            score,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} games", ws.controller.len());

    Ok(())
}
