use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use wr_games::Report;

use super::Workspace;

pub fn run(dir: &Path) -> Result<(), String> {
    let ws = Workspace::open(dir)?;
    let report = Report::from_controller(&ws.controller);

    println!("  {} {}", "Total score:".bold(), report.total_score);
    println!();

    if report.games.is_empty() {
        println!("  No finished games yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Game", "Points", "Result", "Completed"]);

    for entry in &report.games {
        table.add_row(vec![
            format!("{} {}", entry.icon, entry.title),
            format!("{} / {}", entry.points, entry.max_points),
            if entry.successful {
                "successful".to_string()
            } else {
                "unsuccessful".to_string()
            },
            entry.completed_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");

    Ok(())
}
