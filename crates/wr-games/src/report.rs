//! Results export: the aggregate score and finished games as markdown or
//! plain text.

use serde::Serialize;

use crate::controller::{GameController, HistoryEntry};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// A summary of all finished games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Sum of the scores of finished games.
    pub total_score: u32,
    /// Finished games, newest first.
    pub games: Vec<HistoryEntry>,
}

impl Report {
    /// Snapshot the controller's aggregate and history.
    pub fn from_controller(controller: &GameController) -> Self {
        Self {
            total_score: controller.aggregate_score(),
            games: controller.history(),
        }
    }

    /// Render as a markdown document with a results table.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Game Results\n\n");
        out.push_str(&format!("**Total score:** {}\n", self.total_score));

        if self.games.is_empty() {
            out.push_str("\nNo finished games yet.\n");
            return out;
        }

        out.push_str("\n| | Game | Points | Result | Completed |\n");
        out.push_str("|---|---|---|---|---|\n");
        for g in &self.games {
            out.push_str(&format!(
                "| {} | {} | {} / {} | {} | {} |\n",
                g.icon,
                g.title,
                g.points,
                g.max_points,
                verdict(g.successful),
                g.completed_at.format(TIME_FORMAT)
            ));
        }
        out
    }

    /// Render as plain text, one line per game.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Game Results\n");
        out.push_str(&format!("Total score: {}\n", self.total_score));
        for g in &self.games {
            out.push_str(&format!(
                "{} {}: {}/{} points, {} ({})\n",
                g.icon,
                g.title,
                g.points,
                g.max_points,
                verdict(g.successful),
                g.completed_at.format(TIME_FORMAT)
            ));
        }
        out
    }
}

fn verdict(successful: bool) -> &'static str {
    if successful { "successful" } else { "unsuccessful" }
}
