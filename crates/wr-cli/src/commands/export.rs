use std::path::Path;

use wr_games::Report;

use super::Workspace;

pub fn run(dir: &Path, format: &str, output: Option<&Path>) -> Result<(), String> {
    let ws = Workspace::open(dir)?;
    let report = Report::from_controller(&ws.controller);

    let content = match format {
        "json" => serde_json::to_string_pretty(&report)
            .map_err(|e| format!("JSON serialization error: {e}"))?,
        "markdown" | "md" => report.to_markdown(),
        "text" | "txt" => report.to_text(),
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: json, markdown, text"
            ));
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        print!("{content}");
    }

    Ok(())
}
