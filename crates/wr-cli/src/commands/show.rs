use std::path::Path;

use super::Workspace;
use super::terminal::TerminalHost;

pub fn run(dir: &Path, game: &str) -> Result<(), String> {
    let mut ws = Workspace::open(dir)?;
    ws.print_mode_note();

    let mut host = TerminalHost::new();
    ws.controller
        .render(game, &mut host, &ws.catalog)
        .map_err(|e| e.to_string())?;

    ws.save()
}
