use std::path::Path;

use super::Workspace;

pub fn run(dir: &Path, game: Option<&str>) -> Result<(), String> {
    let mut ws = Workspace::open(dir)?;

    match game {
        Some(id) => {
            ws.controller.reset(id).map_err(|e| e.to_string())?;
            let title = ws.controller.session(id).map_err(|e| e.to_string())?.title();
            println!("  Reset '{title}'.");
        }
        None => {
            ws.controller.full_reset();
            println!("  Reset all {} games.", ws.controller.len());
        }
    }

    ws.save()
}
