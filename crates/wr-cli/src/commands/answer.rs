use std::path::Path;

use wr_games::{RenderOutcome, SubmitOutcome};

use super::Workspace;
use super::terminal::TerminalHost;

pub fn run(dir: &Path, game: &str, raw: &str) -> Result<(), String> {
    let mut ws = Workspace::open(dir)?;
    if !ws.controller.is_game_mode_enabled() {
        return Err("game mode is off (run `wr mode on` to play)".into());
    }

    // Silent pass: materialize the active round and parse the answer against it.
    let mut host = TerminalHost::answering(raw);
    let outcome = ws
        .controller
        .render(game, &mut host, &ws.catalog)
        .map_err(|e| e.to_string())?;
    if let Some(reason) = host.rejected() {
        return Err(reason.to_string());
    }

    let selection = match outcome {
        RenderOutcome::Done => {
            return Err(format!(
                "'{game}' is finished (run `wr reset {game}` to play again)"
            ));
        }
        RenderOutcome::Active { selection, .. } => selection,
    };

    match ws
        .controller
        .submit(game, selection)
        .map_err(|e| e.to_string())?
    {
        SubmitOutcome::Scored(_) => {}
        SubmitOutcome::NeedsAnswer => return Err("no answer given".into()),
        SubmitOutcome::AlreadyFinished => return Err(format!("'{game}' is already finished")),
        SubmitOutcome::ModeDisabled => return Err("game mode is off".into()),
    }
    ws.save()?;

    let mut host = TerminalHost::new();
    ws.controller
        .render(game, &mut host, &ws.catalog)
        .map_err(|e| e.to_string())?;
    ws.save()
}
