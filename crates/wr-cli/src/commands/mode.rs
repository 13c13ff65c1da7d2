use std::path::Path;

use wr_games::ModeTransition;

use super::Workspace;
use crate::ModeAction;

pub fn run(dir: &Path, action: ModeAction) -> Result<(), String> {
    let mut ws = Workspace::open(dir)?;

    let transition = match action {
        ModeAction::On => ws.controller.set_game_mode(true),
        ModeAction::Off => ws.controller.set_game_mode(false),
        ModeAction::Confirm => ws.controller.confirm_deactivation(),
        ModeAction::Cancel => ws.controller.cancel_deactivation(),
    };

    match transition {
        ModeTransition::Unchanged => {
            let state = if ws.controller.is_game_mode_enabled() {
                "on"
            } else {
                "off"
            };
            println!("  Nothing to do: game mode is {state}.");
        }
        ModeTransition::AwaitingConfirmation => {
            println!("  Turning game mode off hides every game.");
            println!("  Run `wr mode confirm` to proceed or `wr mode cancel` to keep playing.");
        }
        ModeTransition::Deactivated => println!("  Game mode is off."),
        ModeTransition::Reactivated => println!("  Game mode is on. All games have been reset."),
        ModeTransition::Cancelled => println!("  Game mode stays on."),
    }

    ws.save()
}
