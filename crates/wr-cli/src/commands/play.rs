use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use super::Workspace;
use super::terminal::{TerminalHost, parse_answer};

pub fn run(dir: &Path, game: &str) -> Result<(), String> {
    let mut ws = Workspace::open(dir)?;
    ws.print_mode_note();

    println!("  Type your answer, or 'quit' to stop. Progress is saved.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        let mut host = TerminalHost::new();
        let outcome = ws
            .controller
            .render(game, &mut host, &ws.catalog)
            .map_err(|e| e.to_string())?;
        ws.save()?;

        let Some(payload) = host.payload() else {
            break;
        };
        if outcome.is_done() {
            break;
        }

        let answer = loop {
            print!("> ");
            io::stdout().flush().map_err(|e| e.to_string())?;

            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) => return Ok(()), // EOF
                Err(e) => return Err(e.to_string()),
                _ => {}
            }

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                return Ok(());
            }

            match parse_answer(payload, input) {
                Ok(answer) => break answer,
                Err(e) => println!("  {}", e.yellow()),
            }
        };
        println!();

        ws.controller
            .submit(game, Some(answer))
            .map_err(|e| e.to_string())?;
        ws.save()?;
    }

    Ok(())
}
