//! Terminal rendering of game rounds and parsing of typed answers.

use std::cmp::Ordering;

use colored::Colorize;
use strsim::jaro_winkler;

use wr_games::kinds::Trend;
use wr_games::{Answer, GameHost, Instructions, Outcome, RoundFeedback, RoundPayload};

/// Minimum similarity for a typed option to match a listed one.
const FUZZY_THRESHOLD: f64 = 0.8;

/// A [`GameHost`] printing to stdout.
///
/// When constructed with [`answering`](Self::answering), the typed answer is
/// parsed against the rendered round and handed back as the selection.
#[derive(Default)]
pub struct TerminalHost {
    input: Option<String>,
    quiet: bool,
    payload: Option<RoundPayload>,
    rejected: Option<String>,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that selects `input` for the rendered round without printing.
    pub fn answering(input: &str) -> Self {
        Self {
            input: Some(input.to_string()),
            quiet: true,
            ..Self::default()
        }
    }

    /// The round shown in the last pass, if any.
    pub fn payload(&self) -> Option<&RoundPayload> {
        self.payload.as_ref()
    }

    /// Why the typed answer did not fit the round.
    pub fn rejected(&self) -> Option<&str> {
        self.rejected.as_deref()
    }
}

impl GameHost for TerminalHost {
    fn display_instructions(&mut self, instructions: &Instructions) {
        if self.quiet {
            return;
        }
        println!(
            "  {} {}",
            instructions.title.bold(),
            format!(
                "(round {}/{}, score {})",
                instructions.round_number, instructions.num_rounds, instructions.total_score
            )
            .dimmed()
        );
        println!("  {}\n", instructions.text);
    }

    fn display_game_body(&mut self, payload: &RoundPayload) -> Option<Answer> {
        self.payload = Some(payload.clone());
        if !self.quiet {
            print_round(payload);
        }
        let raw = self.input.as_deref()?;
        match parse_answer(payload, raw) {
            Ok(answer) => Some(answer),
            Err(e) => {
                self.rejected = Some(e);
                None
            }
        }
    }

    fn display_round_feedback(&mut self, feedback: &RoundFeedback) {
        if self.quiet {
            return;
        }
        let mark = if feedback.correct {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        println!("  {mark} {}", feedback.message);
        println!("    {}\n", feedback.reveal.dimmed());
    }

    fn display_outcome(&mut self, outcome: Outcome, message: &str) {
        if self.quiet {
            return;
        }
        let line = match outcome {
            Outcome::Victory => message.green().bold(),
            Outcome::Defeat => message.red().bold(),
            Outcome::Completed => message.bold(),
        };
        println!("  {line}\n");
    }

    fn on_post_game_content(&mut self) {
        if self.quiet {
            return;
        }
        println!("  {}", "Run `wr summary` to see all results.".dimmed());
    }
}

fn print_round(payload: &RoundPayload) {
    match payload {
        RoundPayload::Quiz(r) => {
            println!("  {}", r.question.bold());
            print_options(&payload.choices());
        }
        RoundPayload::Duel(_) | RoundPayload::Impostor(_) => print_options(&payload.choices()),
        RoundPayload::Geo(r) => {
            println!("  {}", r.label.bold());
            print_options(&payload.choices());
        }
        RoundPayload::Ranking(r) => {
            print_options(&r.labels());
            println!(
                "  {}",
                "Answer with the full order, e.g. `2,4,1,3` or `Nile > Amazon > ...`".dimmed()
            );
        }
        RoundPayload::Trend(r) => {
            let series: Vec<String> = r.visible.iter().map(|v| v.to_string()).collect();
            println!("  {}", r.label.bold());
            println!("    {} → ?", series.join(" → "));
            println!("  {}", "Answer with up, down or stable.".dimmed());
        }
        RoundPayload::Estimator(r) => {
            println!("  {}", r.label.bold());
            println!(
                "  {}",
                format!("Somewhere between 0 and {}.", r.with_unit(r.slider_max)).dimmed()
            );
        }
    }
}

fn print_options(options: &[String]) {
    for (i, option) in options.iter().enumerate() {
        println!("    {}. {option}", i + 1);
    }
}

/// Parse typed input into the answer shape of a round.
pub fn parse_answer(payload: &RoundPayload, raw: &str) -> Result<Answer, String> {
    match payload {
        RoundPayload::Ranking(r) => parse_order(&r.labels(), raw).map(Answer::Ranking),
        RoundPayload::Trend(_) => Trend::parse(raw)
            .map(Answer::Trend)
            .ok_or_else(|| format!("\"{}\" is not a trend (use up, down or stable)", raw.trim())),
        RoundPayload::Estimator(_) => match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Answer::Number(n)),
            _ => Err(format!("\"{}\" is not a number", raw.trim())),
        },
        _ => resolve_choice(&payload.choices(), raw).map(Answer::Choice),
    }
}

/// Match input against listed options: exact text first, then the option
/// number, then the closest fuzzy match.
pub fn resolve_choice(choices: &[String], raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    let lowered = raw.to_lowercase();

    if let Some(exact) = choices.iter().find(|c| c.to_lowercase() == lowered) {
        return Ok(exact.clone());
    }

    if let Ok(n) = raw.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| choices.get(i))
            .cloned()
            .ok_or_else(|| format!("there is no option {n} (1-{})", choices.len()));
    }

    choices
        .iter()
        .map(|c| (c, jaro_winkler(&c.to_lowercase(), &lowered)))
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(c, _)| c.clone())
        .ok_or_else(|| format!("no option matches \"{raw}\""))
}

fn parse_order(labels: &[String], raw: &str) -> Result<Vec<String>, String> {
    let mut order: Vec<String> = Vec::new();
    for part in raw.split([',', '>']).map(str::trim).filter(|p| !p.is_empty()) {
        let label = resolve_choice(labels, part)?;
        if order.contains(&label) {
            return Err(format!("\"{label}\" is listed twice"));
        }
        order.push(label);
    }
    if order.len() != labels.len() {
        return Err(format!(
            "rank all {} items, got {}",
            labels.len(),
            order.len()
        ));
    }
    Ok(order)
}
