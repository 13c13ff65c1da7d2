use std::fs;
use std::path::Path;

use serde_json::json;

use wr_games::{GameDef, GameKind};
use wr_games::kinds::{
    DuelGame, EstimatorGame, GeoGame, ImpostorGame, QuizGame, RankingGame, TrendGame,
};

use super::{GameEntry, MANIFEST_FILE, Manifest};

/// name, capital, region, population (millions), GDP per capita (thousand USD)
const COUNTRIES: &[(&str, &str, &str, f64, [f64; 5])] = &[
    ("France", "Paris", "Europe", 68.2, [41.5, 43.7, 40.9, 44.5, 46.3]),
    ("Germany", "Berlin", "Europe", 84.5, [46.8, 51.2, 48.7, 52.7, 54.3]),
    ("Italy", "Rome", "Europe", 58.9, [31.9, 36.0, 34.1, 38.3, 39.6]),
    ("Spain", "Madrid", "Europe", 48.4, [27.1, 30.5, 29.7, 33.0, 34.7]),
    ("Poland", "Warsaw", "Europe", 36.7, [15.8, 18.0, 18.7, 22.1, 23.3]),
    ("Nigeria", "Abuja", "Africa", 223.8, [2.1, 2.1, 2.2, 1.6, 0.9]),
    ("Egypt", "Cairo", "Africa", 112.7, [3.6, 3.9, 4.3, 3.5, 3.3]),
    ("Kenya", "Nairobi", "Africa", 55.1, [1.9, 2.1, 2.1, 2.0, 1.9]),
    ("South Africa", "Pretoria", "Africa", 60.4, [5.7, 7.0, 6.6, 6.0, 6.2]),
    ("Japan", "Tokyo", "Asia", 124.5, [40.1, 39.8, 34.0, 33.8, 32.5]),
    ("India", "New Delhi", "Asia", 1428.6, [1.9, 2.3, 2.4, 2.5, 2.7]),
    ("Vietnam", "Hanoi", "Asia", 98.9, [3.6, 3.8, 4.1, 4.3, 4.7]),
    ("Indonesia", "Jakarta", "Asia", 277.5, [3.9, 4.3, 4.8, 4.9, 4.9]),
    ("Brazil", "Brasília", "South America", 216.4, [7.0, 7.5, 8.9, 10.0, 10.3]),
    ("Argentina", "Buenos Aires", "South America", 45.8, [8.5, 10.6, 13.7, 13.3, 13.9]),
    ("Chile", "Santiago", "South America", 19.6, [13.2, 16.1, 15.4, 17.1, 16.4]),
    ("Canada", "Ottawa", "North America", 38.8, [43.5, 52.4, 55.5, 53.4, 53.8]),
    ("Mexico", "Mexico City", "North America", 128.5, [8.9, 10.3, 11.5, 13.9, 13.8]),
    ("Australia", "Canberra", "Oceania", 26.6, [51.7, 60.7, 65.1, 64.8, 64.6]),
    ("New Zealand", "Wellington", "Oceania", 5.2, [41.6, 48.8, 48.4, 48.0, 48.5]),
];

const QUESTIONS: &[(&str, [&str; 4], &str)] = &[
    ("What is the capital of Australia?", ["Sydney", "Canberra", "Melbourne", "Perth"], "Canberra"),
    ("What is the capital of Canada?", ["Toronto", "Vancouver", "Ottawa", "Montreal"], "Ottawa"),
    ("What is the capital of Brazil?", ["Rio de Janeiro", "São Paulo", "Brasília", "Salvador"], "Brasília"),
    ("What is the capital of Nigeria?", ["Lagos", "Abuja", "Kano", "Ibadan"], "Abuja"),
    ("What is the capital of Vietnam?", ["Ho Chi Minh City", "Hanoi", "Da Nang", "Hue"], "Hanoi"),
    ("What is the capital of New Zealand?", ["Auckland", "Christchurch", "Wellington", "Hamilton"], "Wellington"),
];

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{}' already exists", name));
    }

    fs::create_dir_all(dir).map_err(|e| format!("cannot create directory: {e}"))?;

    let countries: Vec<_> = COUNTRIES
        .iter()
        .map(|(name, capital, region, population, gdp)| {
            json!({
                "name": name,
                "capital": capital,
                "region": region,
                "population": population,
                "gdp": gdp,
            })
        })
        .collect();
    write_json(dir, "countries.json", &countries)?;

    let questions: Vec<_> = QUESTIONS
        .iter()
        .map(|(question, options, answer)| {
            json!({
                "question": question,
                "options": options,
                "answer": answer,
            })
        })
        .collect();
    write_json(dir, "questions.json", &questions)?;

    let translations = json!({
        "common": {
            "victory": "Well played! You scored {score} of {max} points."
        }
    });
    write_json(dir, "translations.json", &translations)?;

    write_json(dir, MANIFEST_FILE, &demo_manifest())?;

    println!("Created game collection '{}' in {}/", name, name);
    println!("  countries.json     20 countries with region, population and GDP");
    println!("  questions.json     capital city questions");
    println!("  translations.json  message overrides");
    println!("  {MANIFEST_FILE}         seven games over these datasets");
    println!();
    println!("Get started:");
    println!("  cd {}", name);
    println!("  wr games");
    println!("  wr play capitals");

    Ok(())
}

fn demo_manifest() -> Manifest {
    let games = vec![
        GameEntry::new(
            "questions",
            GameDef::new("capitals", "Capital Cities", GameKind::Quiz(QuizGame::default()))
                .with_min_score(60)
                .with_seed(1),
        ),
        GameEntry::new(
            "countries",
            GameDef::new(
                "population-duel",
                "Population Duel",
                GameKind::Duel(DuelGame {
                    value_field: "population".to_string(),
                    ..DuelGame::default()
                }),
            )
            .with_seed(2),
        ),
        GameEntry::new(
            "countries",
            GameDef::new(
                "population-ranking",
                "Most Populous",
                GameKind::Ranking(RankingGame {
                    value_field: "population".to_string(),
                    ..RankingGame::default()
                }),
            )
            .with_rounds(3)
            .with_seed(3),
        ),
        GameEntry::new(
            "countries",
            GameDef::new(
                "gdp-trend",
                "GDP Forecast",
                GameKind::Trend(TrendGame {
                    series_field: "gdp".to_string(),
                    ..TrendGame::default()
                }),
            )
            .with_seed(4),
        ),
        GameEntry::new(
            "countries",
            GameDef::new(
                "population-estimate",
                "Population Guess",
                GameKind::Estimator(EstimatorGame {
                    label_field: "name".to_string(),
                    value_field: "population".to_string(),
                    unit: Some("million".to_string()),
                    ..EstimatorGame::default()
                }),
            )
            .with_rounds(3)
            .with_seed(5),
        ),
        GameEntry::new(
            "countries",
            GameDef::new("regions", "Where in the World", GameKind::Geo(GeoGame::default()))
                .with_min_score(60)
                .with_seed(6),
        ),
        GameEntry::new(
            "countries",
            GameDef::new(
                "odd-one-out",
                "Odd One Out",
                GameKind::Impostor(ImpostorGame::default()),
            )
            .with_rounds(3)
            .with_seed(7),
        ),
    ];

    Manifest {
        seed: Some(42),
        translations: Some("translations.json".into()),
        datasets: [
            ("countries".to_string(), "countries.json".into()),
            ("questions".to_string(), "questions.json".into()),
        ]
        .into_iter()
        .collect(),
        games,
    }
}

fn write_json<T: serde::Serialize>(dir: &Path, file: &str, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("JSON serialization error: {e}"))?;
    fs::write(dir.join(file), json).map_err(|e| format!("cannot write {file}: {e}"))
}
