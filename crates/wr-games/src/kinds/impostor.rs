//! Impostor: three rows share a category, one does not. Find the odd one.
//!
//! Candidate rows whose item text contains their own category name ("South
//! Africa" in "Africa") are filtered out before sampling so the answer is not
//! given away by the label.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use wr_data::Dataset;

use super::{ConfigIssue, Minigame, RoundSlot, Score, check_rows, mismatch};
use crate::answer::Answer;
use crate::error::GameResult;
use crate::sampler::{DEFAULT_MAX_ATTEMPTS, RandomRoundSampler};
use crate::translate::{Translator, fill};

/// Impostor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpostorGame {
    /// Text field naming each item.
    pub item_field: String,
    /// Text field with the category.
    pub category_field: String,
    /// Points for spotting the impostor.
    pub points: u32,
    /// Size of the majority group.
    pub group_size: usize,
    /// Majority categories tried before giving up.
    pub max_attempts: usize,
    /// Drop rows whose item names its own category.
    pub filter_obvious: bool,
}

impl Default for ImpostorGame {
    fn default() -> Self {
        Self {
            item_field: "name".to_string(),
            category_field: "region".to_string(),
            points: 20,
            group_size: 3,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            filter_obvious: true,
        }
    }
}

/// One odd-one-out round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpostorRound {
    /// Item labels in display order.
    pub items: Vec<String>,
    /// Rows behind `items`, same order.
    pub rows: Vec<usize>,
    /// The odd item.
    pub impostor: String,
    /// Category shared by the others.
    pub majority: String,
    /// Category of the impostor.
    pub impostor_category: String,
}

impl ImpostorGame {
    /// Eligible rows grouped by category.
    fn pools(&self, data: &Dataset) -> BTreeMap<String, Vec<usize>> {
        let mut query = data.query().has(&self.item_field).has(&self.category_field);
        if self.filter_obvious {
            query = query.not_revealing(&self.item_field, &self.category_field);
        }

        let mut pools: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for index in query.execute() {
            if let Some(category) = data
                .get(index)
                .and_then(|row| row.text(&self.category_field).ok())
            {
                pools.entry(category.to_string()).or_default().push(index);
            }
        }
        pools
    }

    fn label(&self, data: &Dataset, row: usize) -> Option<String> {
        data.get(row)?
            .text(&self.item_field)
            .ok()
            .map(str::to_string)
    }

    fn build(
        &self,
        data: &Dataset,
        pools: &BTreeMap<String, Vec<usize>>,
        majority: &str,
        sampler: &mut RandomRoundSampler,
    ) -> Option<ImpostorRound> {
        let members = sampler.sample(pools.get(majority)?, self.group_size)?;
        let outsiders: Vec<&String> = pools.keys().filter(|c| *c != majority).collect();
        let impostor_category = (*sampler.choose(&outsiders)?).clone();
        let impostor_row = *sampler.choose(pools.get(&impostor_category)?)?;

        let mut rows = members;
        rows.push(impostor_row);
        sampler.shuffle(&mut rows);

        let items: Vec<String> = rows
            .iter()
            .map(|&r| self.label(data, r))
            .collect::<Option<_>>()?;
        let distinct: HashSet<&String> = items.iter().collect();
        if distinct.len() != items.len() {
            return None;
        }

        Some(ImpostorRound {
            impostor: self.label(data, impostor_row)?,
            items,
            rows,
            majority: majority.to_string(),
            impostor_category,
        })
    }
}

impl Minigame for ImpostorGame {
    type Round = ImpostorRound;

    const NAME: &'static str = "impostor";
    const ICON: &'static str = "🕵️";
    const ROW_BASED: bool = false;

    fn validate(&self, data: &Dataset) -> Result<(), ConfigIssue> {
        if self.group_size < 2 {
            return Err(format!(
                "impostor groups need at least 2 items, configured {}",
                self.group_size
            )
            .into());
        }
        check_rows(data, |row| {
            row.text(&self.item_field)?;
            row.text(&self.category_field)?;
            Ok(())
        })?;
        if data.categories(&self.category_field).len() < 2 {
            return Err(format!(
                "impostor needs at least 2 categories in \"{}\"",
                self.category_field
            )
            .into());
        }
        Ok(())
    }

    fn prepare_round(
        &self,
        data: &Dataset,
        _slot: RoundSlot,
        sampler: &mut RandomRoundSampler,
    ) -> GameResult<ImpostorRound> {
        let pools = self.pools(data);
        let mut majorities: Vec<String> = pools.keys().cloned().collect();
        sampler.shuffle(&mut majorities);
        let mut candidates = majorities.into_iter();

        sampler.with_retries(
            self.max_attempts,
            "a majority category with enough non-obvious rows",
            |s| {
                let majority = candidates.next()?;
                let round = self.build(data, &pools, &majority, s);
                if round.is_none() {
                    log::debug!("impostor: category \"{majority}\" cannot host a round");
                }
                round
            },
        )
    }

    fn score(&self, answer: &Answer, round: &ImpostorRound) -> GameResult<Score> {
        match answer {
            Answer::Choice(choice) => Ok(Score::all_or_nothing(
                *choice == round.impostor,
                self.points,
            )),
            other => Err(mismatch(Self::NAME, other)),
        }
    }

    fn max_points(&self) -> u32 {
        self.points
    }

    fn instructions(&self, tr: &dyn Translator) -> String {
        tr.translate(
            Self::NAME,
            "instructions",
            "All but one share a region. Find the impostor.",
        )
    }

    fn reveal(&self, round: &ImpostorRound, tr: &dyn Translator) -> String {
        fill(
            &tr.translate(
                Self::NAME,
                "reveal",
                "{impostor} is from {impostor_category}; the others are from {majority}.",
            ),
            &[
                ("impostor", round.impostor.clone()),
                ("impostor_category", round.impostor_category.clone()),
                ("majority", round.majority.clone()),
            ],
        )
    }
}
