mod config;
mod policy;
mod rules;

pub use config::{RollUpPolicy, RubricConfig, RubricError};

use super::dates::{month_key_from_date, safe_parse_date, MonthKey};
use super::domain::{BelajarIndicator, BeribadahIndicator, DailyEntry, HabitCategory};
use rules::{tally, DatedEntry, Indicator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Lowest rating, also the default for anything absent in a month.
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 3;

/// Stateless evaluator that applies the rubric to one student-month.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEvaluator {
    config: RubricConfig,
}

impl IndicatorEvaluator {
    pub fn new(config: RubricConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RubricConfig {
        &self.config
    }

    /// Rate every habit category for `month`.
    ///
    /// `entries` may hold the student's whole history; anything outside
    /// `month` or with an unparseable `tanggal` is skipped. The result always
    /// carries all seven categories.
    pub fn evaluate(&self, entries: &[DailyEntry], month: MonthKey) -> IndicatorBundle {
        let mut dated: Vec<DatedEntry<'_>> = Vec::with_capacity(entries.len());
        let mut unparseable = 0usize;

        for entry in entries {
            match safe_parse_date(&entry.tanggal) {
                Some(date) if month_key_from_date(date) == month => {
                    dated.push(DatedEntry { date, entry })
                }
                Some(_) => {}
                None => unparseable += 1,
            }
        }

        if unparseable > 0 {
            debug!(%month, unparseable, "skipped entries with unparseable tanggal");
        }

        dated.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.entry.tanggal.cmp(&b.entry.tanggal))
        });

        let categories = HabitCategory::ordered()
            .into_iter()
            .map(|category| (category, self.evaluate_category(category, &dated)))
            .collect();

        IndicatorBundle { categories }
    }

    fn evaluate_category(
        &self,
        category: HabitCategory,
        entries: &[DatedEntry<'_>],
    ) -> CategoryResult {
        let atomic = |indicator| CategoryResult {
            rating: self.rate(entries, indicator).unwrap_or(MIN_RATING),
            components: Vec::new(),
        };

        match category {
            HabitCategory::BangunPagi => atomic(Indicator::BangunPagi),
            HabitCategory::Tidur => atomic(Indicator::Tidur),
            HabitCategory::MakanSehat => atomic(Indicator::MakanSehat),
            HabitCategory::Olahraga => atomic(Indicator::Olahraga),
            HabitCategory::Bermasyarakat => atomic(Indicator::Bermasyarakat),
            HabitCategory::Beribadah => self.composite(
                entries,
                BeribadahIndicator::ordered()
                    .into_iter()
                    .map(|indicator| (indicator.key(), Indicator::Beribadah(indicator))),
            ),
            HabitCategory::Belajar => self.composite(
                entries,
                BelajarIndicator::ordered()
                    .into_iter()
                    .map(|indicator| (indicator.key(), Indicator::Belajar(indicator))),
            ),
        }
    }

    fn composite(
        &self,
        entries: &[DatedEntry<'_>],
        indicators: impl Iterator<Item = (&'static str, Indicator)>,
    ) -> CategoryResult {
        let components: Vec<ComponentRating> = indicators
            .filter_map(|(key, indicator)| {
                self.rate(entries, indicator).map(|rating| ComponentRating {
                    key: key.to_string(),
                    rating,
                })
            })
            .collect();

        let ratings: Vec<u8> = components.iter().map(|component| component.rating).collect();
        let rating = policy::roll_up(self.config.roll_up, &ratings).unwrap_or(MIN_RATING);

        CategoryResult { rating, components }
    }

    fn rate(&self, entries: &[DatedEntry<'_>], indicator: Indicator) -> Option<u8> {
        tally(entries, indicator).rating(&self.config)
    }
}

/// Rating for one sub-indicator of a composite category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRating {
    pub key: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentRating>,
}

impl CategoryResult {
    pub fn component(&self, key: &str) -> Option<u8> {
        self.components
            .iter()
            .find(|component| component.key == key)
            .map(|component| component.rating)
    }
}

/// Ratings for every habit category of one student-month. Derived on demand,
/// never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorBundle {
    categories: BTreeMap<HabitCategory, CategoryResult>,
}

impl IndicatorBundle {
    pub fn category(&self, category: HabitCategory) -> Option<&CategoryResult> {
        self.categories.get(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (HabitCategory, &CategoryResult)> {
        self.categories
            .iter()
            .map(|(category, result)| (*category, result))
    }
}

/// Read a rating out of a bundle, falling back to `default` when the
/// category or component was not rated this month. Pass `None` as
/// `component` for the category's own rating.
pub fn rating_or_default(
    bundle: &IndicatorBundle,
    category: HabitCategory,
    component: Option<&str>,
    default: u8,
) -> u8 {
    let Some(result) = bundle.category(category) else {
        return default;
    };

    match component {
        Some(key) => result.component(key).unwrap_or(default),
        None => result.rating,
    }
}
