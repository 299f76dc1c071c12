use super::super::domain::{BelajarIndicator, BeribadahIndicator, DailyEntry};
use super::config::RubricConfig;
use super::{MAX_RATING, MIN_RATING};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// An entry that survived month filtering, paired with its parsed date.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DatedEntry<'a> {
    pub date: NaiveDate,
    pub entry: &'a DailyEntry,
}

/// A single yes/no signal rated over the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Indicator {
    BangunPagi,
    Tidur,
    MakanSehat,
    Olahraga,
    Bermasyarakat,
    Beribadah(BeribadahIndicator),
    Belajar(BelajarIndicator),
}

impl Indicator {
    /// `None` means the entry says nothing about this indicator and the day
    /// is not counted either way.
    pub(crate) fn observe(self, entry: &DailyEntry) -> Option<bool> {
        match self {
            Indicator::BangunPagi => entry
                .bangun_pagi
                .as_ref()
                .map(|block| block.membaca_dan_bangun_tidur == Some(true)),
            Indicator::Tidur => entry
                .tidur
                .as_ref()
                .map(|block| block.berdoa_sebelum_tidur == Some(true)),
            Indicator::MakanSehat => entry
                .makan_sehat
                .as_ref()
                .map(|block| block.makan_sayur_atau_buah == Some(true)),
            Indicator::Olahraga => entry
                .olahraga
                .as_ref()
                .map(|block| is_filled(block.jenis_olahraga.as_deref())),
            Indicator::Bermasyarakat => entry
                .bermasyarakat
                .as_ref()
                .map(|block| is_filled(block.deskripsi.as_deref())),
            Indicator::Beribadah(indicator) => entry
                .beribadah
                .as_ref()
                .and_then(|block| block.indicator(indicator)),
            Indicator::Belajar(indicator) => entry
                .belajar
                .as_ref()
                .and_then(|block| block.indicator(indicator)),
        }
    }
}

fn is_filled(value: Option<&str>) -> bool {
    value.map(|text| !text.trim().is_empty()).unwrap_or(false)
}

/// Observed and qualifying day counts for one indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub observed: u32,
    pub qualifying: u32,
}

impl Tally {
    pub(crate) fn rating(&self, config: &RubricConfig) -> Option<u8> {
        if self.observed == 0 {
            return None;
        }

        let ratio = self.qualifying as f32 / self.observed as f32;
        let rating = if ratio >= config.upper_ratio {
            MAX_RATING
        } else if ratio >= config.lower_ratio {
            MIN_RATING + 1
        } else {
            MIN_RATING
        };
        Some(rating)
    }
}

/// Count one observation per calendar day. `entries` must already be in
/// chronological order so the latest submission for a day wins.
pub(crate) fn tally(entries: &[DatedEntry<'_>], indicator: Indicator) -> Tally {
    let mut days: BTreeMap<NaiveDate, bool> = BTreeMap::new();
    for dated in entries {
        if let Some(qualifies) = indicator.observe(dated.entry) {
            days.insert(dated.date, qualifies);
        }
    }

    Tally {
        observed: days.len() as u32,
        qualifying: days.values().filter(|qualifies| **qualifies).count() as u32,
    }
}
