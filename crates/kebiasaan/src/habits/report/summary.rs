use super::super::dates::{chronological, month_key_from_date, safe_parse_date, MonthKey};
use super::super::domain::{DailyEntry, HabitBlock, HabitCategory, Nisn, Student};
use serde::Serialize;

/// One day's raw values for a single habit category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDay {
    pub tanggal: String,
    #[serde(flatten)]
    pub values: HabitBlock,
}

/// Per-student raw view of one habit category; no ratings are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentCategorySummary {
    pub nisn: Nisn,
    pub nama: String,
    pub kelas: String,
    pub entries: Vec<CategoryDay>,
}

/// Collect `category` values for a student, oldest first.
///
/// With a `month`, entries outside it (including unparseable dates) are
/// dropped. Without one, every entry carrying the block is listed and
/// unparseable dates trail the valid ones.
pub fn summarize_category(
    student: &Student,
    entries: &[DailyEntry],
    category: HabitCategory,
    month: Option<MonthKey>,
) -> StudentCategorySummary {
    let mut days: Vec<CategoryDay> = entries
        .iter()
        .filter(|entry| match month {
            Some(month) => safe_parse_date(&entry.tanggal)
                .map(|date| month_key_from_date(date) == month)
                .unwrap_or(false),
            None => true,
        })
        .filter_map(|entry| {
            entry.block(category).map(|values| CategoryDay {
                tanggal: entry.tanggal.clone(),
                values,
            })
        })
        .collect();

    days.sort_by(|a, b| chronological(&a.tanggal, &b.tanggal));

    StudentCategorySummary {
        nisn: student.nisn.clone(),
        nama: student.nama.clone(),
        kelas: student.kelas.clone(),
        entries: days,
    }
}
