use chrono::NaiveDate;
use kebiasaan::habits::{
    DailyEntry, Dataset, HabitCategory, HabitRepository, MonthKey, Nisn, RepositoryError,
    RosterFilter, Student,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct HabitRecords {
    students: Vec<Student>,
    entries: HashMap<Nisn, Vec<DailyEntry>>,
}

/// Roster and daily entries held in memory, seeded from a JSON dataset.
#[derive(Default, Clone)]
pub(crate) struct InMemoryHabitRepository {
    records: Arc<RwLock<HabitRecords>>,
}

impl InMemoryHabitRepository {
    pub(crate) fn from_dataset(dataset: Dataset) -> Self {
        let mut entries: HashMap<Nisn, Vec<DailyEntry>> = HashMap::new();
        for entry in dataset.kegiatan {
            entries.entry(entry.nisn.clone()).or_default().push(entry);
        }

        Self {
            records: Arc::new(RwLock::new(HabitRecords {
                students: dataset.siswa,
                entries,
            })),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HabitRecords>, RepositoryError> {
        self.records
            .read()
            .map_err(|_| RepositoryError::Unavailable("habit store lock poisoned".to_string()))
    }
}

impl HabitRepository for InMemoryHabitRepository {
    fn students(&self, filter: &RosterFilter) -> Result<Vec<Student>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .students
            .iter()
            .filter(|student| filter.matches(student))
            .cloned()
            .collect())
    }

    fn student(&self, nisn: &Nisn) -> Result<Option<Student>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard
            .students
            .iter()
            .find(|student| &student.nisn == nisn)
            .cloned())
    }

    fn entries_for(&self, nisn: &Nisn) -> Result<Vec<DailyEntry>, RepositoryError> {
        let guard = self.read()?;
        Ok(guard.entries.get(nisn).cloned().unwrap_or_default())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_month(raw: &str) -> Result<MonthKey, String> {
    raw.parse::<MonthKey>().map_err(|err| err.to_string())
}

pub(crate) fn parse_category(raw: &str) -> Result<HabitCategory, String> {
    raw.parse::<HabitCategory>().map_err(|err| {
        let known: Vec<&str> = HabitCategory::ordered()
            .into_iter()
            .map(HabitCategory::slug)
            .collect();
        format!("{err} (expected one of: {})", known.join(", "))
    })
}
