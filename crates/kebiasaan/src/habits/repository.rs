use serde::Deserialize;

use super::domain::{DailyEntry, Nisn, Student};

/// Narrows the roster to one class and/or one homeroom teacher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RosterFilter {
    #[serde(default)]
    pub kelas: Option<String>,
    #[serde(default)]
    pub walas: Option<String>,
}

impl RosterFilter {
    pub fn matches(&self, student: &Student) -> bool {
        let kelas_matches = self
            .kelas
            .as_deref()
            .map(|kelas| kelas.trim().eq_ignore_ascii_case(student.kelas.trim()))
            .unwrap_or(true);

        let walas_matches = match self.walas.as_deref() {
            Some(walas) => student
                .walas
                .as_deref()
                .map(|assigned| assigned.trim().eq_ignore_ascii_case(walas.trim()))
                .unwrap_or(false),
            None => true,
        };

        kelas_matches && walas_matches
    }
}

/// Storage abstraction handing already-fetched records to the recap service.
pub trait HabitRepository: Send + Sync {
    fn students(&self, filter: &RosterFilter) -> Result<Vec<Student>, RepositoryError>;
    fn student(&self, nisn: &Nisn) -> Result<Option<Student>, RepositoryError>;
    fn entries_for(&self, nisn: &Nisn) -> Result<Vec<DailyEntry>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
