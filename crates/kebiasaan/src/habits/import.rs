use super::domain::{DailyEntry, Student};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Roster plus daily entries, as exported from the school's data store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub siswa: Vec<Student>,
    #[serde(default)]
    pub kegiatan: Vec<DailyEntry>,
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ImportError> {
        let mut dataset: Dataset = serde_json::from_reader(reader)?;
        dataset.backfill_roster();
        Ok(dataset)
    }

    /// Students who only appear in `kegiatan` are added to the roster using
    /// the identity fields of their first entry.
    fn backfill_roster(&mut self) {
        for entry in &self.kegiatan {
            if self.siswa.iter().any(|student| student.nisn == entry.nisn) {
                continue;
            }
            self.siswa.push(Student {
                nisn: entry.nisn.clone(),
                nama: entry.nama.clone(),
                kelas: entry.kelas.clone(),
                walas: None,
            });
        }
    }
}

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read habit dataset: {}", err),
            ImportError::Json(err) => write!(f, "invalid habit dataset JSON: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
