use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::habits::dates::MonthKey;
use crate::habits::domain::{
    BangunPagi, Belajar, Beribadah, DailyEntry, Nisn, Olahraga, Student,
};
use crate::habits::evaluation::{IndicatorEvaluator, RubricConfig};
use crate::habits::repository::{HabitRepository, RepositoryError, RosterFilter};
use crate::habits::service::MonthlyRecapService;

pub(super) fn march() -> MonthKey {
    MonthKey::new(2025, 3).expect("valid month")
}

pub(super) fn rubric() -> RubricConfig {
    RubricConfig::default()
}

pub(super) fn evaluator() -> IndicatorEvaluator {
    IndicatorEvaluator::new(rubric())
}

pub(super) fn march_day(day: u32) -> String {
    format!("2025-03-{day:02}")
}

pub(super) fn student(nisn: &str, nama: &str, kelas: &str, walas: Option<&str>) -> Student {
    Student {
        nisn: Nisn::new(nisn),
        nama: nama.to_string(),
        kelas: kelas.to_string(),
        walas: walas.map(str::to_string),
    }
}

pub(super) fn entry_for(student: &Student, tanggal: &str) -> DailyEntry {
    let mut entry = DailyEntry::new(student.nisn.0.clone(), tanggal);
    entry.nama = student.nama.clone();
    entry.kelas = student.kelas.clone();
    entry
}

pub(super) fn wake_entry(tanggal: &str, read_prayer: bool) -> DailyEntry {
    let mut entry = DailyEntry::new("0012345678", tanggal);
    entry.bangun_pagi = Some(BangunPagi {
        jam: Some("04:30".to_string()),
        membaca_dan_bangun_tidur: Some(read_prayer),
        merapikan_tempat_tidur: Some(true),
    });
    entry
}

pub(super) fn worship_entry(tanggal: &str, fajar: Option<bool>, dhuha: Option<bool>) -> DailyEntry {
    let mut entry = DailyEntry::new("0012345678", tanggal);
    entry.beribadah = Some(Beribadah {
        sholat_fajar: fajar,
        sholat_dhuha: dhuha,
        ..Beribadah::default()
    });
    entry
}

pub(super) fn study_entry(tanggal: &str, kitab_suci: bool, tugas: Option<bool>) -> DailyEntry {
    let mut entry = DailyEntry::new("0012345678", tanggal);
    entry.belajar = Some(Belajar {
        membaca_kitab_suci: Some(kitab_suci),
        mengerjakan_tugas: tugas,
        ..Belajar::default()
    });
    entry
}

pub(super) fn exercise_entry(tanggal: &str, jenis: &str) -> DailyEntry {
    let mut entry = DailyEntry::new("0012345678", tanggal);
    entry.olahraga = Some(Olahraga {
        jenis_olahraga: Some(jenis.to_string()),
        deskripsi: None,
        waktu: None,
    });
    entry
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    students: Arc<Mutex<Vec<Student>>>,
    entries: Arc<Mutex<HashMap<Nisn, Vec<DailyEntry>>>>,
}

impl MemoryRepository {
    pub(super) fn with_student(self, student: Student, entries: Vec<DailyEntry>) -> Self {
        self.entries
            .lock()
            .expect("repository mutex poisoned")
            .insert(student.nisn.clone(), entries);
        self.students
            .lock()
            .expect("repository mutex poisoned")
            .push(student);
        self
    }
}

impl HabitRepository for MemoryRepository {
    fn students(&self, filter: &RosterFilter) -> Result<Vec<Student>, RepositoryError> {
        let guard = self.students.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|student| filter.matches(student))
            .cloned()
            .collect())
    }

    fn student(&self, nisn: &Nisn) -> Result<Option<Student>, RepositoryError> {
        let guard = self.students.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|student| &student.nisn == nisn).cloned())
    }

    fn entries_for(&self, nisn: &Nisn) -> Result<Vec<DailyEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("repository mutex poisoned");
        Ok(guard.get(nisn).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableRepository;

impl HabitRepository for UnavailableRepository {
    fn students(&self, _filter: &RosterFilter) -> Result<Vec<Student>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn student(&self, _nisn: &Nisn) -> Result<Option<Student>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn entries_for(&self, _nisn: &Nisn) -> Result<Vec<DailyEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Two 7A students and one 7B student with a handful of March entries.
pub(super) fn seeded_repository() -> MemoryRepository {
    let budi = student("002", "Budi, S.", "7A", Some("Bu Sari"));
    let ani = student("001", "Ani", "7A", Some("Bu Sari"));
    let dodi = student("003", "Dodi", "7B", Some("Pak Joko"));

    let mut budi_day = entry_for(&budi, "2025-03-03");
    budi_day.bangun_pagi = Some(BangunPagi {
        jam: Some("04:15".to_string()),
        membaca_dan_bangun_tidur: Some(true),
        merapikan_tempat_tidur: None,
    });
    let mut budi_late = entry_for(&budi, "2025-03-01");
    budi_late.bangun_pagi = Some(BangunPagi {
        jam: Some("06:45".to_string()),
        membaca_dan_bangun_tidur: Some(true),
        merapikan_tempat_tidur: None,
    });
    let budi_april = {
        let mut entry = entry_for(&budi, "2025-04-02");
        entry.bangun_pagi = Some(BangunPagi::default());
        entry
    };

    let mut ani_day = entry_for(&ani, "2025-03-05");
    ani_day.beribadah = Some(Beribadah {
        sholat_fajar: Some(true),
        ..Beribadah::default()
    });

    MemoryRepository::default()
        .with_student(budi, vec![budi_day, budi_april, budi_late])
        .with_student(ani, vec![ani_day])
        .with_student(dodi, Vec::new())
}

pub(super) fn recap_service(repository: MemoryRepository) -> MonthlyRecapService<MemoryRepository> {
    MonthlyRecapService::new(Arc::new(repository), rubric())
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
