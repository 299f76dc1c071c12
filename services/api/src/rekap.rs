use crate::infra::{parse_category, parse_date, parse_month, InMemoryHabitRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use kebiasaan::config::AppConfig;
use kebiasaan::error::AppError;
use kebiasaan::habits::{
    Dataset, HabitCategory, MonthKey, MonthlyRecapService, Nisn, RosterFilter, RubricConfig,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// JSON dataset with `siswa` and `kegiatan`
    #[arg(long)]
    pub(crate) data: PathBuf,
    /// Month to evaluate (YYYY-MM)
    #[arg(long, value_parser = parse_month)]
    pub(crate) bulan: MonthKey,
    /// Only include students of this class
    #[arg(long)]
    pub(crate) kelas: Option<String>,
    /// Only include students of this homeroom teacher
    #[arg(long)]
    pub(crate) walas: Option<String>,
    /// Directory the CSV is written to
    #[arg(long, default_value = ".")]
    pub(crate) out_dir: PathBuf,
    /// Date stamped into the file name (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) tanggal: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct CategoryArgs {
    /// JSON dataset with `siswa` and `kegiatan`
    #[arg(long)]
    pub(crate) data: PathBuf,
    /// Habit category slug, e.g. `bangun-pagi`
    #[arg(long, value_parser = parse_category)]
    pub(crate) kategori: HabitCategory,
    /// Restrict entries to one month (YYYY-MM)
    #[arg(long, value_parser = parse_month)]
    pub(crate) bulan: Option<MonthKey>,
    #[arg(long)]
    pub(crate) kelas: Option<String>,
    #[arg(long)]
    pub(crate) walas: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct StudentArgs {
    /// JSON dataset with `siswa` and `kegiatan`
    #[arg(long)]
    pub(crate) data: PathBuf,
    #[arg(long)]
    pub(crate) nisn: String,
    /// Month to evaluate (YYYY-MM)
    #[arg(long, value_parser = parse_month)]
    pub(crate) bulan: MonthKey,
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        data,
        bulan,
        kelas,
        walas,
        out_dir,
        tanggal,
    } = args;

    let service = load_service(&data, AppConfig::load()?.rubric)?;
    let generated_on = tanggal.unwrap_or_else(|| Local::now().date_naive());
    let path = write_export(&service, bulan, &RosterFilter { kelas, walas }, generated_on, &out_dir)?;

    println!(
        "Penilaian {} ditulis ke {}",
        bulan.label(),
        path.display()
    );
    Ok(())
}

pub(crate) fn run_category(args: CategoryArgs) -> Result<(), AppError> {
    let CategoryArgs {
        data,
        kategori,
        bulan,
        kelas,
        walas,
    } = args;

    let service = load_service(&data, AppConfig::load()?.rubric)?;
    let summaries = service.category_summary(kategori, &RosterFilter { kelas, walas }, bulan)?;
    print_json(&summaries)
}

pub(crate) fn run_student(args: StudentArgs) -> Result<(), AppError> {
    let service = load_service(&args.data, AppConfig::load()?.rubric)?;
    let indicators = service.evaluate_student(&Nisn::new(args.nisn), args.bulan)?;
    print_json(&indicators)
}

fn load_service(
    data: &Path,
    rubric: RubricConfig,
) -> Result<MonthlyRecapService<InMemoryHabitRepository>, AppError> {
    let dataset = Dataset::from_path(data)?;
    let repository = InMemoryHabitRepository::from_dataset(dataset);
    Ok(MonthlyRecapService::new(Arc::new(repository), rubric))
}

fn write_export(
    service: &MonthlyRecapService<InMemoryHabitRepository>,
    month: MonthKey,
    filter: &RosterFilter,
    generated_on: NaiveDate,
    out_dir: &Path,
) -> Result<PathBuf, AppError> {
    let document = service.export(month, filter, generated_on)?;
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&document.filename);
    std::fs::write(&path, document.body.as_bytes())?;
    Ok(path)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DATASET: &str = r#"{
        "siswa": [
            { "nisn": "001", "nama": "Ani", "kelas": "7A", "walas": "Bu Sari" },
            { "nisn": "002", "nama": "Budi, S.", "kelas": "7A", "walas": "Bu Sari" }
        ],
        "kegiatan": [
            { "nisn": "002", "nama": "Budi, S.", "kelas": "7A", "tanggal": "2025-03-10",
              "bangunPagi": { "jam": "04:45", "membacaDanBangunTidur": true } }
        ]
    }"#;

    fn service_from_fixture(dir: &TempDir) -> MonthlyRecapService<InMemoryHabitRepository> {
        let data = dir.path().join("kegiatan.json");
        std::fs::write(&data, DATASET).expect("fixture written");
        load_service(&data, RubricConfig::default()).expect("service loads")
    }

    #[test]
    fn export_writes_dated_csv_into_out_dir() {
        let dir = tempfile::tempdir().expect("temp dir");
        let service = service_from_fixture(&dir);
        let month: MonthKey = "2025-03".parse().expect("valid month");
        let generated_on = NaiveDate::from_ymd_opt(2025, 4, 2).expect("valid date");

        let out_dir = dir.path().join("keluaran");
        let path = write_export(
            &service,
            month,
            &RosterFilter::default(),
            generated_on,
            &out_dir,
        )
        .expect("export written");

        assert_eq!(path, out_dir.join("penilaian_akhir_2025-04-02.csv"));
        let body = std::fs::read_to_string(&path).expect("csv readable");
        assert_eq!(body.lines().count(), 3);
        assert!(body.contains("\"Budi, S.\""));
    }

    #[test]
    fn missing_dataset_is_an_import_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = load_service(&dir.path().join("tidak-ada.json"), RubricConfig::default());
        assert!(matches!(result, Err(AppError::Import(_))));
    }

    #[test]
    fn student_indicators_serialize_for_printing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let service = service_from_fixture(&dir);
        let month: MonthKey = "2025-03".parse().expect("valid month");

        let indicators = service
            .evaluate_student(&Nisn::new("002"), month)
            .expect("student evaluated");
        let rendered = serde_json::to_value(&indicators).expect("serializes");
        assert_eq!(rendered["label"], "Maret 2025");
        assert_eq!(rendered["indikator"]["bangunPagi"]["rating"], 3);
    }
}
