use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use super::dates::MonthKey;
use super::domain::{HabitCategory, Nisn, Student};
use super::evaluation::{IndicatorBundle, IndicatorEvaluator, RubricConfig};
use super::report::{
    build_export, summarize_category, ExportDocument, ExportError, StudentCategorySummary,
};
use super::repository::{HabitRepository, RepositoryError, RosterFilter};

/// Service composing the repository, the evaluator, and the report adapters.
pub struct MonthlyRecapService<R> {
    repository: Arc<R>,
    evaluator: Arc<IndicatorEvaluator>,
}

impl<R> MonthlyRecapService<R>
where
    R: HabitRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: RubricConfig) -> Self {
        Self {
            repository,
            evaluator: Arc::new(IndicatorEvaluator::new(config)),
        }
    }

    pub fn evaluator(&self) -> &IndicatorEvaluator {
        &self.evaluator
    }

    /// Rate one student for `month`.
    pub fn evaluate_student(
        &self,
        nisn: &Nisn,
        month: MonthKey,
    ) -> Result<StudentIndicators, RecapServiceError> {
        let student = self
            .repository
            .student(nisn)?
            .ok_or(RepositoryError::NotFound)?;
        let bundle = self.bundle_for(&student, month)?;

        Ok(StudentIndicators {
            nisn: student.nisn,
            nama: student.nama,
            kelas: student.kelas,
            bulan: month,
            label: month.label(),
            indikator: bundle,
        })
    }

    /// Score the filtered roster for `month` and render the assessment sheet.
    pub fn export(
        &self,
        month: MonthKey,
        filter: &RosterFilter,
        generated_on: NaiveDate,
    ) -> Result<ExportDocument, RecapServiceError> {
        let students = self.repository.students(filter)?;
        let mut evaluated = Vec::with_capacity(students.len());
        for student in students {
            let bundle = self.bundle_for(&student, month)?;
            evaluated.push((student, bundle));
        }

        let document = build_export(
            month,
            evaluated,
            self.evaluator.config().max_score,
            generated_on,
        )?;

        info!(
            %month,
            rows = document.rows.len(),
            filename = %document.filename,
            "generated monthly assessment export"
        );

        Ok(document)
    }

    /// Raw per-day values of one category for every student in the roster.
    pub fn category_summary(
        &self,
        category: HabitCategory,
        filter: &RosterFilter,
        month: Option<MonthKey>,
    ) -> Result<Vec<StudentCategorySummary>, RecapServiceError> {
        let students = self.repository.students(filter)?;
        students
            .iter()
            .map(|student| -> Result<StudentCategorySummary, RecapServiceError> {
                let entries = self.repository.entries_for(&student.nisn)?;
                Ok(summarize_category(student, &entries, category, month))
            })
            .collect()
    }

    fn bundle_for(
        &self,
        student: &Student,
        month: MonthKey,
    ) -> Result<IndicatorBundle, RecapServiceError> {
        let entries = self.repository.entries_for(&student.nisn)?;
        Ok(self.evaluator.evaluate(&entries, month))
    }
}

/// Indicator ratings for one student-month as served to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentIndicators {
    pub nisn: Nisn,
    pub nama: String,
    pub kelas: String,
    pub bulan: MonthKey,
    pub label: String,
    pub indikator: IndicatorBundle,
}

/// Error raised by the recap service.
#[derive(Debug, thiserror::Error)]
pub enum RecapServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
