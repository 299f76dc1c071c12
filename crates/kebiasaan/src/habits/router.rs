use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;

use super::dates::MonthKey;
use super::domain::{HabitCategory, Nisn};
use super::report::StudentCategorySummary;
use super::repository::{HabitRepository, RepositoryError, RosterFilter};
use super::service::{MonthlyRecapService, RecapServiceError, StudentIndicators};
use crate::error::AppError;

/// Query parameters shared by the recap routes.
#[derive(Debug, Default, Deserialize)]
pub struct RecapQuery {
    #[serde(default)]
    pub bulan: Option<String>,
    #[serde(default)]
    pub kelas: Option<String>,
    #[serde(default)]
    pub walas: Option<String>,
}

impl RecapQuery {
    fn filter(&self) -> RosterFilter {
        RosterFilter {
            kelas: self.kelas.clone().filter(|value| !value.trim().is_empty()),
            walas: self.walas.clone().filter(|value| !value.trim().is_empty()),
        }
    }

    fn month(&self) -> Result<Option<MonthKey>, AppError> {
        match self.bulan.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(raw.parse::<MonthKey>()?)),
        }
    }

    fn required_month(&self) -> Result<MonthKey, AppError> {
        self.month()?.ok_or(AppError::MissingParameter("bulan"))
    }
}

/// Router builder exposing the monthly recap adapters over HTTP.
pub fn recap_router<R>(service: Arc<MonthlyRecapService<R>>) -> Router
where
    R: HabitRepository + 'static,
{
    Router::new()
        .route("/api/v1/rekap/export", get(export_handler::<R>))
        .route(
            "/api/v1/rekap/kategori/:kategori",
            get(category_handler::<R>),
        )
        .route(
            "/api/v1/siswa/:nisn/indikator",
            get(student_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<MonthlyRecapService<R>>>,
    Query(query): Query<RecapQuery>,
) -> Result<Response, AppError>
where
    R: HabitRepository + 'static,
{
    let month = query.required_month()?;
    let today = Local::now().date_naive();
    let document = service.export(month, &query.filter(), today)?;

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.body,
    )
        .into_response())
}

pub(crate) async fn category_handler<R>(
    State(service): State<Arc<MonthlyRecapService<R>>>,
    Path(kategori): Path<String>,
    Query(query): Query<RecapQuery>,
) -> Result<Json<Vec<StudentCategorySummary>>, AppError>
where
    R: HabitRepository + 'static,
{
    let category = kategori.parse::<HabitCategory>()?;
    let month = query.month()?;
    let summaries = service.category_summary(category, &query.filter(), month)?;
    Ok(Json(summaries))
}

pub(crate) async fn student_handler<R>(
    State(service): State<Arc<MonthlyRecapService<R>>>,
    Path(nisn): Path<String>,
    Query(query): Query<RecapQuery>,
) -> Result<Json<StudentIndicators>, AppError>
where
    R: HabitRepository + 'static,
{
    let month = query.required_month()?;
    let nisn = Nisn(nisn);
    let indicators = service
        .evaluate_student(&nisn, month)
        .map_err(|err| match err {
            RecapServiceError::Repository(RepositoryError::NotFound) => {
                AppError::NotFound(format!("student {nisn}"))
            }
            other => AppError::from(other),
        })?;
    Ok(Json(indicators))
}
