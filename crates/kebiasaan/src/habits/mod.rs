//! Monthly evaluation of the seven daily habits.
//!
//! Daily entries arrive from the repository already fetched; everything in
//! here is pure computation apart from the HTTP router wrapping the service.

pub mod dates;
pub mod domain;
pub mod evaluation;
pub mod import;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use dates::{
    chronological, format_month_label, month_key_from_date, safe_parse_date, InvalidMonthKey,
    MonthKey,
};
pub use domain::{
    BangunPagi, Belajar, BelajarIndicator, Beribadah, BeribadahIndicator, Bermasyarakat,
    DailyEntry, HabitBlock, HabitCategory, MakanSehat, Nisn, Olahraga, Student, Tidur,
    UnknownCategory,
};
pub use evaluation::{
    rating_or_default, CategoryResult, ComponentRating, IndicatorBundle, IndicatorEvaluator,
    RollUpPolicy, RubricConfig, RubricError, MAX_RATING, MIN_RATING,
};
pub use import::{Dataset, ImportError};
pub use repository::{HabitRepository, RepositoryError, RosterFilter};
pub use router::recap_router;
pub use service::{MonthlyRecapService, RecapServiceError, StudentIndicators};
