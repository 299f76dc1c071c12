pub mod export;
pub mod summary;

pub use export::{
    build_export, export_filename, final_score, ExportDocument, ExportError, ExportRow,
    IndicatorColumn, INDICATOR_COLUMNS,
};
pub use summary::{summarize_category, CategoryDay, StudentCategorySummary};
