use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryHabitRepository};
use crate::routes::with_recap_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use kebiasaan::config::AppConfig;
use kebiasaan::error::AppError;
use kebiasaan::habits::{Dataset, MonthlyRecapService};
use kebiasaan::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = match config.data.dataset_path.as_deref() {
        Some(path) => {
            let dataset = Dataset::from_path(path)?;
            info!(
                path = %path.display(),
                siswa = dataset.siswa.len(),
                kegiatan = dataset.kegiatan.len(),
                "loaded habit dataset"
            );
            InMemoryHabitRepository::from_dataset(dataset)
        }
        None => {
            warn!("APP_DATA_PATH not set; serving an empty roster");
            InMemoryHabitRepository::default()
        }
    };

    let recap_service = Arc::new(MonthlyRecapService::new(
        Arc::new(repository),
        config.rubric.clone(),
    ));

    let app = with_recap_routes(recap_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "monthly habit recap service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
