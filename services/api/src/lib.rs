mod cli;
mod infra;
mod rekap;
mod routes;
mod server;

use kebiasaan::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
