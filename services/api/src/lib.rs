mod assess;
mod cli;
mod infra;
mod routes;
mod server;

use coverage_advisor::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
