use crate::{
    configuration::ConfigurationHandler, database_interface::DatabaseInterface, http::create_app,
    local_bookings::LocalBookings,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod backend;
mod booking_service;
mod configuration;
mod database_interface;
mod error;
mod http;
mod local_bookings;
mod schema;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Failed to load .env file: {err}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let app = if let Some(database_url) = configuration.database_url() {
        match DatabaseInterface::new(&database_url, configuration.pool_size()) {
            Ok(backend) => {
                info!("Successfully connected to database");
                create_app(backend)
            }
            Err(err) => {
                error!(%err, "Failed to establish database connection");
                std::process::exit(1);
            }
        }
    } else {
        warn!("Running without database, bookings are lost on restart");
        let backend = LocalBookings::default();
        backend.insert_example_slots();
        create_app(backend)
    };

    let address = format!("0.0.0.0:{}", configuration.port());
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Booking API listening on {address}");

    axum::serve(listener, app).await
}
