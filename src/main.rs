use std::io::Error;

use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;
use tokio::main;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    presentation::http::endpoints::{reminders::RemindersEndpoints, root::Endpoints},
};

mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;

#[main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::try_parse().map_err(Error::other)?;

    let server_url = format!("{}://{}:{}", config.scheme, config.host, config.port);

    tracing::info!(%server_url, "starting reminder service");

    let api_service = OpenApiService::new((Endpoints, RemindersEndpoints), "Reminders API", "0.1.0")
        .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/", ui);

    Server::new(TcpListener::bind(format!("{}:{}", config.host, config.port)))
        .run(app)
        .await
}
