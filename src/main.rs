use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use vibe_quiz_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

fn startup_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(startup_error)?;
    config.validate().map_err(startup_error)?;

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    log::info!(
        "Starting in {} mode with quiz schema v{}",
        config.environment,
        config.quiz_schema.version
    );

    let state = AppState::new(config).await.map_err(startup_error)?;
    let server_state = state.clone();

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(server_state.clone()))
            .wrap(Cors::permissive())
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    state.shutdown().await;
    log::info!("Server stopped");
    Ok(())
}
