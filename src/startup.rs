use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings};
use crate::error::SubscriptionError;
use crate::routes::{
    handle_create_subscription, handle_delete_subscription, handle_get_subscription,
    handle_list_subscriptions, handle_total_cost, handle_update_subscription, health_check,
};

pub struct Application {
    pub port: u16,
    pub server: Server,
}

/// Anything that stops the service before it accepts its first request.
#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("Failed to read the configuration.")]
    Config(#[from] config::ConfigError),
    #[error("Invalid database settings.")]
    DatabaseSettings(#[source] sqlx::Error),
    #[error("Failed to synchronise the database schema.")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Failed to start the HTTP server.")]
    Server(#[from] std::io::Error),
}

impl Application {
    /// Connects to the database, brings the schema up to date and binds the
    /// listener. The server does not accept requests until it is awaited.
    pub async fn build(config: Settings) -> Result<Self, StartupError> {
        let db_pool =
            get_connection_db_pool(&config.database).map_err(StartupError::DatabaseSettings)?;

        // Already applied migrations are skipped, so running this on every start is safe.
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Database schema is up to date");

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();
        let server = run(listener, db_pool)?;

        tracing::info!("Server listening on {}:{}", config.application.get_host(), port);

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, db_pool: PgPool) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);

    let server = HttpServer::new(move || {
        // Bodies and query strings that do not deserialize get the same {message} shape as
        // any other validation error
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            tracing::error!("Invalid JSON body: {:?}", err);
            SubscriptionError::ValidationError(err.to_string()).into()
        });
        let query_config = web::QueryConfig::default().error_handler(|err, _req| {
            tracing::error!("Invalid query string: {:?}", err);
            SubscriptionError::ValidationError(err.to_string()).into()
        });

        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/subscriptions", web::post().to(handle_create_subscription))
            .route("/subscriptions", web::get().to(handle_list_subscriptions))
            // Must be registered before /subscriptions/{id}, which would also match it
            .route("/subscriptions/total", web::get().to(handle_total_cost))
            .route("/subscriptions/{id}", web::get().to(handle_get_subscription))
            .route("/subscriptions/{id}", web::put().to(handle_update_subscription))
            .route(
                "/subscriptions/{id}",
                web::delete().to(handle_delete_subscription),
            )
            .app_data(json_config)
            .app_data(query_config)
            .app_data(db_pool.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    Ok(PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options()?))
}
