use subscription_service::config::get_configuration;
use subscription_service::startup::{Application, StartupError};
use subscription_service::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // A local .env file is optional; variables already set in the environment win
    dotenvy::dotenv().ok();

    let subscriber = get_subscriber(
        String::from("subscription_service"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    let config = get_configuration()?;
    let application = Application::build(config).await.map_err(|err| {
        tracing::error!("Failed to start the application: {:?}", err);
        err
    })?;

    application.run_until_stop().await?;

    Ok(())
}
