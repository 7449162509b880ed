use raywood_site::config::get_configuration;
use raywood_site::startup::Application;
use raywood_site::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = get_subscriber(
        String::from("raywood_site"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    let config = get_configuration()?;
    let application = Application::build(config).await?;

    application.run_until_stop().await?;

    Ok(())
}
