use mailinglist::config::get_configuration;
use mailinglist::startup::Application;
use mailinglist::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        String::from("mailinglist"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    let config = get_configuration()?;
    let application = Application::build(config).await?;

    application.run_until_stopped().await
}
