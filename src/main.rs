use anyhow::Context;
use devops_assistant::{
    api::LambdaClient,
    config::{default_config_path, load_config, DeploymentConfig},
    logging::init_logging,
    resolver::ResponseResolver,
    session::ChatSession,
    settings::open_settings_store,
    ui::run_ui,
    App,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config_path = default_config_path()?;
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let _logger = init_logging(&config).context("Failed to start logging")?;

    let (settings, settings_warning) = open_settings_store(config.storage_path());

    let deployment = DeploymentConfig::from_env();
    if deployment.api_key.is_none() {
        log::warn!("no API key configured; remote calls are sent without one");
    }
    let lambda = LambdaClient::new(deployment, config.request_timeout())?;
    let resolver = Arc::new(ResponseResolver::new(lambda, config.response_delay()));

    let session = ChatSession::new();
    log::info!("starting session {}", session.id());

    let mut app = App::new(session, settings);
    app.storage_warning = settings_warning;

    run_ui(app, resolver).await?;
    log::info!("session ended");
    Ok(())
}
