use std::sync::Arc;

use lambda_http::{run, Error};
use text_analyzer::{create_router, setup_logging, Analyzer, AzureOpenAiClient, Settings};

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_logging();

    let settings = Settings::from_env();
    tracing::info!(deployment = %settings.deployment, "Starting text analyzer");

    let analyzer = Analyzer::new(settings, Arc::new(AzureOpenAiClient::new()));
    let app = create_router(analyzer);

    run(app).await
}
