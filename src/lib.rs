pub mod analysis;
pub mod config;
pub mod error;
pub mod openai;
pub mod router;

pub use analysis::{AnalysisMetadata, AnalysisResponse, Analyzer};
pub use config::Settings;
pub use error::AnalyzeError;
pub use openai::{AzureOpenAiClient, ChatCompletions};
pub use router::create_router;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Lambda stamps its own timestamps, so none are added here.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
