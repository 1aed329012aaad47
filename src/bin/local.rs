use anyhow::{Context, Result};
use std::{env, io::Read, sync::Arc};
use text_analyzer::{setup_logging, Analyzer, AzureOpenAiClient, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let text = match env::args().nth(1).context("missing text argument (use - for stdin)")? {
        arg if arg == "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        arg => arg,
    };
    if text.trim().is_empty() {
        anyhow::bail!("Please provide text to analyze");
    }

    let analyzer = Analyzer::new(Settings::from_env(), Arc::new(AzureOpenAiClient::new()));
    let result = analyzer.analyze(&text).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
