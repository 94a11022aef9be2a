use crate::config::UpstreamConfig;
use crate::prelude::{eprintln, println, *};
use crate::upstream::OllamaClient;
use coderelay_core::generate::GenerationRequest;

#[derive(Debug, clap::Parser)]
#[command(name = "generate")]
#[command(about = "Generate code from a natural-language prompt")]
pub struct App {
    /// What the generated code should do
    pub prompt: String,

    /// Target language, used to template the prompt
    #[clap(short, long, env = "CODERELAY_LANGUAGE", default_value = "javascript")]
    pub language: String,

    /// Model to use instead of the configured default
    #[clap(short, long)]
    pub model: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = UpstreamConfig::from_global(&global);

    if global.verbose {
        eprintln!("Ollama URL: {}", config.base_url);
        eprintln!(
            "Model: {}",
            app.model.as_deref().unwrap_or(&config.default_model)
        );
        eprintln!("Language: {}", app.language);
    }

    let client = OllamaClient::new(config)?;
    let request = GenerationRequest {
        prompt: app.prompt,
        language: app.language,
        model: app.model,
    };

    let result = client
        .generate(&request)
        .await
        .map_err(|e| eyre!("Code generation failed: {}", e))?;

    if app.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.code);
    }

    Ok(())
}
