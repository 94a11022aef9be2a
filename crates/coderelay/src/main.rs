use crate::prelude::*;
use clap::Parser;

mod config;
mod error;
mod generate;
mod health;
mod prelude;
mod server;
mod upstream;

#[cfg(test)]
mod testing;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Code generation proxy in front of an Ollama model server"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Ollama base URL
    #[clap(
        long,
        env = "OLLAMA_URL",
        global = true,
        default_value = "http://localhost:11434"
    )]
    ollama_url: String,

    /// Model used when a request does not name one
    #[clap(long, env = "OLLAMA_MODEL", global = true, default_value = "codellama")]
    default_model: String,

    /// Timeout for code generation calls, in seconds
    #[clap(
        long,
        env = "CODERELAY_GENERATE_TIMEOUT",
        global = true,
        default_value = "60"
    )]
    generate_timeout: u64,

    /// Timeout for health probes, in seconds
    #[clap(
        long,
        env = "CODERELAY_HEALTH_TIMEOUT",
        global = true,
        default_value = "5"
    )]
    health_timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "CODERELAY_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve the code generation and health endpoints over HTTP
    Serve(crate::server::App),

    /// Generate code once and print it
    Generate(crate::generate::App),

    /// Probe the Ollama server and list its models
    Health(crate::health::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(sub_app) => crate::server::run(sub_app, app.global).await,
        SubCommands::Generate(sub_app) => crate::generate::run(sub_app, app.global).await,
        SubCommands::Health(sub_app) => crate::health::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
