use crate::config::UpstreamConfig;
use crate::prelude::{eprintln, println, *};
use crate::upstream::OllamaClient;
use coderelay_core::health::{
    connected_status, disconnected_status, format_modified, format_size, HealthStatus,
    TagsResponse,
};

#[derive(Debug, clap::Parser)]
#[command(name = "health")]
#[command(about = "Check whether the Ollama server is reachable and list its models")]
pub struct App {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Probe the upstream once.
///
/// Never fails: any timeout, network error, error status or unreadable listing
/// degrades to `connected: false` with an explanation.
pub async fn probe(client: &OllamaClient) -> HealthStatus {
    let url = client.config().base_url.clone();

    let reply = match client.list_models().await {
        Ok(reply) => reply,
        Err(e) => {
            return disconnected_status(url, e.to_string(), None);
        }
    };

    if !(200..300).contains(&reply.status) {
        log::warn!("Health probe got HTTP {} from {}", reply.status, url);
        return disconnected_status(
            url,
            format!("Ollama responded with HTTP {}", reply.status),
            Some(reply.status),
        );
    }

    match serde_json::from_str::<TagsResponse>(&reply.body) {
        Ok(tags) => connected_status(tags, url),
        Err(e) => disconnected_status(
            url,
            format!("Failed to parse model listing: {e}"),
            Some(reply.status),
        ),
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = UpstreamConfig::from_global(&global);

    if global.verbose {
        eprintln!("Probing {} (timeout {:?})", config.tags_url(), config.health_timeout);
    }

    let client = OllamaClient::new(config)?;
    let status = probe(&client).await;

    if app.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        output_formatted(&status);
    }

    if !status.connected {
        return Err(eyre!(
            "Ollama at {} is not reachable: {}",
            status.url,
            status.error.as_deref().unwrap_or("unknown error")
        ));
    }

    Ok(())
}

fn output_formatted(status: &HealthStatus) {
    if !status.connected {
        println!("Disconnected: {}", status.url);
        return;
    }

    println!("Connected: {}", status.url);

    let models = status.models.as_deref().unwrap_or_default();
    if models.is_empty() {
        println!("No models installed.");
        return;
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["NAME", "SIZE", "MODIFIED"]);
    for model in models {
        let size = format_size(model.size);
        let modified = format_modified(&model.modified);
        table.add_row(prettytable::row![model.name, size, modified]);
    }
    table.printstd();
}
