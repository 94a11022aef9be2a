use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Model listing returned by the upstream `/api/tags` endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagModel>,
}

/// Single entry of the upstream model listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagModel {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub modified_at: String,
    #[serde(default)]
    pub digest: Option<String>,
}

/// Model summary exposed by the health endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ModelSummary {
    pub name: String,
    pub size: u64,
    pub modified: String,
}

/// Result of one health probe. Never cached.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HealthStatus {
    pub connected: bool,
    /// Present only when the upstream answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelSummary>>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl HealthStatus {
    /// 200 when the upstream answered, 503 otherwise.
    pub fn http_status(&self) -> u16 {
        if self.connected {
            200
        } else {
            503
        }
    }
}

/// Build the status for a reachable upstream, keeping the listing order.
pub fn connected_status(tags: TagsResponse, url: impl Into<String>) -> HealthStatus {
    HealthStatus {
        connected: true,
        models: Some(
            tags.models
                .into_iter()
                .map(|m| ModelSummary {
                    name: m.name,
                    size: m.size,
                    modified: m.modified_at,
                })
                .collect(),
        ),
        url: url.into(),
        error: None,
        status: None,
    }
}

/// Build the status for an unreachable or misbehaving upstream.
pub fn disconnected_status(
    url: impl Into<String>,
    error: impl Into<String>,
    status: Option<u16>,
) -> HealthStatus {
    HealthStatus {
        connected: false,
        models: None,
        url: url.into(),
        error: Some(error.into()),
        status,
    }
}

/// Human readable model size, e.g. `3.8 GB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

/// Render an RFC 3339 timestamp as UTC, or pass it through when it does not parse.
pub fn format_modified(modified: &str) -> String {
    DateTime::parse_from_rfc3339(modified)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
        })
        .unwrap_or_else(|_| modified.to_string())
}
