//! Debug-target discovery over the browser's HTTP listing endpoint.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Port the builder session is normally debugged on. Kept off the usual
/// 9222 so a personal browser profile can keep that one.
pub const DEFAULT_DEBUG_PORT: u16 = 9223;

/// Substring identifying the builder's designer tab in the listing.
pub const DESIGNER_TARGET: &str = "webflow.com/design";

/// One debuggable page from the `/json` listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugTarget {
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub url: String,
	#[serde(rename = "webSocketDebuggerUrl")]
	pub web_socket_debugger_url: Option<String>,
}

/// Lists open pages on `port`, trying each loopback address in turn.
pub async fn list_targets(port: u16) -> Result<Vec<DebugTarget>> {
	let client = reqwest::Client::builder()
		.timeout(Duration::from_millis(1500))
		.build()
		.map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;
	let mut last_error = "no response".to_string();

	for url in [
		format!("http://127.0.0.1:{port}/json"),
		format!("http://localhost:{port}/json"),
		format!("http://[::1]:{port}/json"),
	] {
		let response = match client.get(&url).send().await {
			Ok(r) => r,
			Err(e) => {
				last_error = e.to_string();
				continue;
			}
		};

		if !response.status().is_success() {
			last_error = format!("unexpected status {}", response.status());
			continue;
		}

		let targets: Vec<DebugTarget> = response
			.json()
			.await
			.map_err(|e| Error::Protocol(format!("failed to parse target listing: {e}")))?;
		debug!(target = "landfall.cdp", count = targets.len(), "listed debug targets");
		return Ok(targets);
	}

	Err(Error::Network(format!("no debug browser on port {port}: {last_error}")))
}

/// Picks the first target whose title or URL contains `needle`, ignoring
/// case and skipping targets another debugger already claimed.
pub fn find_target<'a>(targets: &'a [DebugTarget], needle: &str) -> Option<&'a DebugTarget> {
	let needle = needle.to_lowercase();
	targets
		.iter()
		.filter(|t| t.web_socket_debugger_url.is_some())
		.find(|t| t.title.to_lowercase().contains(&needle) || t.url.to_lowercase().contains(&needle))
}
