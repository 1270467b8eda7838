//! Document retrieval from the content host.

use std::time::Duration;

use tracing::debug;

use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::slug::PageSlug;

/// Fetches page documents over HTTPS. Build one per run; the underlying
/// client pools connections across pages.
pub struct PageFetcher {
	client: reqwest::Client,
	site: SiteConfig,
}

impl PageFetcher {
	/// `timeout` bounds every request end to end.
	pub fn new(site: SiteConfig, timeout: Duration) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;
		Ok(Self { client, site })
	}

	pub fn site(&self) -> &SiteConfig {
		&self.site
	}

	/// Retrieves the raw document for `slug`. Non-success statuses become
	/// fetch failures; transport errors and timeouts become network
	/// failures. No retries at this layer.
	pub async fn fetch_document(&self, slug: &PageSlug) -> Result<String> {
		let url = self.site.page_url(slug);
		debug!(target = "landfall.fetch", %url, "requesting page document");

		let response = self.client.get(url).send().await.map_err(|e| Error::Network(e.to_string()))?;
		let status = response.status();
		if !status.is_success() {
			return Err(Error::Fetch { status: status.as_u16() });
		}

		response.text().await.map_err(|e| Error::Network(e.to_string()))
	}
}
