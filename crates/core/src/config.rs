//! Run configuration: content-host coordinates and pipeline knobs.

use std::time::Duration;

use url::Url;

use crate::extract::HeadMarker;
use crate::inject::{InjectionScope, SurfaceLayout};
use crate::slug::PageSlug;

pub const DEFAULT_HOST: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_OWNER: &str = "kobzevvv";
pub const DEFAULT_REPO: &str = "skillset-landing-pages";
pub const DEFAULT_BRANCH: &str = "master";

/// Default bound for document fetches and for each remote evaluation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where published page documents live. `host` is scheme and authority
/// only; the repository path is derived per page.
#[derive(Debug, Clone)]
pub struct SiteConfig {
	pub host: Url,
	pub owner: String,
	pub repo: String,
	pub branch: String,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			host: Url::parse(DEFAULT_HOST).expect("DEFAULT_HOST should parse"),
			owner: DEFAULT_OWNER.to_string(),
			repo: DEFAULT_REPO.to_string(),
			branch: DEFAULT_BRANCH.to_string(),
		}
	}
}

impl SiteConfig {
	/// Document URL for one page:
	/// `{host}/{owner}/{repo}/{branch}/landings/{slug}/index.html`.
	pub fn page_url(&self, slug: &PageSlug) -> Url {
		let mut url = self.host.clone();
		url.set_path(&format!("{}/{}/{}/landings/{}/index.html", self.owner, self.repo, self.branch, slug));
		url
	}
}

/// Pipeline behavior for one run. Every page in a batch is staged with
/// the same configuration.
#[derive(Debug, Clone)]
pub struct DeployConfig {
	/// Start marker for the head extraction rule.
	pub marker: HeadMarker,
	/// Editor panel shape expected on the builder page.
	pub layout: SurfaceLayout,
	/// Which fragments get written.
	pub scope: InjectionScope,
	/// DOM selector matching each editor widget.
	pub editor_selector: String,
	/// Bound on each document fetch.
	pub fetch_timeout: Duration,
	/// Bound on each remote evaluation round trip.
	pub rpc_timeout: Duration,
}

impl Default for DeployConfig {
	fn default() -> Self {
		Self {
			marker: HeadMarker::default(),
			layout: SurfaceLayout::default(),
			scope: InjectionScope::default(),
			editor_selector: ".CodeMirror".to_string(),
			fetch_timeout: DEFAULT_TIMEOUT,
			rpc_timeout: DEFAULT_TIMEOUT,
		}
	}
}
